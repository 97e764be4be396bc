//! # キー入力キャプチャエンジン
//!
//! 実際のマイクと音声認識サービスは外部協力者であり、コンソール版は
//! `voz <texto>` で打ち込まれたテキストを最終トランスクリプトとして
//! 扱う。打ち込みが空なら「無音」（no-speech）として振る舞い、
//! 回復可能な再試行ヒントの経路を通す。

use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use cliniflow_domain::voice::{CaptureError, CaptureEvent};
use cliniflow_infra::{CaptureEngine, CaptureSession};

/// 打ち込みテキストをイベント列に変換するキャプチャエンジン
#[derive(Default)]
pub struct TypedCaptureEngine {
   pending: Mutex<VecDeque<Option<String>>>,
}

impl TypedCaptureEngine {
   pub fn new() -> Self {
      Self::default()
   }

   /// 次のセッションで使うトランスクリプトを積む
   ///
   /// `None` は無音（no-speech）を意味する。
   pub fn queue_transcript(&self, transcript: Option<String>) {
      self.pending.lock().unwrap().push_back(transcript);
   }
}

#[async_trait]
impl CaptureEngine for TypedCaptureEngine {
   fn is_available(&self) -> bool {
      true
   }

   async fn start(&self) -> Result<CaptureSession, CaptureError> {
      let pending = self
         .pending
         .lock()
         .unwrap()
         .pop_front()
         .ok_or_else(|| CaptureError::Other("no hay dictado pendiente".to_string()))?;

      let events = match pending {
         Some(text) => vec![
            CaptureEvent::Started,
            CaptureEvent::SpeechStarted,
            CaptureEvent::SpeechEnded,
            CaptureEvent::Transcript(text),
            CaptureEvent::Ended,
         ],
         None => vec![
            CaptureEvent::Started,
            CaptureEvent::Failed(CaptureError::NoSpeech),
         ],
      };

      let (tx, rx) = mpsc::channel(events.len());
      for event in events {
         let _ = tx.try_send(event);
      }
      Ok(CaptureSession::new(rx, None))
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   async fn drain(session: &mut CaptureSession) -> Vec<CaptureEvent> {
      let mut events = Vec::new();
      while let Some(event) = session.next_event().await {
         events.push(event);
      }
      events
   }

   #[tokio::test]
   async fn test_打ち込みテキストがトランスクリプトとして流れる() {
      let engine = TypedCaptureEngine::new();
      engine.queue_transcript(Some("reporte de citas de hoy".to_string()));

      let mut session = engine.start().await.unwrap();
      let events = drain(&mut session).await;

      assert_eq!(
         events,
         vec![
            CaptureEvent::Started,
            CaptureEvent::SpeechStarted,
            CaptureEvent::SpeechEnded,
            CaptureEvent::Transcript("reporte de citas de hoy".to_string()),
            CaptureEvent::Ended,
         ]
      );
   }

   #[tokio::test]
   async fn test_空の打ち込みはno_speechになる() {
      let engine = TypedCaptureEngine::new();
      engine.queue_transcript(None);

      let mut session = engine.start().await.unwrap();
      let events = drain(&mut session).await;

      assert_eq!(
         events,
         vec![
            CaptureEvent::Started,
            CaptureEvent::Failed(CaptureError::NoSpeech),
         ]
      );
   }

   #[tokio::test]
   async fn test_積まれていない状態のstartは失敗する() {
      let engine = TypedCaptureEngine::new();

      assert!(engine.start().await.is_err());
   }
}
