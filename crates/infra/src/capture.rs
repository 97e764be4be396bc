//! # 音声キャプチャエンジンの継ぎ目
//!
//! 実際の音声キャプチャ（マイク、音声認識サービス）は外部協力者であり、
//! ここでは能力トレイトとしてだけ扱う。エンジンはセッション単位で
//! 明示的に開始・停止され、コールバックではなくイベント列
//! （[`CaptureEvent`]）をチャネルで流す。
//!
//! テストでは `test-utils` feature の `ScriptedCaptureEngine` が
//! 偽のイベント列を注入する。

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use cliniflow_domain::voice::{CaptureError, CaptureEvent};

/// 進行中のキャプチャセッション
///
/// イベントの受信口と、ユーザー停止用のシグナルを束ねる。
/// 同時に存在できるセッションは一つだけ（ディスパッチャが保証する）。
pub struct CaptureSession {
   events: mpsc::Receiver<CaptureEvent>,
   stop:   Option<oneshot::Sender<()>>,
}

impl CaptureSession {
   pub fn new(events: mpsc::Receiver<CaptureEvent>, stop: Option<oneshot::Sender<()>>) -> Self {
      Self { events, stop }
   }

   /// 次のイベントを待つ。エンジンが閉じたら `None`
   pub async fn next_event(&mut self) -> Option<CaptureEvent> {
      self.events.recv().await
   }

   /// ユーザー停止を要求する
   ///
   /// エンジン側は `Failed(Aborted)` ないし `Ended` で応答する想定。
   /// 二度目以降の呼び出しは何もしない。
   pub fn stop(&mut self) {
      if let Some(stop) = self.stop.take() {
         let _ = stop.send(());
      }
   }
}

/// 音声キャプチャエンジンの能力トレイト
#[async_trait]
pub trait CaptureEngine: Send + Sync {
   /// プラットフォームがキャプチャ能力を提供するか
   fn is_available(&self) -> bool;

   /// 新しいキャプチャセッションを開始する
   ///
   /// 起動に失敗した場合（能力なし・デバイス使用中）は
   /// [`CaptureError::Unavailable`] / [`CaptureError::DeviceBusy`] を返す。
   async fn start(&self) -> Result<CaptureSession, CaptureError>;
}
