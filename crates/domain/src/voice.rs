//! # 音声コマンド
//!
//! 音声キャプチャ → リモート解釈 → アクション実行のドメインモデル。
//!
//! ## 設計方針
//!
//! キャプチャエンジン（ブラウザの SpeechRecognition に相当する外部能力）は
//! コールバックの山ではなく、名前付きイベントの列としてモデル化する。
//! ステートマシンはイベントを受けて状態遷移とユーザー向けメッセージを
//! 返すだけの純粋な構造体であり、偽のイベント列を注入すれば実エンジン
//! なしでテストできる。
//!
//! ## 状態遷移
//!
//! ```text
//! Idle ──activate──▶ Listening ──transcript──▶ Processing
//!   ▲                    │                          │
//!   └──stop / error──────┘      （完了後は常に）────┘
//! ```
//!
//! - `Listening` 中の再アクティベートは新セッションを開始せず、
//!   現在のセッションを停止する
//! - `Processing` に入った後のキャンセルは未対応（解釈は完走する）

use std::collections::BTreeMap;

use thiserror::Error;

/// 解釈済みの音声アクション
///
/// 解釈一回につき、いずれか一つのバリアントのみが有効。
/// ワイヤ形式（`accion: "descargar" | "navegar"` / `{error}`）からの
/// 変換はネットワークアダプタ側で行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceAction {
   /// 認証付きバイナリ取得 + クライアント側保存
   Download {
      url:        String,
      file_name:  String,
      params:     BTreeMap<String, String>,
      reporte_id: Option<String>,
   },
   /// クライアント側ナビゲーション（ネットワーク呼び出しなし）
   Navigate {
      url:        String,
      params:     BTreeMap<String, String>,
      reporte_id: Option<String>,
   },
   /// ドメインレベルの失敗（コマンド未認識）
   Failure { message: String },
}

/// URL にクエリ文字列を付加する
///
/// `params` が空ならそのまま返す。`BTreeMap` のキー順で直列化するため
/// 出力は決定的。キーと値は両方ともパーセントエンコードする。
pub fn build_href(url: &str, params: &BTreeMap<String, String>) -> String {
   if params.is_empty() {
      return url.to_string();
   }

   let query = params
      .iter()
      .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
      .collect::<Vec<_>>()
      .join("&");

   format!("{url}?{query}")
}

/// キャプチャエンジンの失敗分類
///
/// ユーザーへのフィードバックで区別される。`NoSpeech` は回復可能
/// （再試行のヒントを出して待機に戻る）、`Aborted` はユーザー自身の
/// 操作なので何も表示しない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
   /// 音声が検出されなかった（回復可能）
   #[error("No se detectó voz. Intenta de nuevo.")]
   NoSpeech,

   /// キャプチャサービスのネットワーク障害
   #[error("Error de red: el servicio de voz no está disponible.")]
   Network,

   /// マイク権限の拒否
   #[error("Permiso de micrófono denegado. Actívalo en el sistema.")]
   PermissionDenied,

   /// ユーザーによる中断（表示しない）
   #[error("captura abortada")]
   Aborted,

   /// プラットフォームにキャプチャ能力がない（起動前に失敗）
   #[error("El reconocimiento de voz no está disponible en esta plataforma.")]
   Unavailable,

   /// エンジンの起動失敗（デバイス使用中など）
   #[error("No se pudo iniciar el micrófono. ¿Ya está en uso?")]
   DeviceBusy,

   /// その他のエンジンエラー（エンジンのコードをそのまま伝える）
   #[error("Error de voz: {0}")]
   Other(String),
}

/// キャプチャエンジンが発するイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
   /// エンジンが起動した
   Started,
   /// 発話の検出が始まった
   SpeechStarted,
   /// 発話の検出が終わった
   SpeechEnded,
   /// 最終トランスクリプトが確定した
   Transcript(String),
   /// エンジンが失敗した
   Failed(CaptureError),
   /// セッションが終了した
   Ended,
}

/// ディスパッチャの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DispatcherPhase {
   Idle,
   Listening,
   Processing,
}

/// ユーザーに見せるメッセージ
///
/// フィードバック行とエラー行は別スロット（元 UI の 2 行に対応）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiMessage {
   Feedback(String),
   Error(String),
   ClearFeedback,
}

/// アクティベート要求の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
   /// キャプチャエンジンを起動してよい
   StartCapture,
   /// `Listening` 中だったため現在のセッションを停止した
   Stopped(Vec<UiMessage>),
   /// `Processing` 中はキャンセル不可
   InFlight,
}

/// イベント適用の結果
///
/// `interpret` が `Some` のとき、オーケストレータはトランスクリプトを
/// リモート解釈に送る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome {
   pub messages:  Vec<UiMessage>,
   pub interpret: Option<String>,
}

impl EventOutcome {
   fn messages(messages: Vec<UiMessage>) -> Self {
      Self {
         messages,
         interpret: None,
      }
   }
}

/// 音声コマンドディスパッチャ（純粋ステートマシン）
#[derive(Debug)]
pub struct VoiceDispatcher {
   phase: DispatcherPhase,
}

impl Default for VoiceDispatcher {
   fn default() -> Self {
      Self::new()
   }
}

impl VoiceDispatcher {
   pub fn new() -> Self {
      Self {
         phase: DispatcherPhase::Idle,
      }
   }

   pub fn phase(&self) -> DispatcherPhase {
      self.phase
   }

   /// 次のキャプチャを受け付けられるか
   pub fn ready(&self) -> bool {
      self.phase == DispatcherPhase::Idle
   }

   /// ユーザーのアクティベート操作
   ///
   /// 同時に許されるキャプチャセッションは一つだけ。`Listening` 中の
   /// 再アクティベートは停止として扱う。
   pub fn on_activate(&mut self) -> Activation {
      match self.phase {
         DispatcherPhase::Idle => Activation::StartCapture,
         DispatcherPhase::Listening => {
            self.phase = DispatcherPhase::Idle;
            Activation::Stopped(vec![UiMessage::ClearFeedback])
         }
         DispatcherPhase::Processing => Activation::InFlight,
      }
   }

   /// エンジン起動成功: `Idle → Listening`
   pub fn capture_started(&mut self) -> Vec<UiMessage> {
      self.phase = DispatcherPhase::Listening;
      vec![UiMessage::Feedback(
         "🎤 Escuchando... (ej: 'reporte de citas de ayer')".to_string(),
      )]
   }

   /// エンジン起動失敗: `Idle` のまま
   pub fn start_failed(&mut self, error: &CaptureError) -> Vec<UiMessage> {
      self.phase = DispatcherPhase::Idle;
      vec![UiMessage::Error(error.to_string())]
   }

   /// 明示的な停止要求: `Listening → Idle`、以降の処理は行わない
   pub fn on_stop(&mut self) -> Vec<UiMessage> {
      if self.phase == DispatcherPhase::Listening {
         self.phase = DispatcherPhase::Idle;
         vec![UiMessage::ClearFeedback]
      } else {
         Vec::new()
      }
   }

   /// キャプチャイベントを適用する
   pub fn on_event(&mut self, event: CaptureEvent) -> EventOutcome {
      match event {
         CaptureEvent::Started => EventOutcome::messages(Vec::new()),
         CaptureEvent::SpeechStarted => EventOutcome::messages(vec![UiMessage::Feedback(
            "🎙️ Capturando tu voz...".to_string(),
         )]),
         CaptureEvent::SpeechEnded => EventOutcome::messages(vec![UiMessage::Feedback(
            "Procesando...".to_string(),
         )]),
         CaptureEvent::Transcript(transcript) => {
            self.phase = DispatcherPhase::Processing;
            EventOutcome {
               messages:  vec![UiMessage::Feedback(format!(
                  "Comando reconocido: \"{transcript}\". Procesando..."
               ))],
               interpret: Some(transcript),
            }
         }
         CaptureEvent::Failed(error) => {
            self.phase = DispatcherPhase::Idle;
            let messages = match error {
               // 回復可能: 再試行のヒントであり、ハードエラーではない
               CaptureError::NoSpeech => vec![UiMessage::Feedback(error.to_string())],
               // ユーザー自身の中断は黙って飲み込む
               CaptureError::Aborted => vec![UiMessage::ClearFeedback],
               other => vec![UiMessage::Error(other.to_string())],
            };
            EventOutcome::messages(messages)
         }
         CaptureEvent::Ended => {
            // トランスクリプトなしで終了した場合のみ待機に戻る。
            // Processing 中の Ended は解釈を完走させる。
            if self.phase == DispatcherPhase::Listening {
               self.phase = DispatcherPhase::Idle;
            }
            EventOutcome::messages(Vec::new())
         }
      }
   }

   /// 解釈されたアクションの完了後: `Processing → Idle`
   pub fn finish_processing(&mut self) {
      self.phase = DispatcherPhase::Idle;
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   fn listening_dispatcher() -> VoiceDispatcher {
      let mut dispatcher = VoiceDispatcher::new();
      assert_eq!(dispatcher.on_activate(), Activation::StartCapture);
      dispatcher.capture_started();
      dispatcher
   }

   #[test]
   fn test_アクティベートでキャプチャが始まりlisteningになる() {
      let mut dispatcher = VoiceDispatcher::new();

      assert_eq!(dispatcher.on_activate(), Activation::StartCapture);

      let messages = dispatcher.capture_started();

      assert_eq!(dispatcher.phase(), DispatcherPhase::Listening);
      assert!(matches!(&messages[0], UiMessage::Feedback(text) if text.contains("Escuchando")));
   }

   #[test]
   fn test_エンジン起動失敗ではidleのままエラーを表示する() {
      let mut dispatcher = VoiceDispatcher::new();
      dispatcher.on_activate();

      let messages = dispatcher.start_failed(&CaptureError::DeviceBusy);

      assert_eq!(dispatcher.phase(), DispatcherPhase::Idle);
      assert_eq!(
         messages,
         vec![UiMessage::Error(
            "No se pudo iniciar el micrófono. ¿Ya está en uso?".to_string()
         )]
      );
   }

   #[test]
   fn test_listening中の再アクティベートは新セッションではなく停止になる() {
      let mut dispatcher = listening_dispatcher();

      let outcome = dispatcher.on_activate();

      assert_eq!(outcome, Activation::Stopped(vec![UiMessage::ClearFeedback]));
      assert_eq!(dispatcher.phase(), DispatcherPhase::Idle);
   }

   #[test]
   fn test_明示的な停止で処理は行われずidleに戻る() {
      let mut dispatcher = listening_dispatcher();

      let messages = dispatcher.on_stop();

      assert_eq!(messages, vec![UiMessage::ClearFeedback]);
      assert_eq!(dispatcher.phase(), DispatcherPhase::Idle);
   }

   #[test]
   fn test_トランスクリプト確定でprocessingに遷移し解釈を要求する() {
      let mut dispatcher = listening_dispatcher();

      let outcome =
         dispatcher.on_event(CaptureEvent::Transcript("descarga el reporte".to_string()));

      assert_eq!(dispatcher.phase(), DispatcherPhase::Processing);
      assert_eq!(outcome.interpret.as_deref(), Some("descarga el reporte"));
      assert!(
         matches!(&outcome.messages[0], UiMessage::Feedback(text) if text.contains("descarga el reporte"))
      );
   }

   #[test]
   fn test_no_speechは再試行ヒントを出して待機に戻る() {
      let mut dispatcher = listening_dispatcher();

      let outcome = dispatcher.on_event(CaptureEvent::Failed(CaptureError::NoSpeech));

      // ハードエラーではなくフィードバックとして表示する
      assert_eq!(
         outcome.messages,
         vec![UiMessage::Feedback(
            "No se detectó voz. Intenta de nuevo.".to_string()
         )]
      );
      assert!(dispatcher.ready());
      // すぐに次のキャプチャを受け付けられる
      assert_eq!(dispatcher.on_activate(), Activation::StartCapture);
   }

   #[test]
   fn test_中断は何も表示せずに飲み込まれる() {
      let mut dispatcher = listening_dispatcher();

      let outcome = dispatcher.on_event(CaptureEvent::Failed(CaptureError::Aborted));

      assert_eq!(outcome.messages, vec![UiMessage::ClearFeedback]);
      assert_eq!(dispatcher.phase(), DispatcherPhase::Idle);
   }

   #[test]
   fn test_権限拒否とネットワーク障害はエラーとして表示される() {
      let mut dispatcher = listening_dispatcher();
      let outcome = dispatcher.on_event(CaptureEvent::Failed(CaptureError::PermissionDenied));
      assert!(matches!(&outcome.messages[0], UiMessage::Error(text) if text.contains("micrófono")));

      let mut dispatcher = listening_dispatcher();
      let outcome = dispatcher.on_event(CaptureEvent::Failed(CaptureError::Network));
      assert!(matches!(&outcome.messages[0], UiMessage::Error(text) if text.contains("red")));
   }

   #[test]
   fn test_その他のエンジンエラーはコードをそのまま伝える() {
      let mut dispatcher = listening_dispatcher();

      let outcome = dispatcher.on_event(CaptureEvent::Failed(CaptureError::Other(
         "audio-capture".to_string(),
      )));

      assert_eq!(
         outcome.messages,
         vec![UiMessage::Error("Error de voz: audio-capture".to_string())]
      );
   }

   #[test]
   fn test_processing中のアクティベートはキャンセルにならない() {
      let mut dispatcher = listening_dispatcher();
      dispatcher.on_event(CaptureEvent::Transcript("hola".to_string()));

      assert_eq!(dispatcher.on_activate(), Activation::InFlight);
      assert_eq!(dispatcher.phase(), DispatcherPhase::Processing);
   }

   #[test]
   fn test_listening中のendedは待機に戻りprocessing中は維持される() {
      let mut dispatcher = listening_dispatcher();
      dispatcher.on_event(CaptureEvent::Ended);
      assert_eq!(dispatcher.phase(), DispatcherPhase::Idle);

      let mut dispatcher = listening_dispatcher();
      dispatcher.on_event(CaptureEvent::Transcript("hola".to_string()));
      dispatcher.on_event(CaptureEvent::Ended);
      assert_eq!(dispatcher.phase(), DispatcherPhase::Processing);
   }

   #[test]
   fn test_処理完了後は常にidleに戻る() {
      let mut dispatcher = listening_dispatcher();
      dispatcher.on_event(CaptureEvent::Transcript("hola".to_string()));

      dispatcher.finish_processing();

      assert_eq!(dispatcher.phase(), DispatcherPhase::Idle);
   }

   #[test]
   fn test_hrefの組み立てはキー順で決定的にエンコードされる() {
      let mut params = BTreeMap::new();
      params.insert("fecha".to_string(), "2024-01-02".to_string());
      params.insert("estado".to_string(), "en espera".to_string());

      let href = build_href("/reportes/citas", &params);

      assert_eq!(href, "/reportes/citas?estado=en%20espera&fecha=2024-01-02");
   }

   #[test]
   fn test_パラメータが空ならクエリは付かない() {
      assert_eq!(build_href("/reportes/citas", &BTreeMap::new()), "/reportes/citas");
   }
}
