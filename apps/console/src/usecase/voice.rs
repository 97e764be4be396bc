//! # 音声コマンドセッション
//!
//! キャプチャエンジン → ステートマシン → リモート解釈 → アクション実行
//! のオーケストレーション。状態遷移そのものは
//! [`cliniflow_domain::voice::VoiceDispatcher`] が純粋に担い、ここでは
//! 注入された能力（エンジン / 解釈 / 保存 / ナビゲーション）を繋ぐ。

use std::sync::Arc;

use cliniflow_domain::voice::{
   Activation,
   CaptureError,
   CaptureEvent,
   DispatcherPhase,
   UiMessage,
   VoiceAction,
   VoiceDispatcher,
   build_href,
};
use cliniflow_infra::{
   ArchiveSaver,
   CaptureEngine,
   CaptureSession,
   FetchError,
   Navigator,
   client::ReportesApi,
};

/// 音声コマンドのユースケース
pub struct VoiceCommandUsecase {
   dispatcher: VoiceDispatcher,
   engine:     Arc<dyn CaptureEngine>,
   reportes:   Arc<dyn ReportesApi>,
   saver:      Arc<dyn ArchiveSaver>,
   navigator:  Arc<dyn Navigator>,
   session:    Option<CaptureSession>,
}

impl VoiceCommandUsecase {
   pub fn new(
      engine: Arc<dyn CaptureEngine>,
      reportes: Arc<dyn ReportesApi>,
      saver: Arc<dyn ArchiveSaver>,
      navigator: Arc<dyn Navigator>,
   ) -> Self {
      Self {
         dispatcher: VoiceDispatcher::new(),
         engine,
         reportes,
         saver,
         navigator,
         session: None,
      }
   }

   pub fn phase(&self) -> DispatcherPhase {
      self.dispatcher.phase()
   }

   /// ユーザーのアクティベート操作
   ///
   /// - `Idle`: エンジンを起動して `Listening` へ
   /// - `Listening`: 現在のセッションを停止する（新セッションは開始しない）
   /// - `Processing`: キャンセル不可、何もしない
   pub async fn activate(&mut self) -> Vec<UiMessage> {
      match self.dispatcher.on_activate() {
         Activation::Stopped(messages) => {
            if let Some(mut session) = self.session.take() {
               session.stop();
            }
            messages
         }
         Activation::InFlight => {
            tracing::debug!("解釈が進行中のためアクティベートを無視");
            Vec::new()
         }
         Activation::StartCapture => {
            if !self.engine.is_available() {
               return self.dispatcher.start_failed(&CaptureError::Unavailable);
            }

            let session_id = uuid::Uuid::now_v7();
            tracing::info!("音声キャプチャを開始します: session={session_id}");

            match self.engine.start().await {
               Ok(session) => {
                  self.session = Some(session);
                  self.dispatcher.capture_started()
               }
               Err(error) => {
                  tracing::error!("キャプチャエンジンの起動に失敗: {error}");
                  self.dispatcher.start_failed(&error)
               }
            }
         }
      }
   }

   /// セッションのイベントを完走させる
   ///
   /// トランスクリプトが確定したら解釈と実行まで行う。`Processing` に
   /// 入った後のキャンセルは未対応なので、解釈は必ず完走する。
   pub async fn pump(&mut self) -> Vec<UiMessage> {
      let mut messages = Vec::new();
      let Some(mut session) = self.session.take() else {
         return messages;
      };

      while let Some(event) = session.next_event().await {
         let outcome = self.dispatcher.on_event(event);
         messages.extend(outcome.messages);

         if let Some(transcript) = outcome.interpret {
            messages.extend(self.process(&transcript).await);
            self.dispatcher.finish_processing();
            break;
         }

         if self.dispatcher.ready() {
            break;
         }
      }

      // イベント列がトランスクリプトなしで尽きた場合は待機に戻す
      if self.dispatcher.phase() == DispatcherPhase::Listening {
         messages.extend(self.dispatcher.on_event(CaptureEvent::Ended).messages);
      }

      messages
   }

   /// アクティベートしてセッションを完走させる（REPL 用の合成操作）
   pub async fn run(&mut self) -> Vec<UiMessage> {
      let mut messages = self.activate().await;
      messages.extend(self.pump().await);
      messages
   }

   /// トランスクリプトをリモート解釈に送り、結果のアクションを実行する
   ///
   /// トランスポート障害もドメインレベルの失敗も、同じ経路で
   /// ユーザー向けエラーテキストになる。
   async fn process(&self, transcript: &str) -> Vec<UiMessage> {
      tracing::debug!("トランスクリプトを解釈に送信: {transcript:?}");

      match self.reportes.interpret(transcript).await {
         Ok(action) => self.execute(action).await,
         Err(FetchError::Status { message, .. }) => vec![UiMessage::Error(message)],
         Err(error) => {
            tracing::error!("解釈リクエストに失敗: {error}");
            vec![UiMessage::Error(
               "No se pudo procesar el comando.".to_string(),
            )]
         }
      }
   }

   /// 解釈されたアクションを実行する
   async fn execute(&self, action: VoiceAction) -> Vec<UiMessage> {
      match action {
         VoiceAction::Download {
            url,
            file_name,
            params,
            ..
         } => {
            let mut messages = vec![UiMessage::Feedback(format!("Generando {file_name}..."))];
            let href = build_href(&url, &params);
            tracing::debug!("バイナリ取得: {href}");

            // 失敗時のリトライは行わない
            let saved = match self.reportes.descargar(&href).await {
               Ok(payload) => self.saver.save(&file_name, &payload).await.is_ok(),
               Err(error) => {
                  tracing::error!("レポートの取得に失敗: {error}");
                  false
               }
            };

            if saved {
               messages.push(UiMessage::Feedback(format!(
                  "❇️ Reporte de {file_name} descargado."
               )));
            } else {
               messages.push(UiMessage::Error(
                  "Error al descargar el archivo solicitado.".to_string(),
               ));
            }
            messages
         }
         VoiceAction::Navigate {
            url,
            params,
            reporte_id,
         } => {
            let href = build_href(&url, &params);
            let destino = reporte_id.unwrap_or_else(|| href.clone());
            self.navigator.navigate(&href);
            vec![UiMessage::Feedback(format!("Navegando a {destino}..."))]
         }
         VoiceAction::Failure { message } => vec![UiMessage::Error(message)],
      }
   }
}
