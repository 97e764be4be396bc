//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! cliniflow-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
   collections::{HashMap, VecDeque},
   path::PathBuf,
   sync::{
      Mutex,
      atomic::{AtomicUsize, Ordering},
   },
};

use async_trait::async_trait;
use tokio::sync::mpsc;

use cliniflow_domain::{
   bitacora::{BitacoraEntry, BitacoraId},
   voice::{CaptureError, CaptureEvent, VoiceAction},
};
use cliniflow_shared::PageResponse;

use crate::{
   capture::{CaptureEngine, CaptureSession},
   client::bitacora_client::BitacoraApi,
   client::reportes_client::ReportesApi,
   download::ArchiveSaver,
   error::FetchError,
   navigate::Navigator,
};

// ===== ScriptedCaptureEngine =====

/// 台本どおりのイベント列を流すキャプチャエンジン
///
/// `start()` のたびに登録済みセッションを先頭から一つ消費する。
/// `Err` を登録すれば起動失敗（能力なし・デバイス使用中）を再現できる。
#[derive(Default)]
pub struct ScriptedCaptureEngine {
   unavailable: bool,
   sessions:    Mutex<VecDeque<Result<Vec<CaptureEvent>, CaptureError>>>,
}

impl ScriptedCaptureEngine {
   pub fn new() -> Self {
      Self::default()
   }

   /// キャプチャ能力のないプラットフォームを再現する
   pub fn without_capability() -> Self {
      Self {
         unavailable: true,
         sessions:    Mutex::new(VecDeque::new()),
      }
   }

   /// 次の `start()` で流すイベント列を登録する
   pub fn push_session(&self, events: Vec<CaptureEvent>) {
      self.sessions.lock().unwrap().push_back(Ok(events));
   }

   /// 次の `start()` を失敗させる
   pub fn push_start_failure(&self, error: CaptureError) {
      self.sessions.lock().unwrap().push_back(Err(error));
   }
}

#[async_trait]
impl CaptureEngine for ScriptedCaptureEngine {
   fn is_available(&self) -> bool {
      !self.unavailable
   }

   async fn start(&self) -> Result<CaptureSession, CaptureError> {
      let scripted = self
         .sessions
         .lock()
         .unwrap()
         .pop_front()
         .ok_or_else(|| CaptureError::Other("sin sesiones programadas".to_string()))?;

      let events = scripted?;
      let (tx, rx) = mpsc::channel(events.len().max(1));
      for event in events {
         tx.try_send(event).expect("バッファは台本と同じ長さ");
      }
      // tx を drop することでイベント列の末尾でチャネルが閉じる
      Ok(CaptureSession::new(rx, None))
   }
}

// ===== RecordingNavigator =====

/// 遷移先を記録するナビゲータ
#[derive(Default)]
pub struct RecordingNavigator {
   routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn routes(&self) -> Vec<String> {
      self.routes.lock().unwrap().clone()
   }
}

impl Navigator for RecordingNavigator {
   fn navigate(&self, href: &str) {
      self.routes.lock().unwrap().push(href.to_string());
   }
}

// ===== MemorySaver =====

/// ディスクに書かずに保存内容を記録するセーバー
#[derive(Default)]
pub struct MemorySaver {
   saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemorySaver {
   pub fn new() -> Self {
      Self::default()
   }

   /// これまでに保存された `(ファイル名, ペイロード)` の一覧
   pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
      self.saved.lock().unwrap().clone()
   }
}

#[async_trait]
impl ArchiveSaver for MemorySaver {
   async fn save(&self, file_name: &str, payload: &[u8]) -> Result<PathBuf, std::io::Error> {
      self
         .saved
         .lock()
         .unwrap()
         .push((file_name.to_string(), payload.to_vec()));
      Ok(PathBuf::from(format!("/descargas/{file_name}")))
   }
}

// ===== ScriptedReportesApi =====

/// 台本どおりに応答するレポートクライアント
#[derive(Default)]
pub struct ScriptedReportesApi {
   replies:   Mutex<VecDeque<Result<VoiceAction, FetchError>>>,
   downloads: Mutex<VecDeque<Result<Vec<u8>, FetchError>>>,
   sent:      Mutex<Vec<String>>,
   fetched:   Mutex<Vec<String>>,
}

impl ScriptedReportesApi {
   pub fn new() -> Self {
      Self::default()
   }

   /// 次の `interpret` の応答を登録する
   pub fn push_reply(&self, reply: Result<VoiceAction, FetchError>) {
      self.replies.lock().unwrap().push_back(reply);
   }

   /// 次の `descargar` の応答を登録する
   pub fn push_download(&self, result: Result<Vec<u8>, FetchError>) {
      self.downloads.lock().unwrap().push_back(result);
   }

   /// 解釈に送られたトランスクリプトの一覧
   pub fn sent_transcripts(&self) -> Vec<String> {
      self.sent.lock().unwrap().clone()
   }

   /// バイナリ取得された href の一覧
   pub fn fetched_hrefs(&self) -> Vec<String> {
      self.fetched.lock().unwrap().clone()
   }
}

#[async_trait]
impl ReportesApi for ScriptedReportesApi {
   async fn interpret(&self, transcript: &str) -> Result<VoiceAction, FetchError> {
      self.sent.lock().unwrap().push(transcript.to_string());
      self
         .replies
         .lock()
         .unwrap()
         .pop_front()
         .unwrap_or_else(|| Err(FetchError::Transport("sin respuesta programada".to_string())))
   }

   async fn descargar(&self, href: &str) -> Result<Vec<u8>, FetchError> {
      self.fetched.lock().unwrap().push(href.to_string());
      self
         .downloads
         .lock()
         .unwrap()
         .pop_front()
         .unwrap_or_else(|| Ok(b"%PDF-1.7".to_vec()))
   }

   async fn backup(&self) -> Result<Vec<u8>, FetchError> {
      Ok(b"PK\x03\x04".to_vec())
   }

   async fn generar_reporte_ia(
      &self,
      _cita_id: i64,
      _notas_vagas: &str,
   ) -> Result<String, FetchError> {
      Ok("Reporte generado.".to_string())
   }
}

// ===== ScriptedBitacoraApi =====

/// 台本どおりにページを返す監査ログクライアント
///
/// `fetch_count` でネットワーク呼び出しの回数を検証できる
/// （「カーソルなしではネットワークに出ない」の検証に使う）。
#[derive(Default)]
pub struct ScriptedBitacoraApi {
   pages:       Mutex<VecDeque<Result<PageResponse<BitacoraEntry>, FetchError>>>,
   details:     Mutex<HashMap<i64, BitacoraEntry>>,
   fetch_count: AtomicUsize,
   cursors:     Mutex<Vec<String>>,
}

impl ScriptedBitacoraApi {
   pub fn new() -> Self {
      Self::default()
   }

   /// 次のページ取得（first / next 共通）の応答を登録する
   pub fn push_page(&self, page: Result<PageResponse<BitacoraEntry>, FetchError>) {
      self.pages.lock().unwrap().push_back(page);
   }

   /// 詳細取得の応答を登録する
   pub fn insert_detail(&self, entry: BitacoraEntry) {
      self.details.lock().unwrap().insert(entry.id.value(), entry);
   }

   /// これまでのネットワーク呼び出し回数
   pub fn fetch_count(&self) -> usize {
      self.fetch_count.load(Ordering::SeqCst)
   }

   /// `next_page` に渡されたカーソル URI の一覧
   pub fn cursors(&self) -> Vec<String> {
      self.cursors.lock().unwrap().clone()
   }

   fn next_scripted(&self) -> Result<PageResponse<BitacoraEntry>, FetchError> {
      self
         .pages
         .lock()
         .unwrap()
         .pop_front()
         .unwrap_or_else(|| Err(FetchError::Transport("sin páginas programadas".to_string())))
   }
}

#[async_trait]
impl BitacoraApi for ScriptedBitacoraApi {
   async fn first_page(&self) -> Result<PageResponse<BitacoraEntry>, FetchError> {
      self.fetch_count.fetch_add(1, Ordering::SeqCst);
      self.next_scripted()
   }

   async fn next_page(
      &self,
      cursor_uri: &str,
   ) -> Result<PageResponse<BitacoraEntry>, FetchError> {
      self.fetch_count.fetch_add(1, Ordering::SeqCst);
      self.cursors.lock().unwrap().push(cursor_uri.to_string());
      self.next_scripted()
   }

   async fn detail(&self, id: BitacoraId) -> Result<BitacoraEntry, FetchError> {
      self.fetch_count.fetch_add(1, Ordering::SeqCst);
      self
         .details
         .lock()
         .unwrap()
         .get(&id.value())
         .cloned()
         .ok_or(FetchError::Status {
            status:  404,
            message: "No encontrado.".to_string(),
         })
   }
}
