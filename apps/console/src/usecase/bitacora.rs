//! # 監査ログビューア
//!
//! カーソルページャの呼び出し側状態を所有する:
//!
//! - **in-flight ガード**: マージは可換ではないため、同一コレクション
//!   に対するページ取得を同時に走らせない
//! - **初回 / 追加の区別**: 初回は置き換え、追加は重複排除つき追記
//! - **詳細ビューの最新要求 ID**: 追い越された応答は黙って捨てる

use cliniflow_domain::bitacora::{BitacoraCollection, BitacoraEntry, BitacoraId};
use cliniflow_infra::client::BitacoraApi;
use cliniflow_shared::PageResponse;

use crate::error::ConsoleError;

/// 監査ログの一覧ビュー状態
#[derive(Default)]
pub struct BitacoraBrowser {
   collection: BitacoraCollection,
   in_flight:  bool,
}

impl BitacoraBrowser {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn entries(&self) -> &[BitacoraEntry] {
      self.collection.entries()
   }

   pub fn has_more(&self) -> bool {
      self.collection.has_more()
   }

   /// 初回取得を開始する（in-flight ガードのみ）
   pub fn begin_first(&mut self) -> Result<(), ConsoleError> {
      if self.in_flight {
         return Err(ConsoleError::LoadInFlight);
      }
      self.in_flight = true;
      Ok(())
   }

   /// 追加取得を開始する
   ///
   /// カーソルがない状態での呼び出しは、ネットワークに出る前に
   /// プログラミングエラーとして拒否される。
   pub fn begin_more(&mut self) -> Result<String, ConsoleError> {
      if self.in_flight {
         return Err(ConsoleError::LoadInFlight);
      }
      let cursor = self.collection.next_uri()?.to_string();
      self.in_flight = true;
      Ok(cursor)
   }

   /// 取得したページを畳み込み、in-flight を解除する
   pub fn complete(&mut self, page: PageResponse<BitacoraEntry>, is_first: bool) {
      self.collection.apply_page(page.results, page.next, is_first);
      self.in_flight = false;
   }

   /// 取得失敗時に in-flight を解除する
   pub fn fail(&mut self) {
      self.in_flight = false;
   }

   /// 最初のページを読み込む（リセットして再取得のセマンティクス）
   ///
   /// 戻り値は取り込んだ件数。
   pub async fn load_first(&mut self, api: &dyn BitacoraApi) -> Result<usize, ConsoleError> {
      self.begin_first()?;
      match api.first_page().await {
         Ok(page) => {
            let count = page.results.len();
            self.complete(page, true);
            Ok(count)
         }
         Err(e) => {
            self.fail();
            Err(e.into())
         }
      }
   }

   /// 次のページを読み込み、新規に追加された件数を返す
   pub async fn load_more(&mut self, api: &dyn BitacoraApi) -> Result<usize, ConsoleError> {
      let cursor = self.begin_more()?;
      match api.next_page(&cursor).await {
         Ok(page) => {
            let before = self.collection.len();
            self.complete(page, false);
            Ok(self.collection.len() - before)
         }
         Err(e) => {
            self.fail();
            Err(e.into())
         }
      }
   }
}

/// 監査ログの詳細ビュー状態
///
/// 同時に「現在」の詳細取得は一つだけ。応答は要求した ID で照合し、
/// 追い越された応答が新しい詳細ビューを上書きすることはない。
#[derive(Default)]
pub struct DetailViewer {
   requested: Option<BitacoraId>,
   current:   Option<BitacoraEntry>,
}

impl DetailViewer {
   pub fn new() -> Self {
      Self::default()
   }

   /// 現在表示中の詳細
   pub fn current(&self) -> Option<&BitacoraEntry> {
      self.current.as_ref()
   }

   /// 詳細取得を要求した（最新の要求 ID を差し替える）
   pub fn request(&mut self, id: BitacoraId) {
      self.requested = Some(id);
   }

   /// 応答を届ける
   ///
   /// 最新の要求 ID と一致すれば表示を差し替えて `true`。
   /// 追い越された応答は黙って捨てて `false`（エラーにはしない）。
   pub fn deliver(&mut self, entry: BitacoraEntry) -> bool {
      if self.requested == Some(entry.id) {
         self.current = Some(entry);
         true
      } else {
         tracing::debug!("追い越された詳細応答を破棄: id={}", entry.id);
         false
      }
   }

   /// 詳細を取得して届ける。表示が更新されたかどうかを返す。
   pub async fn open(
      &mut self,
      api: &dyn BitacoraApi,
      id: BitacoraId,
   ) -> Result<bool, ConsoleError> {
      self.request(id);
      let entry = api.detail(id).await?;
      Ok(self.deliver(entry))
   }
}
