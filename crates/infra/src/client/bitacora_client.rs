//! 監査ログ（bitácora）クライアント

use async_trait::async_trait;

use cliniflow_domain::{
   bitacora::{BitacoraEntry, BitacoraId},
   cursor::normalize_next_uri,
};
use cliniflow_shared::PageResponse;

use crate::{api_client::ApiClient, error::FetchError};

/// 監査ログクライアントトレイト
#[async_trait]
pub trait BitacoraApi: Send + Sync {
   /// 最初のページを取得する
   ///
   /// `GET /cuentas/bitacoras/` を呼び出す。
   async fn first_page(&self) -> Result<PageResponse<BitacoraEntry>, FetchError>;

   /// 次のページを取得する
   ///
   /// 前ページの `next` が非 null のときだけ呼ぶこと。`cursor_uri` は
   /// 絶対 URL でもよく、取得前にクライアント相対パスへ正規化される。
   async fn next_page(&self, cursor_uri: &str)
   -> Result<PageResponse<BitacoraEntry>, FetchError>;

   /// 詳細（`extra` を含む完全な表現）を取得する
   ///
   /// `GET /cuentas/bitacoras/{id}/` を呼び出す。
   async fn detail(&self, id: BitacoraId) -> Result<BitacoraEntry, FetchError>;
}

#[async_trait]
impl BitacoraApi for ApiClient {
   async fn first_page(&self) -> Result<PageResponse<BitacoraEntry>, FetchError> {
      let value = self.get_value("/cuentas/bitacoras/").await?;
      Ok(PageResponse::from_value(value)?)
   }

   async fn next_page(
      &self,
      cursor_uri: &str,
   ) -> Result<PageResponse<BitacoraEntry>, FetchError> {
      let path = normalize_next_uri(cursor_uri, self.api_root());
      let value = self.get_value(&path).await?;
      Ok(PageResponse::from_value(value)?)
   }

   async fn detail(&self, id: BitacoraId) -> Result<BitacoraEntry, FetchError> {
      self.get_json(&format!("/cuentas/bitacoras/{id}/")).await
   }
}
