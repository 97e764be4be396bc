//! 購読プラン（suscripciones）クライアント

use async_trait::async_trait;

use cliniflow_shared::PageResponse;

use crate::{api_client::ApiClient, client::types::PlanDto, error::FetchError};

/// 購読プランクライアントトレイト
#[async_trait]
pub trait SuscripcionesApi: Send + Sync {
   /// 公開プラン一覧を取得する
   ///
   /// `GET /suscripciones/planes/` を認証ヘッダーなしで呼び出す。
   /// 生の配列とページネーション形式の両方を受け付ける。
   async fn planes(&self) -> Result<Vec<PlanDto>, FetchError>;
}

#[async_trait]
impl SuscripcionesApi for ApiClient {
   async fn planes(&self) -> Result<Vec<PlanDto>, FetchError> {
      let value = self.get_public_value("/suscripciones/planes/").await?;
      Ok(PageResponse::from_value(value)?.results)
   }
}
