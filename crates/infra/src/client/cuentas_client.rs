//! アカウント管理（cuentas）クライアント

use async_trait::async_trait;

use cliniflow_shared::PageResponse;

use crate::{
   api_client::ApiClient,
   client::types::{GrupoDto, NuevoUsuario, RolDto},
   error::FetchError,
};

/// ユーザー・ロール管理クライアントトレイト
#[async_trait]
pub trait CuentasApi: Send + Sync {
   /// ロール一覧を取得する
   ///
   /// `GET /cuentas/roles/` を呼び出す。
   async fn roles(&self) -> Result<Vec<RolDto>, FetchError>;

   /// グループ一覧を取得する
   ///
   /// `GET /cuentas/grupos/` を呼び出す。
   async fn grupos(&self) -> Result<Vec<GrupoDto>, FetchError>;

   /// ユーザーを作成する
   ///
   /// `POST /cuentas/usuarios/` を呼び出す。成功後の画面遷移は
   /// 呼び出し側の責務。
   async fn create_usuario(&self, nuevo: &NuevoUsuario) -> Result<(), FetchError>;
}

#[async_trait]
impl CuentasApi for ApiClient {
   async fn roles(&self) -> Result<Vec<RolDto>, FetchError> {
      let value = self.get_value("/cuentas/roles/").await?;
      Ok(PageResponse::from_value(value)?.results)
   }

   async fn grupos(&self) -> Result<Vec<GrupoDto>, FetchError> {
      let value = self.get_value("/cuentas/grupos/").await?;
      Ok(PageResponse::from_value(value)?.results)
   }

   async fn create_usuario(&self, nuevo: &NuevoUsuario) -> Result<(), FetchError> {
      let _created: serde_json::Value = self.post_json("/cuentas/usuarios/", nuevo).await?;
      Ok(())
   }
}
