//! 患者・臨床歴（diagnósticos）クライアント

use async_trait::async_trait;

use cliniflow_shared::PageResponse;

use crate::{api_client::ApiClient, client::types::PacienteDto, error::FetchError};

/// 患者記録クライアントトレイト
#[async_trait]
pub trait PacientesApi: Send + Sync {
   /// 患者一覧を取得する
   ///
   /// `GET /diagnosticos/pacientes/` を呼び出す。
   async fn pacientes(&self) -> Result<Vec<PacienteDto>, FetchError>;

   /// 患者の臨床歴を取得する
   ///
   /// `GET /diagnosticos/pacientes/{id}/historia/` を呼び出す。
   /// 臨床歴の構造はバックエンドの都合で変わるため、ゆるい JSON の
   /// まま返して表示層に委ねる。
   async fn historia(&self, paciente_id: i64) -> Result<serde_json::Value, FetchError>;
}

#[async_trait]
impl PacientesApi for ApiClient {
   async fn pacientes(&self) -> Result<Vec<PacienteDto>, FetchError> {
      let value = self.get_value("/diagnosticos/pacientes/").await?;
      Ok(PageResponse::from_value(value)?.results)
   }

   async fn historia(&self, paciente_id: i64) -> Result<serde_json::Value, FetchError> {
      self
         .get_value(&format!("/diagnosticos/pacientes/{paciente_id}/historia/"))
         .await
   }
}
