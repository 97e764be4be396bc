//! レポート（reportes）クライアント
//!
//! 音声コマンドの解釈、レポート PDF・バックアップ ZIP のバイナリ取得、
//! AI レポート生成を担当する。

use async_trait::async_trait;

use cliniflow_domain::voice::VoiceAction;

use crate::{
   api_client::ApiClient,
   client::types::{InterpreterReplyDto, ReporteIaDto},
   error::FetchError,
};

/// レポートクライアントトレイト
#[async_trait]
pub trait ReportesApi: Send + Sync {
   /// トランスクリプトをリモート解釈に送る
   ///
   /// `POST /reportes/comando_voz/` を呼び出す。トランスポート障害も
   /// ドメインレベルの `{error}` も、最終的には同じ経路でユーザー向け
   /// テキストになる（区別はメッセージ内容のみ）。
   async fn interpret(&self, transcript: &str) -> Result<VoiceAction, FetchError>;

   /// 認証付きバイナリ取得（レポート PDF）
   ///
   /// `href` はクエリ文字列込みの API ルート相対パス。
   async fn descargar(&self, href: &str) -> Result<Vec<u8>, FetchError>;

   /// システムバックアップ ZIP を取得する
   ///
   /// `GET /reportes/backup/json-zip` を呼び出す。
   async fn backup(&self) -> Result<Vec<u8>, FetchError>;

   /// 曖昧なメモから AI レポート本文を生成する
   ///
   /// `POST /citas_pagos/citas/{id}/generar-reporte-ia/` を呼び出す。
   async fn generar_reporte_ia(
      &self,
      cita_id: i64,
      notas_vagas: &str,
   ) -> Result<String, FetchError>;
}

#[async_trait]
impl ReportesApi for ApiClient {
   async fn interpret(&self, transcript: &str) -> Result<VoiceAction, FetchError> {
      let reply: InterpreterReplyDto = self
         .post_json(
            "/reportes/comando_voz/",
            &serde_json::json!({ "texto_comando": transcript }),
         )
         .await?;
      Ok(reply.into())
   }

   async fn descargar(&self, href: &str) -> Result<Vec<u8>, FetchError> {
      self.get_bytes(href).await
   }

   async fn backup(&self) -> Result<Vec<u8>, FetchError> {
      self.get_bytes("/reportes/backup/json-zip").await
   }

   async fn generar_reporte_ia(
      &self,
      cita_id: i64,
      notas_vagas: &str,
   ) -> Result<String, FetchError> {
      let reply: ReporteIaDto = self
         .post_json(
            &format!("/citas_pagos/citas/{cita_id}/generar-reporte-ia/"),
            &serde_json::json!({ "notas_vagas": notas_vagas }),
         )
         .await?;
      Ok(reply.reporte_generado)
   }
}
