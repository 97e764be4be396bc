//! # レポート・BI ユースケース
//!
//! BI ダッシュボードの取得と ETL 更新、バックアップ ZIP の取得と保存、
//! AI レポート生成。

use std::{path::PathBuf, sync::Arc};

use chrono::Utc;

use cliniflow_infra::{
   ArchiveSaver,
   client::{BiApi, BiFilters, ReportesApi},
   download::backup_file_name,
};

use crate::error::ConsoleError;

/// レポート・BI ユースケース
pub struct ReportesUsecase {
   bi:       Arc<dyn BiApi>,
   reportes: Arc<dyn ReportesApi>,
   saver:    Arc<dyn ArchiveSaver>,
}

impl ReportesUsecase {
   pub fn new(
      bi: Arc<dyn BiApi>,
      reportes: Arc<dyn ReportesApi>,
      saver: Arc<dyn ArchiveSaver>,
   ) -> Self {
      Self {
         bi,
         reportes,
         saver,
      }
   }

   /// ダッシュボードの分析ペイロードを取得する
   pub async fn dashboard(&self, filters: &BiFilters) -> Result<serde_json::Value, ConsoleError> {
      Ok(self.bi.dashboard(filters).await?)
   }

   /// データマートを更新してからダッシュボードを再取得する
   pub async fn refresh_datamart(
      &self,
      filters: &BiFilters,
   ) -> Result<serde_json::Value, ConsoleError> {
      self.bi.run_etl().await?;
      Ok(self.bi.dashboard(filters).await?)
   }

   /// バックアップ ZIP を取得し、La Paz 時刻のファイル名で保存する
   pub async fn backup(&self) -> Result<PathBuf, ConsoleError> {
      let payload = self.reportes.backup().await?;
      let file_name = backup_file_name(Utc::now());
      Ok(self.saver.save(&file_name, &payload).await?)
   }

   /// 曖昧なメモから AI レポート本文を生成する
   pub async fn reporte_ia(
      &self,
      cita_id: i64,
      notas_vagas: &str,
   ) -> Result<String, ConsoleError> {
      Ok(self.reportes.generar_reporte_ia(cita_id, notas_vagas).await?)
   }
}
