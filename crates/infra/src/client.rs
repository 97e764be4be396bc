//! # リソース別 API クライアント
//!
//! クリニック SaaS バックエンドとの通信を担当する。
//! すべてのクライアントは [`crate::ApiClient`] の構成（ベース URL /
//! API ルート / トークン / タイムアウト）を共有する。
//!
//! ## エンドポイント
//!
//! - `GET /cuentas/bitacoras/` - 監査ログ一覧（カーソルページネーション）
//! - `GET /cuentas/bitacoras/{id}/` - 監査ログ詳細
//! - `GET /cuentas/roles/` / `GET /cuentas/grupos/` - ロール・グループ一覧
//! - `POST /cuentas/usuarios/` - ユーザー作成
//! - `GET /diagnosticos/pacientes/` - 患者一覧
//! - `GET /diagnosticos/pacientes/{id}/historia/` - 臨床歴
//! - `GET /bi/analytics/dashboard/` - BI ダッシュボード
//! - `POST /bi/etl/run/` - データマート更新
//! - `POST /reportes/comando_voz/` - 音声コマンド解釈
//! - `GET /reportes/backup/json-zip` - バックアップ ZIP
//! - `POST /citas_pagos/citas/{id}/generar-reporte-ia/` - AI レポート生成
//! - `GET /suscripciones/planes/` - 公開プラン一覧

pub mod bi_client;
pub mod bitacora_client;
pub mod cuentas_client;
pub mod pacientes_client;
pub mod reportes_client;
pub(crate) mod response;
pub mod suscripciones_client;
pub mod types;

pub use bi_client::{BiApi, BiFilters};
pub use bitacora_client::BitacoraApi;
pub use cuentas_client::CuentasApi;
pub use pacientes_client::PacientesApi;
pub use reportes_client::ReportesApi;
pub use suscripciones_client::SuscripcionesApi;
pub use types::{GrupoDto, NuevoUsuario, PacienteDto, PlanDto, RolDto};
