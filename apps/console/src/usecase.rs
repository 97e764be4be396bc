//! # ユースケース層
//!
//! ブラウザ版で各ページコンポーネントが持っていたビュー状態
//! （ページャの in-flight フラグ、詳細ビューの最新要求 ID、音声
//! セッション）をここで所有する。ネットワークはすべてトレイト
//! 越しに注入される。

pub mod admin;
pub mod bitacora;
pub mod reportes;
pub mod voice;

pub use admin::AdminUsecase;
pub use bitacora::{BitacoraBrowser, DetailViewer};
pub use reportes::ReportesUsecase;
pub use voice::VoiceCommandUsecase;
