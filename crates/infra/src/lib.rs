//! # CliniFlow インフラ層
//!
//! 外部世界との境界をトレイトの継ぎ目として提供する:
//!
//! - [`api_client`] - ベース URL / API ルート / トークン / タイムアウトを
//!   まとめた reqwest ラッパー
//! - [`client`] - リソース別の型付き API クライアント
//! - [`capture`] - 音声キャプチャエンジンの能力トレイト
//! - [`download`] - バイナリペイロードのディスク保存
//! - [`navigate`] - クライアント側ナビゲーションの能力トレイト
//! - [`token`] - 認証トークンの提供（セッションストレージの代替）
//!
//! テスト用のインメモリモックは `test-utils` feature で公開される:
//!
//! ```toml
//! [dev-dependencies]
//! cliniflow-infra = { workspace = true, features = ["test-utils"] }
//! ```

pub mod api_client;
pub mod capture;
pub mod client;
pub mod download;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod navigate;
pub mod token;

pub use api_client::ApiClient;
pub use capture::{CaptureEngine, CaptureSession};
pub use download::{ArchiveSaver, DiskSaver};
pub use error::FetchError;
pub use navigate::Navigator;
pub use token::{MemoryTokenStore, StaticToken, TokenProvider};
