//! # CliniFlow ドメイン層
//!
//! 管理コンソールの中核ロジックを定義する。
//!
//! ## 設計方針
//!
//! このクレートは純粋なロジックのみを持つ:
//!
//! - **エンティティ**: 一意の識別子を持つレコード（例: BitacoraEntry）
//! - **蓄積コレクション**: ページを畳み込んだ重複なしの並び
//! - **音声アクション ADT**: 解釈結果のいずれか一つのバリアント
//! - **ディスパッチャステートマシン**: `Idle → Listening → Processing`
//!
//! ## 依存関係の方向
//!
//! ```text
//! console → infra → domain
//! ```
//!
//! ドメイン層はネットワークにも音声エンジンにも一切依存しない。
//! イベント列を注入すればステートマシンはエンジンなしでテストできる。

#[macro_use]
mod macros;

pub mod bitacora;
pub mod cursor;
pub mod error;
pub mod voice;

pub use error::DomainError;
