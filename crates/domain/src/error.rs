//! # ドメイン層エラー定義
//!
//! クライアント側ロジックの前提条件違反や、リソースの不在を表現するエラー型。
//!
//! ## エラーの種類
//!
//! | エラー種別 | 用途 |
//! |-----------|------|
//! | `Validation` | 前提条件違反（例: カーソルなしで次ページ要求） |
//! | `NotFound` | 指定 ID のレコードが存在しない |

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// ネットワーク到達前に検出できる誤用はすべてここに畳み込まれ、
/// コンソール層でユーザー向けテキストに変換される。
#[derive(Debug, Error)]
pub enum DomainError {
   /// 前提条件違反
   ///
   /// 呼び出し側のプログラミングエラーを含む。例:
   ///
   /// - `next` が `None` の状態で次ページを要求した
   /// - 入力値が空
   #[error("バリデーションエラー: {0}")]
   Validation(String),

   /// レコードが見つからない
   #[error("{entity_type} が見つかりません: {id}")]
   NotFound {
      /// エンティティの種類（"Bitacora", "Paciente" など）
      entity_type: &'static str,
      /// 検索に使用した識別子
      id:          String,
   },
}
