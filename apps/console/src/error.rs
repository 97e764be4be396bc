//! # コンソール境界のエラー型
//!
//! すべてのエラーはここで束ねられ、`Display` 経由でユーザー向け
//! テキストになる。ビューを落とすことはない。

use thiserror::Error;

use cliniflow_domain::DomainError;
use cliniflow_infra::FetchError;

/// コンソール層のエラー
#[derive(Debug, Error)]
pub enum ConsoleError {
   /// ドメイン層の前提条件違反
   #[error("{0}")]
   Domain(#[from] DomainError),

   /// ネットワーク呼び出しの失敗
   #[error("{0}")]
   Fetch(#[from] FetchError),

   /// ファイル保存の失敗
   #[error("ファイルの保存に失敗しました: {0}")]
   Save(#[from] std::io::Error),

   /// ページ取得の同時実行ガード
   ///
   /// マージは可換ではないため、前の取得が完了するまで
   /// 「もっと読み込む」を受け付けない。
   #[error("Ya hay una carga en curso. Espera a que termine.")]
   LoadInFlight,
}
