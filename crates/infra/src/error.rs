//! # フェッチエラー型
//!
//! ネットワーク呼び出しの失敗分類。すべてコンポーネント境界で捕捉され、
//! ユーザー向けテキストに変換される（ビューを落とすことはない）。

use thiserror::Error;

/// API 呼び出しの失敗
#[derive(Debug, Clone, Error)]
pub enum FetchError {
   /// トランスポート層の失敗（到達不能、DNS、接続断）
   #[error("ネットワークエラー: {0}")]
   Transport(String),

   /// 明示的なリクエストタイムアウト
   #[error("リクエストがタイムアウトしました")]
   Timeout,

   /// 非 2xx レスポンス
   ///
   /// `message` はボディから抽出したサーバー提供のメッセージ。
   /// ボディが空ならステータスコードのフォールバック文字列になる。
   #[error("HTTP {status}: {message}")]
   Status { status: u16, message: String },

   /// レスポンスボディが期待した形式にデコードできない
   #[error("レスポンスの形式が不正です: {0}")]
   Decode(String),
}

impl From<reqwest::Error> for FetchError {
   fn from(err: reqwest::Error) -> Self {
      if err.is_timeout() {
         FetchError::Timeout
      } else if err.is_decode() {
         FetchError::Decode(err.to_string())
      } else {
         FetchError::Transport(err.to_string())
      }
   }
}

impl From<serde_json::Error> for FetchError {
   fn from(err: serde_json::Error) -> Self {
      FetchError::Decode(err.to_string())
   }
}
