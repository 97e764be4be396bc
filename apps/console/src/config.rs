//! # コンソール設定
//!
//! 環境変数からコンソールの設定を読み込む。CLI フラグは環境変数を
//! 上書きする（`main` 側で適用）。

use std::{env, time::Duration};

/// コンソールの設定
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
   /// バックエンドのオリジン（例: `http://127.0.0.1:8000`）
   pub base_url: String,
   /// クライアントが注入する API ルートプレフィックス
   pub api_root: String,
   /// 認証トークン（無ければ未認証で送る）
   pub token: Option<String>,
   /// ダウンロード保存先ディレクトリ
   pub download_dir: String,
   /// リクエストタイムアウト
   pub timeout: Duration,
}

/// タイムアウトのデフォルト（秒）
const DEFAULT_TIMEOUT_SECS: u64 = 10;

impl ConsoleConfig {
   /// 環境変数から設定を読み込む
   ///
   /// | 変数名 | 必須 | デフォルト |
   /// |--------|------|-----------|
   /// | `CLINIFLOW_API_URL` | **Yes** | - |
   /// | `CLINIFLOW_API_ROOT` | No | `/api` |
   /// | `CLINIFLOW_TOKEN` | No | なし（未認証） |
   /// | `CLINIFLOW_DOWNLOAD_DIR` | No | `./descargas` |
   /// | `CLINIFLOW_TIMEOUT_SECS` | No | `10` |
   pub fn from_env() -> Result<Self, env::VarError> {
      let timeout_secs = env::var("CLINIFLOW_TIMEOUT_SECS")
         .ok()
         .and_then(|v| v.parse().ok())
         .unwrap_or(DEFAULT_TIMEOUT_SECS);

      Ok(Self {
         base_url: env::var("CLINIFLOW_API_URL")?,
         api_root: env::var("CLINIFLOW_API_ROOT").unwrap_or_else(|_| "/api".to_string()),
         token: env::var("CLINIFLOW_TOKEN").ok().filter(|t| !t.is_empty()),
         download_dir: env::var("CLINIFLOW_DOWNLOAD_DIR")
            .unwrap_or_else(|_| "./descargas".to_string()),
         timeout: Duration::from_secs(timeout_secs),
      })
   }
}

#[cfg(test)]
mod tests {
   // テスト間で環境変数の競合を避けるため、
   // パース部分だけを関数に切り出して検証する

   use std::time::Duration;

   #[test]
   fn test_タイムアウトは秒数の文字列からパースされる() {
      assert_eq!(parse_timeout(Some("30")), Duration::from_secs(30));
   }

   #[test]
   fn test_タイムアウト未設定はデフォルト10秒() {
      assert_eq!(parse_timeout(None), Duration::from_secs(10));
      assert_eq!(parse_timeout(Some("abc")), Duration::from_secs(10));
   }

   #[test]
   fn test_空のトークンは未認証として扱う() {
      assert_eq!(parse_token(Some("")), None);
      assert_eq!(parse_token(Some("tok")), Some("tok".to_string()));
      assert_eq!(parse_token(None), None);
   }

   /// 環境変数の値からタイムアウトをパースする（テスト用）
   fn parse_timeout(value: Option<&str>) -> Duration {
      Duration::from_secs(
         value
            .and_then(|v| v.parse().ok())
            .unwrap_or(super::DEFAULT_TIMEOUT_SECS),
      )
   }

   /// Option<&str> からトークンをパースする（テスト用）
   fn parse_token(value: Option<&str>) -> Option<String> {
      value.map(String::from).filter(|t| !t.is_empty())
   }
}
