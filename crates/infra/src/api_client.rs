//! # API クライアント
//!
//! ベース URL・API ルートプレフィックス・認証トークン・タイムアウトを
//! 一箇所にまとめた reqwest ラッパー。型付きクライアント（[`crate::client`]）は
//! すべてこの構成を共有する。
//!
//! ## 認証
//!
//! トークンがあれば `Authorization: Token <token>` ヘッダーを付与する
//! （DRF の TokenAuthentication 形式）。無ければ未認証のまま送り、
//! 拒否の判断はサーバーに委ねる。
//!
//! ## タイムアウト
//!
//! トランスポート任せにせず明示的なリクエストタイムアウトを設定する。
//! 超過は [`FetchError::Timeout`] として表面化する。

use std::{sync::Arc, time::Duration};

use serde::{Serialize, de::DeserializeOwned};

use crate::{
   client::response::{handle_bytes, handle_json, handle_value},
   error::FetchError,
   token::TokenProvider,
};

/// バックエンド API へのアクセス構成
#[derive(Clone)]
pub struct ApiClient {
   base_url: String,
   api_root: String,
   http:     reqwest::Client,
   tokens:   Arc<dyn TokenProvider>,
}

impl ApiClient {
   /// 新しい API クライアントを作成する
   ///
   /// # 引数
   ///
   /// - `base_url`: バックエンドのオリジン（例: `http://127.0.0.1:8000`）
   /// - `api_root`: クライアントが注入するプレフィックス（例: `/api`、空可）
   /// - `tokens`: 認証トークンの提供元
   /// - `timeout`: リクエスト全体のタイムアウト
   pub fn new(
      base_url: &str,
      api_root: &str,
      tokens: Arc<dyn TokenProvider>,
      timeout: Duration,
   ) -> Result<Self, FetchError> {
      let http = reqwest::Client::builder().timeout(timeout).build()?;

      let api_root = api_root.trim_end_matches('/');
      let api_root = if api_root.is_empty() || api_root.starts_with('/') {
         api_root.to_string()
      } else {
         format!("/{api_root}")
      };

      Ok(Self {
         base_url: base_url.trim_end_matches('/').to_string(),
         api_root,
         http,
         tokens,
      })
   }

   /// クライアントが注入する API ルートプレフィックス
   ///
   /// カーソル URI の正規化（[`cliniflow_domain::cursor::normalize_next_uri`]）
   /// に渡す。
   pub fn api_root(&self) -> &str {
      &self.api_root
   }

   /// API ルート相対パスを完全な URL にする
   fn url_for(&self, path: &str) -> String {
      format!("{}{}{}", self.base_url, self.api_root, path)
   }

   /// リクエストビルダーを作る（`authenticated` ならトークンを付与）
   fn request(
      &self,
      method: reqwest::Method,
      path: &str,
      authenticated: bool,
   ) -> reqwest::RequestBuilder {
      let mut builder = self.http.request(method, self.url_for(path));
      if authenticated && let Some(token) = self.tokens.token() {
         builder = builder.header("Authorization", format!("Token {token}"));
      }
      builder
   }

   /// 認証付き GET、ゆるい JSON をそのまま返す
   pub async fn get_value(&self, path: &str) -> Result<serde_json::Value, FetchError> {
      let response = self
         .request(reqwest::Method::GET, path, true)
         .send()
         .await?;
      handle_value(response).await
   }

   /// 認証なし GET（公開エンドポイント用）
   pub async fn get_public_value(&self, path: &str) -> Result<serde_json::Value, FetchError> {
      let response = self
         .request(reqwest::Method::GET, path, false)
         .send()
         .await?;
      handle_value(response).await
   }

   /// 認証付き GET、型付きデシリアライズ
   pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
      let response = self
         .request(reqwest::Method::GET, path, true)
         .send()
         .await?;
      handle_json(response).await
   }

   /// 認証付き POST、型付きデシリアライズ
   pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
      &self,
      path: &str,
      body: &B,
   ) -> Result<T, FetchError> {
      let response = self
         .request(reqwest::Method::POST, path, true)
         .json(body)
         .send()
         .await?;
      handle_json(response).await
   }

   /// 認証付きバイナリ GET（レポート PDF、バックアップ ZIP）
   pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, FetchError> {
      let response = self
         .request(reqwest::Method::GET, path, true)
         .send()
         .await?;
      handle_bytes(response).await
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;
   use crate::token::StaticToken;

   fn client(token: Option<&str>) -> ApiClient {
      ApiClient::new(
         "http://127.0.0.1:8000/",
         "/api",
         Arc::new(StaticToken::new(token.map(String::from))),
         Duration::from_secs(10),
      )
      .unwrap()
   }

   #[test]
   fn test_urlはベースとapiルートとパスを連結する() {
      let request = client(None)
         .request(reqwest::Method::GET, "/cuentas/bitacoras/", true)
         .build()
         .unwrap();

      assert_eq!(
         request.url().as_str(),
         "http://127.0.0.1:8000/api/cuentas/bitacoras/"
      );
   }

   #[test]
   fn test_トークンがあればtokenヘッダーが付く() {
      let request = client(Some("abc123"))
         .request(reqwest::Method::GET, "/cuentas/bitacoras/", true)
         .build()
         .unwrap();

      assert_eq!(
         request.headers().get("Authorization").unwrap(),
         "Token abc123"
      );
   }

   #[test]
   fn test_トークンがなければ未認証のまま送る() {
      let request = client(None)
         .request(reqwest::Method::GET, "/cuentas/bitacoras/", true)
         .build()
         .unwrap();

      assert!(request.headers().get("Authorization").is_none());
   }

   #[test]
   fn test_公開エンドポイントはトークンがあってもヘッダーを付けない() {
      let request = client(Some("abc123"))
         .request(reqwest::Method::GET, "/suscripciones/planes/", false)
         .build()
         .unwrap();

      assert!(request.headers().get("Authorization").is_none());
   }

   #[test]
   fn test_apiルートの表記ゆれを正規化する() {
      let tokens: Arc<dyn TokenProvider> = Arc::new(StaticToken::new(None));

      let client =
         ApiClient::new("http://host", "api/", tokens.clone(), Duration::from_secs(1)).unwrap();
      assert_eq!(client.api_root(), "/api");

      let client = ApiClient::new("http://host", "", tokens, Duration::from_secs(1)).unwrap();
      assert_eq!(client.api_root(), "");
   }
}
