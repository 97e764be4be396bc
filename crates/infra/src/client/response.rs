//! レスポンスの共通ハンドリング

use serde::de::DeserializeOwned;

use crate::error::FetchError;
use cliniflow_shared::extract_error_message;

/// ステータスを検査し、非 2xx を [`FetchError::Status`] に変換する
///
/// エラーメッセージはボディの `detail` / `error` / `message` キーから
/// 抽出し、無ければ生ボディ、それも無ければステータスコードになる。
pub(crate) async fn check_status(
   response: reqwest::Response,
) -> Result<reqwest::Response, FetchError> {
   let status = response.status();
   if status.is_success() {
      return Ok(response);
   }

   let body = response.text().await.unwrap_or_default();
   Err(FetchError::Status {
      status:  status.as_u16(),
      message: extract_error_message(status.as_u16(), &body),
   })
}

/// 成功レスポンスを型付きでデシリアライズする
pub(crate) async fn handle_json<T: DeserializeOwned>(
   response: reqwest::Response,
) -> Result<T, FetchError> {
   let response = check_status(response).await?;
   Ok(response.json::<T>().await?)
}

/// 成功レスポンスをゆるい JSON のまま返す
pub(crate) async fn handle_value(
   response: reqwest::Response,
) -> Result<serde_json::Value, FetchError> {
   handle_json(response).await
}

/// 成功レスポンスのバイナリボディを返す
pub(crate) async fn handle_bytes(response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
   let response = check_status(response).await?;
   Ok(response.bytes().await?.to_vec())
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use serde::Deserialize;

   use super::*;

   #[derive(Debug, Deserialize, PartialEq)]
   struct TestData {
      value: String,
   }

   /// テスト用の HTTP レスポンスを構築する
   fn make_response(status: u16, body: &str) -> reqwest::Response {
      let http_resp = http::Response::builder()
         .status(status)
         .header("content-type", "application/json")
         .body(body.to_string())
         .unwrap();
      reqwest::Response::from(http_resp)
   }

   #[tokio::test]
   async fn test_成功レスポンスをデシリアライズする() {
      let response = make_response(200, r#"{"value": "hola"}"#);

      let result: Result<TestData, _> = handle_json(response).await;

      assert_eq!(
         result.unwrap(),
         TestData {
            value: "hola".to_string(),
         }
      );
   }

   #[tokio::test]
   async fn test_エラーボディのdetailがメッセージとして抽出される() {
      let response = make_response(401, r#"{"detail": "No autorizado"}"#);

      let result: Result<TestData, _> = handle_json(response).await;

      match result {
         Err(FetchError::Status { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "No autorizado");
         }
         other => panic!("Status を期待したが {other:?} を受け取った"),
      }
   }

   #[tokio::test]
   async fn test_プレーンテキストのエラーボディはそのまま伝わる() {
      let response = make_response(500, "Backup falló");

      let result: Result<TestData, _> = handle_json(response).await;

      assert!(matches!(
         result,
         Err(FetchError::Status { status: 500, message }) if message == "Backup falló"
      ));
   }

   #[tokio::test]
   async fn test_空のエラーボディはステータスコードにフォールバックする() {
      let response = make_response(503, "");

      let result: Result<TestData, _> = handle_json(response).await;

      assert!(matches!(
         result,
         Err(FetchError::Status { status: 503, message }) if message == "HTTP 503"
      ));
   }

   #[tokio::test]
   async fn test_成功だが不正なjsonはdecodeエラーになる() {
      let response = make_response(200, "no es json");

      let result: Result<TestData, _> = handle_json(response).await;

      assert!(matches!(result, Err(FetchError::Decode(_))));
   }

   #[tokio::test]
   async fn test_バイナリボディはそのまま返る() {
      let response = make_response(200, "%PDF-1.7 contenido");

      let bytes = handle_bytes(response).await.unwrap();

      assert_eq!(bytes, b"%PDF-1.7 contenido");
   }

   #[tokio::test]
   async fn test_バイナリ取得でも非2xxはエラーになる() {
      let response = make_response(404, r#"{"detail": "Reporte no encontrado"}"#);

      let result = handle_bytes(response).await;

      assert!(matches!(
         result,
         Err(FetchError::Status { status: 404, message }) if message == "Reporte no encontrado"
      ));
   }
}
