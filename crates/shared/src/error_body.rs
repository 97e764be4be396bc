//! # エラーボディからのメッセージ抽出
//!
//! バックエンドはエラー時に `{"detail": "..."}`（DRF 標準）、
//! `{"error": "..."}`、`{"message": "..."}` のいずれか、あるいは
//! プレーンテキストを返す。ユーザーに見せる一文を取り出す処理を
//! 一箇所に集約する。

/// エラーレスポンスのボディからユーザー向けメッセージを抽出する
///
/// 優先順位:
///
/// 1. JSON の `detail` / `error` / `message` キー（文字列値のみ）
/// 2. 空でない生ボディ（トリム済み）
/// 3. `HTTP {status}` のフォールバック
pub fn extract_error_message(status: u16, body: &str) -> String {
   if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
      for key in ["detail", "error", "message"] {
         if let Some(text) = value.get(key).and_then(|v| v.as_str())
            && !text.is_empty()
         {
            return text.to_string();
         }
      }
   }

   let trimmed = body.trim();
   if trimmed.is_empty() {
      format!("HTTP {status}")
   } else {
      trimmed.to_string()
   }
}
