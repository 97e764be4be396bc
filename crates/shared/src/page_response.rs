//! # ページネーション付きレスポンス
//!
//! カーソルベースのページネーション（DRF CursorPagination 互換）に
//! 対応した API レスポンス型。
//!
//! ## JSON 形式
//!
//! ```json
//! {
//!   "results": [...],
//!   "next": "http://host/api/cuentas/bitacoras/?cursor=...",
//!   "previous": null
//! }
//! ```
//!
//! `next` が `null` の場合は最後のページを意味する。
//!
//! ## ゆるい形式の正規化
//!
//! バックエンドのラッパーはエンドポイントによって生の配列や
//! `{ "data": ... }` 包みを返すことがある。コアロジックに届く前に
//! [`PageResponse::from_value`] で必ず正規形に変換する。

use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// ページネーション付きレスポンス
///
/// `results` はページ内のレコード列、`next` / `previous` は
/// opaque なカーソル URI（絶対・相対どちらもあり得る）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
   pub results:  Vec<T>,
   pub next:     Option<String>,
   #[serde(default)]
   pub previous: Option<String>,
}

impl<T> PageResponse<T> {
   /// 単一ページだけの（続きのない）レスポンスを作る
   pub fn single(results: Vec<T>) -> Self {
      Self {
         results,
         next: None,
         previous: None,
      }
   }

   /// 続きのページが存在するか
   pub fn has_more(&self) -> bool {
      self.next.is_some()
   }
}

impl<T: DeserializeOwned> PageResponse<T> {
   /// ゆるい JSON 形式を正規形に変換する
   ///
   /// 受け付ける形式:
   ///
   /// 1. 生の配列 `[...]` → 続きのない単一ページ
   /// 2. `{ "data": ... }` 包み → 中身を再帰的に正規化
   /// 3. `{ "results": [...], "next": ... }` → そのままデシリアライズ
   pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
      match value {
         serde_json::Value::Array(_) => {
            let results: Vec<T> = serde_json::from_value(value)?;
            Ok(Self::single(results))
         }
         serde_json::Value::Object(mut map) if !map.contains_key("results") => {
            match map.remove("data") {
               Some(inner) => Self::from_value(inner),
               None => serde_json::from_value(serde_json::Value::Object(map)),
            }
         }
         other => serde_json::from_value(other),
      }
   }
}
