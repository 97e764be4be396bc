//! # 監査ログ（bitácora）
//!
//! クリニック SaaS の監査証跡ビューアのドメインモデル。
//!
//! ## 設計方針
//!
//! - **同一性は `id` のみで判定する**: ページをまたいで安定な数値 ID
//! - **蓄積コレクションは重複を持たない**: 連続ページの末尾が重なって
//!   届いても（バックエンドのドリフト）黙って重複排除する
//! - **初回ページは置き換え**: フィルタ変更後の「リセットして再取得」に
//!   対応するため、呼び出し側が `is_first` フラグで明示する

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::DomainError;

define_i64_id! {
   /// 監査ログエントリ ID
   pub struct BitacoraId;
}

/// 監査ログエントリ
///
/// 一覧 API は `extra` を省略し、詳細 API（`/cuentas/bitacoras/{id}/`）
/// のみが構造化ペイロードを含む。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitacoraEntry {
   pub id: BitacoraId,
   #[serde(default)]
   pub timestamp: Option<DateTime<Utc>>,
   #[serde(default)]
   pub usuario: String,
   #[serde(default)]
   pub accion: String,
   #[serde(default)]
   pub objeto: String,
   #[serde(default)]
   pub ip: Option<String>,
   /// 詳細表示でのみ存在する構造化ペイロード
   #[serde(default)]
   pub extra: Option<serde_json::Value>,
}

/// 蓄積コレクション
///
/// 連続して取得したページを畳み込んだ、先着順・重複なしの並び。
/// `next` は最後に畳み込んだページのカーソル URI を保持する。
#[derive(Debug, Clone, Default)]
pub struct BitacoraCollection {
   entries: Vec<BitacoraEntry>,
   next:    Option<String>,
}

impl BitacoraCollection {
   pub fn new() -> Self {
      Self::default()
   }

   /// これまでに畳み込んだエントリ（先着順）
   pub fn entries(&self) -> &[BitacoraEntry] {
      &self.entries
   }

   pub fn len(&self) -> usize {
      self.entries.len()
   }

   pub fn is_empty(&self) -> bool {
      self.entries.is_empty()
   }

   /// 続きのページが存在するか
   pub fn has_more(&self) -> bool {
      self.next.is_some()
   }

   /// 次ページのカーソル URI
   ///
   /// `next` が `None` の状態で呼ぶのは呼び出し側のプログラミングエラーで
   /// あり、ネットワーク呼び出しを行う前に拒否する。
   pub fn next_uri(&self) -> Result<&str, DomainError> {
      self
         .next
         .as_deref()
         .ok_or_else(|| DomainError::Validation("カーソルなしで次ページを要求しました".to_string()))
   }

   /// ページを畳み込む
   ///
   /// - `is_first == true`: コレクション全体を置き換える（リセットして
   ///   再取得のセマンティクス）
   /// - `is_first == false`: 既存に存在しない `id` のエントリだけを、
   ///   届いた順序を保って末尾に追加する
   pub fn apply_page(
      &mut self,
      results: Vec<BitacoraEntry>,
      next: Option<String>,
      is_first: bool,
   ) {
      if is_first {
         self.entries = results;
      } else {
         let seen: HashSet<BitacoraId> = self.entries.iter().map(|e| e.id).collect();
         self
            .entries
            .extend(results.into_iter().filter(|e| !seen.contains(&e.id)));
      }
      self.next = next;
   }
}
