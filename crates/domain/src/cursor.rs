//! # カーソル URI の正規化
//!
//! DRF CursorPagination の `next` は絶対 URL（`http://host/api/...`）の
//! ことも相対パスのこともある。API クライアントはベース URL と API ルート
//! プレフィックスを自分で注入するため、そのまま使うとホストやプレフィックスが
//! 二重になる。取得前に必ずここで正規形（クライアント相対パス）に変換する。

use url::Url;

/// `next` カーソル URI をクライアント相対パスに正規化する
///
/// 1. 絶対 URL ならスキームとホストを捨て、パス + クエリだけを残す
/// 2. パスが `api_root` プレフィックス（例: `/api`）で始まる場合、
///    先頭の一回だけを取り除く（クライアントが再注入するため）
///
/// `api_root` は末尾スラッシュなしの形（`/api`）を想定する。
/// 空文字列ならプレフィックス除去は行わない。
pub fn normalize_next_uri(next: &str, api_root: &str) -> String {
   let path_and_query = match Url::parse(next) {
      Ok(parsed) if parsed.has_host() => {
         let mut s = parsed.path().to_string();
         if let Some(query) = parsed.query() {
            s.push('?');
            s.push_str(query);
         }
         s
      }
      // 相対 URI はそのまま（`Url::parse` は RelativeUrlWithoutBase を返す）
      _ => next.to_string(),
   };

   if !api_root.is_empty()
      && let Some(rest) = path_and_query.strip_prefix(api_root)
      && rest.starts_with('/')
   {
      return rest.to_string();
   }

   path_and_query
}
