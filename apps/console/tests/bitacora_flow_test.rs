//! 監査ログビューアの結合テスト
//!
//! 台本どおりに応答するモッククライアントで、ページャのマージ・
//! カーソル追跡・詳細ビューの追い越しガードを通しで検証する。

use cliniflow_console::usecase::{BitacoraBrowser, DetailViewer};
use cliniflow_domain::bitacora::{BitacoraEntry, BitacoraId};
use cliniflow_infra::{FetchError, client::BitacoraApi, mock::ScriptedBitacoraApi};
use cliniflow_shared::PageResponse;
use pretty_assertions::assert_eq;

fn entry(id: i64) -> BitacoraEntry {
   BitacoraEntry {
      id: BitacoraId::new(id),
      timestamp: None,
      usuario: format!("usuario-{id}"),
      accion: "LOGIN".to_string(),
      objeto: String::new(),
      ip: None,
      extra: None,
   }
}

fn page(ids: &[i64], next: Option<&str>) -> PageResponse<BitacoraEntry> {
   PageResponse {
      results:  ids.iter().copied().map(entry).collect(),
      next:     next.map(String::from),
      previous: None,
   }
}

fn ids(browser: &BitacoraBrowser) -> Vec<i64> {
   browser.entries().iter().map(|e| e.id.value()).collect()
}

#[tokio::test]
async fn test_2ページの畳み込みで重複が消えhas_moreが落ちる() {
   let api = ScriptedBitacoraApi::new();
   api.push_page(Ok(page(&[1, 2], Some("/x?cursor=a"))));
   api.push_page(Ok(page(&[2, 3], None)));

   let mut browser = BitacoraBrowser::new();

   let first = browser.load_first(&api).await.unwrap();
   assert_eq!(first, 2);
   assert!(browser.has_more());

   let appended = browser.load_more(&api).await.unwrap();
   assert_eq!(appended, 1);

   assert_eq!(ids(&browser), vec![1, 2, 3]);
   assert!(!browser.has_more());
   // 次ページ取得に渡ったカーソルは前ページの next そのもの
   assert_eq!(api.cursors(), vec!["/x?cursor=a".to_string()]);
}

#[tokio::test]
async fn test_カーソルなしのload_moreはネットワークに出ない() {
   let api = ScriptedBitacoraApi::new();
   let mut browser = BitacoraBrowser::new();

   let result = browser.load_more(&api).await;

   assert!(result.is_err());
   assert_eq!(api.fetch_count(), 0);
}

#[tokio::test]
async fn test_取得失敗はサーバーのメッセージを伝える() {
   let api = ScriptedBitacoraApi::new();
   api.push_page(Err(FetchError::Status {
      status:  403,
      message: "No autorizado".to_string(),
   }));

   let mut browser = BitacoraBrowser::new();
   let error = browser.load_first(&api).await.unwrap_err();

   assert!(error.to_string().contains("No autorizado"));
   // 失敗後はガードが解除されており再試行できる
   api.push_page(Ok(page(&[1], None)));
   assert!(browser.load_first(&api).await.is_ok());
}

#[tokio::test]
async fn test_フィルタ変更のリセット再取得は置き換えになる() {
   let api = ScriptedBitacoraApi::new();
   api.push_page(Ok(page(&[1, 2], Some("/x?cursor=a"))));
   api.push_page(Ok(page(&[9], None)));

   let mut browser = BitacoraBrowser::new();
   browser.load_first(&api).await.unwrap();

   // 2 回目の load_first は蓄積を置き換える
   browser.load_first(&api).await.unwrap();

   assert_eq!(ids(&browser), vec![9]);
}

#[tokio::test]
async fn test_詳細の追い越された応答は新しい表示を壊さない() {
   let api = ScriptedBitacoraApi::new();
   let mut con_extra = entry(5);
   con_extra.extra = Some(serde_json::json!({"campo": "viejo"}));
   api.insert_detail(con_extra);
   api.insert_detail(entry(7));

   let mut viewer = DetailViewer::new();

   // id=5 を要求した直後に id=7 を要求し、id=7 の応答が先に届く
   viewer.request(BitacoraId::new(5));
   let updated = viewer.open(&api, BitacoraId::new(7)).await.unwrap();
   assert!(updated);

   // 遅れて届いた id=5 の応答は黙って捨てられる
   let stale = api.detail(BitacoraId::new(5)).await.unwrap();
   assert!(!viewer.deliver(stale));

   assert_eq!(viewer.current().unwrap().id, BitacoraId::new(7));
}

#[tokio::test]
async fn test_詳細の404はfetch_errorとして表面化する() {
   let api = ScriptedBitacoraApi::new();
   let mut viewer = DetailViewer::new();

   let error = viewer.open(&api, BitacoraId::new(99)).await.unwrap_err();

   assert!(error.to_string().contains("404"));
}
