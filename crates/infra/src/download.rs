//! # バイナリペイロードのディスク保存
//!
//! ブラウザ版の「Blob → リンク生成 → click」に相当するクライアント側
//! 保存。保存先ディレクトリは設定で注入し、ファイル名はパス区切りを
//! 除去してから使う。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};

/// 取得済みバイナリをクライアント側に保存する能力トレイト
#[async_trait]
pub trait ArchiveSaver: Send + Sync {
   /// `file_name` で保存し、書き込んだパスを返す
   async fn save(&self, file_name: &str, payload: &[u8]) -> Result<PathBuf, std::io::Error>;
}

/// ダウンロードディレクトリへの保存
pub struct DiskSaver {
   dir: PathBuf,
}

impl DiskSaver {
   pub fn new(dir: impl Into<PathBuf>) -> Self {
      Self { dir: dir.into() }
   }

   pub fn dir(&self) -> &Path {
      &self.dir
   }
}

#[async_trait]
impl ArchiveSaver for DiskSaver {
   async fn save(&self, file_name: &str, payload: &[u8]) -> Result<PathBuf, std::io::Error> {
      tokio::fs::create_dir_all(&self.dir).await?;
      let path = self.dir.join(sanitize_file_name(file_name));
      tokio::fs::write(&path, payload).await?;
      tracing::info!("ファイルを保存しました: {}", path.display());
      Ok(path)
   }
}

/// サーバー提供のファイル名からパス区切りと先頭ドットを除去する
///
/// 除去後に何も残らなければ `descarga.bin` にフォールバックする。
pub fn sanitize_file_name(name: &str) -> String {
   let cleaned: String = name
      .chars()
      .filter(|c| !matches!(c, '/' | '\\' | '\0'))
      .collect();
   let cleaned = cleaned.trim_start_matches('.').trim();

   if cleaned.is_empty() {
      "descarga.bin".to_string()
   } else {
      cleaned.to_string()
   }
}

/// バックアップ ZIP のファイル名を生成する
///
/// 形式: `backup_{YYYY-MM-DD}_{HH-mm}.zip`。タイムスタンプは
/// America/La_Paz（常に UTC-4、DST なし）で描画する。
pub fn backup_file_name(now: DateTime<Utc>) -> String {
   let la_paz = FixedOffset::west_opt(4 * 3600).expect("UTC-4 は常に有効なオフセット");
   format!("backup_{}.zip", now.with_timezone(&la_paz).format("%Y-%m-%d_%H-%M"))
}
