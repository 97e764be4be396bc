//! # CliniFlow 管理コンソール
//!
//! クリニック SaaS の管理クライアント。バックエンドの REST API から
//! JSON を取得してターミナルに描画し、フォームデータを POST で返す。
//!
//! ## 役割
//!
//! - **監査ログビューア**: カーソルページネーション + 重複排除マージ
//! - **音声コマンド**: トランスクリプトをリモート解釈に送り、
//!   ダウンロードかナビゲーションを実行する
//! - **管理系**: ユーザー・ロール・患者・BI ダッシュボード・バックアップ
//!
//! ## 環境変数
//!
//! 設定は `.env` ファイルで行う（CLI フラグで上書き可能）。
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CLINIFLOW_API_URL` | **Yes** | バックエンドのオリジン |
//! | `CLINIFLOW_API_ROOT` | No | API ルートプレフィックス（デフォルト `/api`） |
//! | `CLINIFLOW_TOKEN` | No | 認証トークン（無ければ未認証） |
//! | `CLINIFLOW_DOWNLOAD_DIR` | No | ダウンロード保存先（デフォルト `./descargas`） |
//! | `CLINIFLOW_TIMEOUT_SECS` | No | リクエストタイムアウト（デフォルト 10） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p cliniflow-console
//!
//! # 環境変数を直接指定
//! CLINIFLOW_API_URL=http://127.0.0.1:8000 cargo run -p cliniflow-console
//! ```

use std::sync::Arc;

use clap::Parser;
use cliniflow_console::{
   config::ConsoleConfig,
   repl::Console,
   route::ConsoleNavigator,
   typed_capture::TypedCaptureEngine,
   usecase::{AdminUsecase, ReportesUsecase, VoiceCommandUsecase},
};
use cliniflow_infra::{
   ApiClient,
   DiskSaver,
   MemoryTokenStore,
   TokenProvider,
   client::{BiApi, BitacoraApi, CuentasApi, PacientesApi, ReportesApi, SuscripcionesApi},
};
use cliniflow_shared::observability::TracingConfig;

/// CLI フラグ（環境変数を上書きする）
#[derive(Debug, Parser)]
#[command(name = "cliniflow-console", about = "Consola administrativa de CliniFlow", version)]
struct Cli {
   /// バックエンドのオリジン（`CLINIFLOW_API_URL` を上書き）
   #[arg(long)]
   api_url: Option<String>,

   /// API ルートプレフィックス（`CLINIFLOW_API_ROOT` を上書き）
   #[arg(long)]
   api_root: Option<String>,

   /// 認証トークン（`CLINIFLOW_TOKEN` を上書き）
   #[arg(long)]
   token: Option<String>,

   /// ダウンロード保存先（`CLINIFLOW_DOWNLOAD_DIR` を上書き）
   #[arg(long)]
   descargas: Option<String>,

   /// リクエストタイムアウト秒数（`CLINIFLOW_TIMEOUT_SECS` を上書き）
   #[arg(long)]
   timeout_secs: Option<u64>,
}

/// コンソールのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. 設定の解決（環境変数 + CLI フラグ）
/// 4. API クライアントとユースケースの組み立て
/// 5. コマンドループの開始
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   let tracing_config = TracingConfig::from_env("console");
   cliniflow_shared::observability::init_tracing(tracing_config);
   let _tracing_guard = tracing::info_span!("app", service = "console").entered();

   // 設定解決（CLI フラグが環境変数を上書きする）
   let cli = Cli::parse();
   let mut config = match ConsoleConfig::from_env() {
      Ok(config) => config,
      Err(_) if cli.api_url.is_some() => ConsoleConfig {
         base_url:     String::new(),
         api_root:     "/api".to_string(),
         token:        None,
         download_dir: "./descargas".to_string(),
         timeout:      std::time::Duration::from_secs(10),
      },
      Err(_) => anyhow::bail!(
         "CLINIFLOW_API_URL が設定されていません（--api-url でも指定できます）"
      ),
   };
   if let Some(api_url) = cli.api_url {
      config.base_url = api_url;
   }
   if let Some(api_root) = cli.api_root {
      config.api_root = api_root;
   }
   if let Some(token) = cli.token {
      config.token = Some(token);
   }
   if let Some(descargas) = cli.descargas {
      config.download_dir = descargas;
   }
   if let Some(timeout_secs) = cli.timeout_secs {
      config.timeout = std::time::Duration::from_secs(timeout_secs);
   }

   tracing::info!("コンソールを起動します: {}", config.base_url);
   if config.token.is_none() {
      tracing::warn!("トークンが未設定のため、リクエストは未認証で送られます");
   }

   // 依存関係の初期化
   // 具象型で保持し、各ユースケース注入時に必要なトレイトオブジェクトへ coerce する
   let tokens: Arc<dyn TokenProvider> =
      Arc::new(MemoryTokenStore::new(config.token.clone()));
   let api = Arc::new(ApiClient::new(
      &config.base_url,
      &config.api_root,
      tokens,
      config.timeout,
   )?);

   let navigator = Arc::new(ConsoleNavigator::new());
   let saver = Arc::new(DiskSaver::new(&config.download_dir));
   let typed_engine = Arc::new(TypedCaptureEngine::new());

   let bitacora_api: Arc<dyn BitacoraApi> = api.clone();
   let cuentas_api: Arc<dyn CuentasApi> = api.clone();
   let pacientes_api: Arc<dyn PacientesApi> = api.clone();
   let suscripciones_api: Arc<dyn SuscripcionesApi> = api.clone();
   let bi_api: Arc<dyn BiApi> = api.clone();
   let reportes_api: Arc<dyn ReportesApi> = api;

   let admin = AdminUsecase::new(
      cuentas_api,
      pacientes_api,
      suscripciones_api,
      navigator.clone(),
   );
   let reportes = ReportesUsecase::new(bi_api, reportes_api.clone(), saver.clone());
   let voice = VoiceCommandUsecase::new(
      typed_engine.clone(),
      reportes_api,
      saver,
      navigator.clone(),
   );

   let mut console = Console::new(
      bitacora_api,
      admin,
      reportes,
      voice,
      typed_engine,
      navigator,
   );
   console.run_loop().await?;

   Ok(())
}
