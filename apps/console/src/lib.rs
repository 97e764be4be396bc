//! # CliniFlow 管理コンソールライブラリ
//!
//! クリニック SaaS 管理クライアントのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `config`: 環境変数からの設定読み込み
//! - `error`: コンソール境界のエラー型（ユーザー向けテキストへの変換点）
//! - `render`: 一覧・詳細のテキスト描画
//! - `repl`: コマンド文法のパースと実行ループ
//! - `route`: 現在ルートを保持するコンソール版ナビゲータ
//! - `typed_capture`: キー入力をキャプチャイベント列に変換するエンジン
//! - `usecase`: ビュー状態を所有するユースケース層

pub mod config;
pub mod error;
pub mod render;
pub mod repl;
pub mod route;
pub mod typed_capture;
pub mod usecase;
