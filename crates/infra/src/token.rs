//! # 認証トークンの提供
//!
//! ブラウザ版がセッションストレージから読んでいたトークンを、
//! 注入可能な能力トレイトとして抽象化する。トークンが無い場合は
//! 未認証のままリクエストを送り、拒否するかどうかはサーバーが決める。

use std::sync::Mutex;

/// 認証トークンを提供するトレイト
pub trait TokenProvider: Send + Sync {
   fn token(&self) -> Option<String>;
}

/// 固定トークン（設定から読み込んだ値）
pub struct StaticToken(Option<String>);

impl StaticToken {
   pub fn new(token: Option<String>) -> Self {
      Self(token)
   }
}

impl TokenProvider for StaticToken {
   fn token(&self) -> Option<String> {
      self.0.clone()
   }
}

/// 実行中に差し替え可能なトークンストア（セッションストレージの代替）
#[derive(Default)]
pub struct MemoryTokenStore {
   token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
   pub fn new(token: Option<String>) -> Self {
      Self {
         token: Mutex::new(token),
      }
   }

   /// ログイン後などにトークンを保存する
   pub fn set(&self, token: impl Into<String>) {
      *self.token.lock().unwrap() = Some(token.into());
   }

   /// ログアウト時にトークンを破棄する
   pub fn clear(&self) {
      *self.token.lock().unwrap() = None;
   }
}

impl TokenProvider for MemoryTokenStore {
   fn token(&self) -> Option<String> {
      self.token.lock().unwrap().clone()
   }
}
