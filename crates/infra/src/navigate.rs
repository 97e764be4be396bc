//! # クライアント側ナビゲーションの継ぎ目
//!
//! 元システムではルーティングライブラリの `navigate()` に相当する。
//! ネットワーク呼び出しを伴わない純粋なクライアント側遷移であり、
//! コンソール版は現在ルートの差し替えとして実装する。

/// クライアント側ナビゲーションの能力トレイト
pub trait Navigator: Send + Sync {
   /// `href`（クエリ文字列込みのパス）へ遷移する
   fn navigate(&self, href: &str);
}
