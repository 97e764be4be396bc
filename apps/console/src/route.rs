//! # コンソール版ナビゲータ
//!
//! ブラウザ版のルーター遷移に相当する。ネットワーク呼び出しは行わず、
//! 現在ルートを差し替えてログに残すだけ。

use std::sync::Mutex;

use cliniflow_infra::Navigator;

/// 現在ルートを保持するナビゲータ
pub struct ConsoleNavigator {
   route: Mutex<String>,
}

impl ConsoleNavigator {
   pub fn new() -> Self {
      Self {
         route: Mutex::new("/dashboard".to_string()),
      }
   }

   /// 現在のルート（クエリ文字列込み）
   pub fn current(&self) -> String {
      self.route.lock().unwrap().clone()
   }
}

impl Default for ConsoleNavigator {
   fn default() -> Self {
      Self::new()
   }
}

impl Navigator for ConsoleNavigator {
   fn navigate(&self, href: &str) {
      tracing::info!("ルートを変更します: {href}");
      *self.route.lock().unwrap() = href.to_string();
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_navigateで現在ルートが差し替わる() {
      let navigator = ConsoleNavigator::new();
      assert_eq!(navigator.current(), "/dashboard");

      navigator.navigate("/dashboard/reportes?fecha=hoy");

      assert_eq!(navigator.current(), "/dashboard/reportes?fecha=hoy");
   }
}
