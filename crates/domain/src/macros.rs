/// i64 ベースの ID 型を定義する宣言型マクロ
///
/// バックエンドの数値 ID をラップする Newtype を一括生成する:
///
/// - `derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, Serialize, Deserialize, Display)`
/// - `new()`: 生の値から作成
/// - `value()`: 内部値の取得
/// - `FromStr`: コンソール入力のパース用
///
/// # 使用例
///
/// ```rust
/// use cliniflow_domain::bitacora::BitacoraId;
///
/// let id: BitacoraId = "7".parse().unwrap();
/// assert_eq!(id.value(), 7);
/// ```
macro_rules! define_i64_id {
   (
      $(#[$meta:meta])*
      $vis:vis struct $Name:ident;
   ) => {
      $(#[$meta])*
      #[derive(
         Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
         serde::Serialize, serde::Deserialize,
         derive_more::Display,
      )]
      #[display("{_0}")]
      $vis struct $Name(i64);

      impl $Name {
         /// 生の値から ID を作成する
         pub fn new(value: i64) -> Self {
            Self(value)
         }

         /// 内部の値を取得する
         pub fn value(&self) -> i64 {
            self.0
         }
      }

      impl std::str::FromStr for $Name {
         type Err = $crate::DomainError;

         fn from_str(s: &str) -> Result<Self, Self::Err> {
            s.trim()
               .parse::<i64>()
               .map(Self)
               .map_err(|_| $crate::DomainError::Validation(format!(
                  "ID numérico inválido: {s}"
               )))
         }
      }
   };
}
