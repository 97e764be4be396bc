//! BI ダッシュボード（analytics）クライアント

use async_trait::async_trait;

use crate::{api_client::ApiClient, error::FetchError};

/// BI ダッシュボードのフィルタ
///
/// 元画面は 4 つのフィルタを空でもすべてクエリに載せるため、
/// 同じ順序・同じキーで直列化する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BiFilters {
   pub start_date:   String,
   pub end_date:     String,
   pub medico:       String,
   pub especialidad: String,
}

impl BiFilters {
   /// クエリ文字列に直列化する（キーは常に 4 つとも含む）
   pub fn to_query(&self) -> String {
      format!(
         "start_date={}&end_date={}&medico={}&especialidad={}",
         urlencoding::encode(&self.start_date),
         urlencoding::encode(&self.end_date),
         urlencoding::encode(&self.medico),
         urlencoding::encode(&self.especialidad),
      )
   }
}

/// BI 分析クライアントトレイト
#[async_trait]
pub trait BiApi: Send + Sync {
   /// ダッシュボードの分析ペイロードを取得する
   ///
   /// `GET /bi/analytics/dashboard/?{filters}` を呼び出す。
   /// 分析計算はバックエンドの不透明なサービスであり、ペイロードの
   /// スキーマはクライアント側で規定しない。
   async fn dashboard(&self, filters: &BiFilters) -> Result<serde_json::Value, FetchError>;

   /// データマートの更新（ETL）を実行する
   ///
   /// `POST /bi/etl/run/` を呼び出す。完了後に `dashboard` を
   /// 再取得するのは呼び出し側の責務。
   async fn run_etl(&self) -> Result<(), FetchError>;
}

#[async_trait]
impl BiApi for ApiClient {
   async fn dashboard(&self, filters: &BiFilters) -> Result<serde_json::Value, FetchError> {
      self
         .get_value(&format!("/bi/analytics/dashboard/?{}", filters.to_query()))
         .await
   }

   async fn run_etl(&self) -> Result<(), FetchError> {
      let _ack: serde_json::Value = self
         .post_json("/bi/etl/run/", &serde_json::json!({}))
         .await?;
      Ok(())
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_フィルタは空でも4キーすべてをクエリに載せる() {
      let query = BiFilters::default().to_query();

      assert_eq!(query, "start_date=&end_date=&medico=&especialidad=");
   }

   #[test]
   fn test_フィルタの値はパーセントエンコードされる() {
      let filters = BiFilters {
         start_date:   "2024-01-01".to_string(),
         end_date:     "2024-06-30".to_string(),
         medico:       "Dra. Rojas".to_string(),
         especialidad: "Retina".to_string(),
      };

      assert_eq!(
         filters.to_query(),
         "start_date=2024-01-01&end_date=2024-06-30&medico=Dra.%20Rojas&especialidad=Retina"
      );
   }
}
