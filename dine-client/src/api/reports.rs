use super::{DineClient, ListOrPage, RangeQuery};
use crate::error::ClientResult;
use crate::http::HttpClient;
use shared::models::{DashboardData, Mess, Order, TimeRange};
use tracing::instrument;

impl<C: HttpClient> DineClient<C> {
    pub async fn dashboard_data(&self, range: TimeRange) -> ClientResult<serde_json::Value> {
        self.http
            .get_query("orders/dashboard_data/", &RangeQuery { time_range: range.as_str() })
            .await
    }

    pub async fn sales_trends(&self, range: TimeRange) -> ClientResult<serde_json::Value> {
        self.http
            .get_query("orders/sales_trends/", &RangeQuery { time_range: range.as_str() })
            .await
    }

    /// Both dashboard payloads, fetched concurrently and merged
    #[instrument(skip(self))]
    pub async fn dashboard(&self, range: TimeRange) -> ClientResult<DashboardData> {
        let (dashboard, trends) =
            tokio::try_join!(self.dashboard_data(range), self.sales_trends(range))?;
        Ok(DashboardData::merge(dashboard, trends)?)
    }

    /// Orders in the window, one row per order
    #[instrument(skip(self))]
    pub async fn sales_report(&self, range: TimeRange) -> ClientResult<Vec<Order>> {
        let list: ListOrPage<Order> = self
            .http
            .get_query("orders/sales_report/", &RangeQuery { time_range: range.as_str() })
            .await?;
        Ok(list.into_vec())
    }

    #[instrument(skip(self))]
    pub async fn mess_report(&self, range: TimeRange) -> ClientResult<Vec<Mess>> {
        let list: ListOrPage<Mess> = self
            .http
            .get_query("messes/mess_report/", &RangeQuery { time_range: range.as_str() })
            .await?;
        Ok(list.into_vec())
    }
}
