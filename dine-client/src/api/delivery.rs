use super::{DineClient, ListOrPage};
use crate::error::ClientResult;
use crate::http::HttpClient;
use shared::models::{DeliveryDriver, DeliveryOrder, DeliveryStatus, DeliveryStatusUpdate};
use tracing::instrument;

/// Driver flag flipped by the toggle endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverToggle {
    Active,
    Available,
}

impl DriverToggle {
    fn action(&self) -> &'static str {
        match self {
            Self::Active => "toggle_active",
            Self::Available => "toggle_available",
        }
    }
}

impl<C: HttpClient> DineClient<C> {
    pub async fn delivery_drivers(&self) -> ClientResult<Vec<DeliveryDriver>> {
        let list: ListOrPage<DeliveryDriver> = self.http.get("delivery-drivers/").await?;
        Ok(list.into_vec())
    }

    pub async fn delivery_driver(&self, id: i64) -> ClientResult<DeliveryDriver> {
        self.http.get(&format!("delivery-drivers/{id}/")).await
    }

    #[instrument(skip(self))]
    pub async fn toggle_driver(&self, id: i64, toggle: DriverToggle) -> ClientResult<()> {
        let _: serde_json::Value = self
            .http
            .patch_empty(&format!("delivery-drivers/{id}/{}/", toggle.action()))
            .await?;
        Ok(())
    }

    /// Deliveries assigned to the logged-in driver
    pub async fn delivery_orders(&self) -> ClientResult<Vec<DeliveryOrder>> {
        let list: ListOrPage<DeliveryOrder> = self.http.get("delivery-orders/").await?;
        Ok(list.into_vec())
    }

    #[instrument(skip(self))]
    pub async fn update_delivery_status(
        &self,
        id: i64,
        status: DeliveryStatus,
    ) -> ClientResult<()> {
        let _: serde_json::Value = self
            .http
            .patch(
                &format!("delivery-orders/{id}/update_status/"),
                &DeliveryStatusUpdate { status },
            )
            .await?;
        Ok(())
    }

    pub async fn delete_delivery_order(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("delivery-orders/{id}/")).await
    }
}
