use super::{DineClient, PageQuery};
use crate::error::ClientResult;
use crate::http::HttpClient;
use shared::models::{
    Order, OrderAnalytics, OrderCreate, OrderCustomerUpdate, OrderItemsAppend,
    OrderPaymentUpdate, OrderStatusUpdate, OrderTypeChange,
};
use shared::response::Paginated;
use tracing::instrument;

impl<C: HttpClient> DineClient<C> {
    #[instrument(skip(self))]
    pub async fn orders(&self, page: u32) -> ClientResult<Paginated<Order>> {
        let query = PageQuery {
            page: page.max(1),
            page_size: None,
        };
        self.http.get_query("orders/", &query).await
    }

    pub async fn order(&self, id: i64) -> ClientResult<Order> {
        self.http.get(&format!("orders/{id}/")).await
    }

    #[instrument(skip_all, fields(items = order.items.len(), total = %order.total_amount))]
    pub async fn create_order(&self, order: &OrderCreate) -> ClientResult<Order> {
        self.http.post("orders/", order).await
    }

    /// Status change, with payment fields on the delivered transition
    #[instrument(skip(self, update), fields(status = %update.status))]
    pub async fn update_order_status(
        &self,
        id: i64,
        update: &OrderStatusUpdate,
    ) -> ClientResult<Order> {
        self.http.patch(&format!("orders/{id}/"), update).await
    }

    #[instrument(skip(self, append), fields(items = append.items.len()))]
    pub async fn append_order_items(
        &self,
        id: i64,
        append: &OrderItemsAppend,
    ) -> ClientResult<Order> {
        self.http.put(&format!("orders/{id}/"), append).await
    }

    pub async fn update_order_payment(
        &self,
        id: i64,
        payment: &OrderPaymentUpdate,
    ) -> ClientResult<Order> {
        self.http.put(&format!("orders/{id}/"), payment).await
    }

    #[instrument(skip(self, change), fields(order_type = ?change.order_type))]
    pub async fn change_order_type(
        &self,
        id: i64,
        change: &OrderTypeChange,
    ) -> ClientResult<Order> {
        self.http
            .put(&format!("orders/{id}/change-type/"), change)
            .await
    }

    /// Customer name and phone corrected from the sales report
    pub async fn update_order_customer(
        &self,
        id: i64,
        update: &OrderCustomerUpdate,
    ) -> ClientResult<Order> {
        update.validate()?;
        self.http.patch(&format!("orders/{id}/"), update).await
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("orders/{id}/")).await
    }

    pub async fn order_analytics(&self) -> ClientResult<OrderAnalytics> {
        self.http.get("orders/analytics/").await
    }
}
