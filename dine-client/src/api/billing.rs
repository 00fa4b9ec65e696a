use super::{DineClient, ListOrPage, PageQuery};
use crate::error::ClientResult;
use crate::http::HttpClient;
use rust_decimal::Decimal;
use shared::models::{Bill, BillCreate, Coupon, CouponCreate};
use shared::response::Paginated;
use tracing::instrument;

impl<C: HttpClient> DineClient<C> {
    pub async fn bills(&self, page: u32) -> ClientResult<Paginated<Bill>> {
        let query = PageQuery {
            page: page.max(1),
            page_size: None,
        };
        self.http.get_query("bills/", &query).await
    }

    /// Every bill, following `next` until the last page
    #[instrument(skip(self))]
    pub async fn all_bills(&self) -> ClientResult<Vec<Bill>> {
        let mut bills = Vec::new();
        let mut page = 1;
        loop {
            let chunk = self.bills(page).await?;
            let more = chunk.has_next();
            bills.extend(chunk.results);
            if !more {
                break;
            }
            page += 1;
        }
        Ok(bills)
    }

    #[instrument(skip(self))]
    pub async fn generate_bill(&self, order: i64, total_amount: Decimal) -> ClientResult<Bill> {
        self.http
            .post("bills/", &BillCreate { order, total_amount })
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_bill(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("bills/{id}/")).await
    }

    pub async fn coupons(&self) -> ClientResult<Vec<Coupon>> {
        let list: ListOrPage<Coupon> = self.http.get("coupons/").await?;
        Ok(list.into_vec())
    }

    pub async fn coupon(&self, id: i64) -> ClientResult<Coupon> {
        self.http.get(&format!("coupons/{id}/")).await
    }

    #[instrument(skip_all, fields(code = %coupon.code))]
    pub async fn create_coupon(&self, coupon: &CouponCreate) -> ClientResult<Coupon> {
        coupon.validate()?;
        self.http.post("coupons/", coupon).await
    }

    pub async fn delete_coupon(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("coupons/{id}/")).await
    }
}
