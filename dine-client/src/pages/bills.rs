use super::confirm::Confirm;
use crate::api::DineClient;
use crate::error::ClientResult;
use crate::http::HttpClient;
use shared::bills::{BillFilter, BillPage};
use shared::models::Bill;
use shared::order::Confirmation;
use tracing::{info, instrument};

const CANCEL_CONFIRMATION: Confirmation = Confirmation {
    title: "Are you sure?",
    text: "Do you want to cancel this bill?",
};

/// Bills screen: the full list filtered and paged in memory
pub struct BillsBoard<'a, C: HttpClient> {
    client: &'a DineClient<C>,
    bills: Vec<Bill>,
    filter: BillFilter,
    page: u32,
}

impl<'a, C: HttpClient> BillsBoard<'a, C> {
    pub fn new(client: &'a DineClient<C>) -> Self {
        Self {
            client,
            bills: Vec::new(),
            filter: BillFilter::default(),
            page: 1,
        }
    }

    #[instrument(skip(self))]
    pub async fn load(&mut self) -> ClientResult<usize> {
        self.bills = self.client.all_bills().await?;
        self.page = 1;
        Ok(self.bills.len())
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    /// Any filter change starts again from the first page
    pub fn set_filter(&mut self, filter: BillFilter) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn filter(&self) -> &BillFilter {
        &self.filter
    }

    pub fn go_to(&mut self, page: u32) {
        let page = self.view().pager.go_to(page).page;
        self.page = page;
    }

    pub fn view(&self) -> BillPage<'_> {
        BillPage::new(&self.bills, &self.filter, self.page)
    }

    /// Cancel (delete) a bill; the row disappears only once the API agrees
    #[instrument(skip(self, confirm))]
    pub async fn cancel(&mut self, id: i64, confirm: &dyn Confirm) -> ClientResult<bool> {
        if !confirm.confirm(&CANCEL_CONFIRMATION) {
            return Ok(false);
        }
        self.client.delete_bill(id).await?;
        self.bills.retain(|b| b.id != id);
        info!("Bill cancelled");
        // Stay in range when the last row of the last page went away
        let page = self.view().pager.go_to(self.page).page;
        self.page = page;
        Ok(true)
    }
}
