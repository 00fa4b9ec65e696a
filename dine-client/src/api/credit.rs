use super::{DineClient, ListOrPage};
use crate::error::ClientResult;
use crate::http::HttpClient;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::{CreditPayment, CreditUser, CreditUserCreate, CreditUserUpdate};
use tracing::instrument;

#[derive(Deserialize)]
struct ActiveUsers {
    data: Vec<CreditUser>,
}

impl<C: HttpClient> DineClient<C> {
    pub async fn credit_users(&self) -> ClientResult<Vec<CreditUser>> {
        let list: ListOrPage<CreditUser> = self.http.get("credit-users/").await?;
        Ok(list.into_vec())
    }

    pub async fn credit_user(&self, id: i64) -> ClientResult<CreditUser> {
        self.http.get(&format!("credit-users/{id}/")).await
    }

    /// Accounts that may take new credit orders
    pub async fn active_credit_users(&self) -> ClientResult<Vec<CreditUser>> {
        let active: ActiveUsers = self.http.get("credit-users/get_active_users/").await?;
        Ok(active.data)
    }

    #[instrument(skip_all, fields(username = %user.username))]
    pub async fn create_credit_user(&self, user: &CreditUserCreate) -> ClientResult<CreditUser> {
        user.validate()?;
        self.http.post("credit-users/", user).await
    }

    pub async fn update_credit_user(
        &self,
        id: i64,
        update: &CreditUserUpdate,
    ) -> ClientResult<CreditUser> {
        update.validate()?;
        self.http.put(&format!("credit-users/{id}/"), update).await
    }

    pub async fn delete_credit_user(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("credit-users/{id}/")).await
    }

    /// Settle part of a credit account's balance
    ///
    /// The amount is checked against the account's `total_due` first.
    #[instrument(skip(self))]
    pub async fn make_credit_payment(
        &self,
        id: i64,
        amount: Decimal,
    ) -> ClientResult<serde_json::Value> {
        let user = self.credit_user(id).await?;
        let payment = CreditPayment::new(amount, &user)?;
        self.http
            .post(&format!("credit-users/{id}/make_payment/"), &payment)
            .await
    }
}
