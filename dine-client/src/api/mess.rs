use super::{DineClient, ListOrPage};
use crate::error::ClientResult;
use crate::http::HttpClient;
use serde::Serialize;
use shared::error::AppError;
use shared::membership::{Enrollment, ReceivedPayment, STANDARD_MENU_OWNER, next_custom_day};
use shared::models::{
    Menu, MenuCreate, MenuFilter, MenuItem, MenuItemCreate, MenuType, Mess, MessCreate,
    MessType, MessUpdate, Transaction, TransactionCreate,
};
use tracing::instrument;

#[derive(Serialize)]
struct MessQuery {
    mess: i64,
}

impl<C: HttpClient> DineClient<C> {
    pub async fn mess_types(&self) -> ClientResult<Vec<MessType>> {
        let list: ListOrPage<MessType> = self.http.get("mess-types/").await?;
        Ok(list.into_vec())
    }

    #[instrument(skip(self))]
    pub async fn menus(&self, filter: &MenuFilter) -> ClientResult<Vec<Menu>> {
        let list: ListOrPage<Menu> = self.http.get_query("menus/", filter).await?;
        Ok(list.into_vec())
    }

    /// Menus offered to a member: the standard set or the member's own
    pub async fn member_menus(
        &self,
        mess_type: i64,
        menu_type: MenuType,
        mobile_number: &str,
    ) -> ClientResult<Vec<Menu>> {
        let custom = menu_type == MenuType::CustomMenu;
        let filter = MenuFilter {
            mess_type: Some(mess_type),
            is_custom: Some(custom),
            created_by: Some(if custom {
                mobile_number.to_string()
            } else {
                STANDARD_MENU_OWNER.to_string()
            }),
        };
        self.menus(&filter).await
    }

    pub async fn create_menu(&self, menu: &MenuCreate) -> ClientResult<Menu> {
        self.http.post("menus/", menu).await
    }

    /// Create the member's custom menu for the first weekday without one
    ///
    /// A member holds at most one custom menu per weekday.
    #[instrument(skip(self))]
    pub async fn add_custom_menu(&self, mess_type: i64, mobile_number: &str) -> ClientResult<Menu> {
        let mobile_number = mobile_number.trim();
        if mobile_number.is_empty() {
            return Err(AppError::required("mobile_number").into());
        }
        let existing = self
            .member_menus(mess_type, MenuType::CustomMenu, mobile_number)
            .await?;
        let day = next_custom_day(&existing)?;
        self.create_menu(&MenuCreate::custom(day, mess_type, mobile_number))
            .await
    }

    pub async fn create_menu_item(&self, item: &MenuItemCreate) -> ClientResult<MenuItem> {
        self.http.post("menu-items/", item).await
    }

    pub async fn delete_menu_item(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("menu-items/{id}/")).await
    }

    pub async fn messes(&self) -> ClientResult<Vec<Mess>> {
        let list: ListOrPage<Mess> = self.http.get("messes/").await?;
        Ok(list.into_vec())
    }

    pub async fn mess(&self, id: i64) -> ClientResult<Mess> {
        self.http.get(&format!("messes/{id}/")).await
    }

    /// Validate the enrollment against the member's menus and create it
    #[instrument(skip_all, fields(customer = %enrollment.customer_name))]
    pub async fn enroll(&self, enrollment: &Enrollment, menus: &[Menu]) -> ClientResult<Mess> {
        let payload: MessCreate = enrollment.to_create(menus)?;
        self.http.post("messes/", &payload).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_mess(&self, id: i64, update: &MessUpdate) -> ClientResult<Mess> {
        update.validate()?;
        self.http.patch(&format!("messes/{id}/"), update).await
    }

    pub async fn delete_mess(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("messes/{id}/")).await
    }

    pub async fn transactions(&self, mess_id: i64) -> ClientResult<Vec<Transaction>> {
        let list: ListOrPage<Transaction> = self
            .http
            .get_query("transactions/", &MessQuery { mess: mess_id })
            .await?;
        Ok(list.into_vec())
    }

    #[instrument(skip(self, payment))]
    pub async fn receive_payment(
        &self,
        mess_id: i64,
        payment: &ReceivedPayment,
    ) -> ClientResult<Transaction> {
        let payload: TransactionCreate = payment.to_create(mess_id)?;
        self.http.post("transactions/", &payload).await
    }
}
