use super::{DineClient, ListOrPage};
use crate::error::ClientResult;
use crate::http::HttpClient;
use serde::Serialize;
use shared::models::{DiningTable, DiningTableUpdate, Floor};
use tracing::instrument;

#[derive(Serialize)]
struct FloorQuery<'a> {
    floor: &'a str,
}

impl<C: HttpClient> DineClient<C> {
    pub async fn floors(&self) -> ClientResult<Vec<Floor>> {
        let list: ListOrPage<Floor> = self.http.get("floors/").await?;
        Ok(list.into_vec())
    }

    /// Tables on one floor
    #[instrument(skip(self))]
    pub async fn tables(&self, floor: &str) -> ClientResult<Vec<DiningTable>> {
        let list: ListOrPage<DiningTable> = self
            .http
            .get_query("tables/", &FloorQuery { floor })
            .await?;
        Ok(list.into_vec())
    }

    pub async fn table(&self, id: i64) -> ClientResult<DiningTable> {
        self.http.get(&format!("tables/{id}/")).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_table(
        &self,
        id: i64,
        update: &DiningTableUpdate,
    ) -> ClientResult<DiningTable> {
        self.http.patch(&format!("tables/{id}/"), update).await
    }
}
