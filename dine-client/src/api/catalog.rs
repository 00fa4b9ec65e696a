use super::{DineClient, ListOrPage, PageQuery};
use crate::error::ClientResult;
use crate::http::HttpClient;
use serde::Serialize;
use shared::error::AppError;
use shared::models::{Category, CategoryCreate, Dish};
use shared::response::Paginated;
use tracing::instrument;

#[derive(Serialize)]
struct SearchQuery<'a> {
    search: &'a str,
}

impl<C: HttpClient> DineClient<C> {
    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        let page: Paginated<Category> = self.http.get("categories/").await?;
        Ok(page.results)
    }

    pub async fn create_category(&self, category: &CategoryCreate) -> ClientResult<Category> {
        if category.name.trim().is_empty() {
            return Err(AppError::required("name").into());
        }
        self.http.post("categories/", category).await
    }

    #[instrument(skip(self))]
    pub async fn dishes(&self, page: u32) -> ClientResult<Paginated<Dish>> {
        let query = PageQuery {
            page: page.max(1),
            page_size: Some(self.page_size),
        };
        self.http.get_query("dishes/", &query).await
    }

    pub async fn dish(&self, id: i64) -> ClientResult<Dish> {
        self.http.get(&format!("dishes/{id}/")).await
    }

    /// Server-side dish search; queries of one character or less return nothing
    #[instrument(skip(self))]
    pub async fn search_dishes(&self, query: &str) -> ClientResult<Vec<Dish>> {
        let query = query.trim();
        if query.chars().count() <= 1 {
            return Ok(Vec::new());
        }
        let found: ListOrPage<Dish> = self
            .http
            .get_query("search-dishes/", &SearchQuery { search: query })
            .await?;
        Ok(found.into_vec())
    }
}
