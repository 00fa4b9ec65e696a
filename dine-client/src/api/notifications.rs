use super::{DineClient, ListOrPage};
use crate::error::ClientResult;
use crate::http::HttpClient;
use shared::models::Notification;

impl<C: HttpClient> DineClient<C> {
    pub async fn notifications(&self) -> ClientResult<Vec<Notification>> {
        let list: ListOrPage<Notification> = self.http.get("notifications/").await?;
        Ok(list.into_vec())
    }

    pub async fn unread_notifications(&self) -> ClientResult<Vec<Notification>> {
        let list: ListOrPage<Notification> = self.http.get("notifications/unread/").await?;
        Ok(list.into_vec())
    }

    pub async fn mark_notification_read(&self, id: i64) -> ClientResult<()> {
        let _: serde_json::Value = self
            .http
            .post_empty(&format!("notifications/{id}/mark_as_read/"))
            .await?;
        Ok(())
    }

    pub async fn delete_notification(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("notifications/{id}/")).await
    }
}
