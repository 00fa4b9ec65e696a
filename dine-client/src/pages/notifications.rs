use crate::api::DineClient;
use crate::error::ClientResult;
use crate::http::HttpClient;
use shared::models::{Notification, unread_count};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Unread badge refresh period
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

pub struct NotificationCenter<'a, C: HttpClient> {
    client: &'a DineClient<C>,
    notifications: Vec<Notification>,
}

impl<'a, C: HttpClient> NotificationCenter<'a, C> {
    pub fn new(client: &'a DineClient<C>) -> Self {
        Self {
            client,
            notifications: Vec::new(),
        }
    }

    pub async fn load(&mut self) -> ClientResult<&[Notification]> {
        self.notifications = self.client.notifications().await?;
        Ok(&self.notifications)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Unread count of the loaded list
    pub fn unread(&self) -> usize {
        unread_count(&self.notifications)
    }

    /// Unread count straight from the API
    pub async fn fetch_unread_count(&self) -> ClientResult<usize> {
        Ok(self.client.unread_notifications().await?.len())
    }

    /// The local flag flips only after the API call succeeds
    pub async fn mark_read(&mut self, id: i64) -> ClientResult<()> {
        self.client.mark_notification_read(id).await?;
        if let Some(n) = self.notifications.iter_mut().find(|n| n.id == id) {
            n.is_read = true;
        }
        Ok(())
    }

    pub async fn delete(&mut self, id: i64) -> ClientResult<()> {
        self.client.delete_notification(id).await?;
        self.notifications.retain(|n| n.id != id);
        Ok(())
    }

    /// Report the unread count every `period` until `cancel` fires
    ///
    /// A failed poll is logged and skipped; the first tick fires immediately.
    pub async fn poll<F>(&self, period: Duration, cancel: CancellationToken, mut on_count: F)
    where
        F: FnMut(usize),
    {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Notification polling stopped");
                    break;
                }
                _ = ticker.tick() => {
                    match self.fetch_unread_count().await {
                        Ok(count) => on_count(count),
                        Err(e) if e.is_token_expired() => {
                            warn!("Session expired, stopping notification polling");
                            break;
                        }
                        Err(e) => warn!(error = %e, "Unread notification poll failed"),
                    }
                }
            }
        }
    }
}
