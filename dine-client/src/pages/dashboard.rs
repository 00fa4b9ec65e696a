use crate::api::DineClient;
use crate::error::ClientResult;
use crate::http::HttpClient;
use shared::models::{DashboardData, TimeRange};

/// Dashboard screen for one reporting window
#[derive(Debug, Default)]
pub struct Dashboard {
    range: TimeRange,
    data: Option<DashboardData>,
}

impl Dashboard {
    pub fn new(range: TimeRange) -> Self {
        Self { range, data: None }
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Switching the window drops the figures of the old one
    pub fn set_range(&mut self, range: TimeRange) {
        if range != self.range {
            self.range = range;
            self.data = None;
        }
    }

    pub async fn refresh<C: HttpClient>(
        &mut self,
        client: &DineClient<C>,
    ) -> ClientResult<&DashboardData> {
        let data = client.dashboard(self.range).await?;
        Ok(self.data.insert(data))
    }

    pub fn data(&self) -> Option<&DashboardData> {
        self.data.as_ref()
    }
}
