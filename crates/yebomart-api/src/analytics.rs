// Dashboard, analytics and health endpoints

use crate::client::AdminClient;
use crate::error::Error;
use crate::models::{AnalyticsPeriod, DashboardStats};

impl AdminClient {
    /// `GET /api/admin/dashboard`
    pub async fn dashboard(&self) -> Result<Option<DashboardStats>, Error> {
        self.get("/api/admin/dashboard").await
    }

    /// `GET /api/admin/analytics?period=...`
    ///
    /// The report shape varies by period and is returned as raw JSON.
    pub async fn analytics(
        &self,
        period: AnalyticsPeriod,
    ) -> Result<Option<serde_json::Value>, Error> {
        self.get(&format!("/api/admin/analytics?period={period}"))
            .await
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<Option<serde_json::Value>, Error> {
        self.get("/health").await
    }
}
