// ── Dashboard overview ──
//
// Aggregate counters, analytics reports and backend health.

use serde::Serialize;
use tracing::{debug, warn};
use yebomart_api::AdminClient;

use crate::config::DataSource;
use crate::error::CoreError;
use crate::fallback;
use crate::list::ViewSource;
use crate::model::{AnalyticsPeriod, DashboardStats};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub source: ViewSource,
}

pub struct DashboardController {
    client: AdminClient,
    data_source: DataSource,
}

impl DashboardController {
    pub fn new(client: AdminClient, data_source: DataSource) -> Self {
        Self {
            client,
            data_source,
        }
    }

    pub async fn load(&self) -> Result<DashboardView, CoreError> {
        let demo = |source| DashboardView {
            stats: fallback::dashboard(),
            source,
        };

        match self.data_source {
            DataSource::Demo => Ok(demo(ViewSource::Demo)),
            DataSource::Live => {
                let stats = self
                    .client
                    .dashboard()
                    .await?
                    .ok_or(CoreError::InvalidResponse)?;
                Ok(DashboardView {
                    stats,
                    source: ViewSource::Live,
                })
            }
            DataSource::Auto => match self.client.dashboard().await {
                Ok(Some(stats)) => Ok(DashboardView {
                    stats,
                    source: ViewSource::Live,
                }),
                Ok(None) => {
                    warn!("dashboard returned no data; serving demo counters");
                    Ok(demo(ViewSource::Fallback))
                }
                Err(e) => {
                    warn!(error = %e, "dashboard unavailable; serving demo counters");
                    Ok(demo(ViewSource::Fallback))
                }
            },
        }
    }

    /// Analytics report for `period`. `Null` in demo mode or when the
    /// backend has nothing to report.
    pub async fn analytics(&self, period: AnalyticsPeriod) -> Result<serde_json::Value, CoreError> {
        if self.data_source == DataSource::Demo {
            debug!(%period, "demo mode: no analytics");
            return Ok(serde_json::Value::Null);
        }
        Ok(self
            .client
            .analytics(period)
            .await?
            .unwrap_or(serde_json::Value::Null))
    }

    /// Backend liveness report.
    pub async fn health(&self) -> Result<serde_json::Value, CoreError> {
        if self.data_source == DataSource::Demo {
            return Ok(serde_json::json!({ "status": "demo" }));
        }
        Ok(self
            .client
            .health()
            .await?
            .unwrap_or(serde_json::Value::Null))
    }
}
