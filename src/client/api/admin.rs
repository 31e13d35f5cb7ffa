//! Administration API trait

use async_trait::async_trait;

use crate::client::models::{ApiDocument, LogQuery, MaintenanceRequest, StatisticsQuery};
use crate::error::Result;

/// Platform administration (`/api/v1/admin`)
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn statistics(&self, query: &StatisticsQuery) -> Result<ApiDocument>;

    async fn logs(&self, query: &LogQuery) -> Result<ApiDocument>;

    async fn health(&self) -> Result<ApiDocument>;

    async fn maintenance(&self, request: &MaintenanceRequest) -> Result<ApiDocument>;
}

pub mod keys {
    use crate::cache::QueryKey;

    pub const SCOPE: &str = "admin";

    pub fn statistics() -> QueryKey {
        QueryKey::new(SCOPE, "statistiques")
    }

    pub fn logs() -> QueryKey {
        QueryKey::new(SCOPE, "logs")
    }

    pub fn health() -> QueryKey {
        QueryKey::new(SCOPE, "sante")
    }
}
