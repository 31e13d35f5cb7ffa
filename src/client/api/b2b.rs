//! Partner API trait

use async_trait::async_trait;

use crate::client::models::{ApiDocument, BatchScanRequest, BatchWeatherRequest, WebhookConfig};
use crate::error::Result;

/// Batch and integration endpoints for partners (`/api/v1/b2b`)
#[async_trait]
pub trait B2bApi: Send + Sync {
    async fn batch_weather(&self, request: &BatchWeatherRequest) -> Result<ApiDocument>;

    async fn batch_scan(&self, request: &BatchScanRequest) -> Result<ApiDocument>;

    async fn documentation(&self) -> Result<ApiDocument>;

    async fn configure_webhook(&self, config: &WebhookConfig) -> Result<ApiDocument>;
}

pub mod keys {
    use crate::cache::QueryKey;

    pub const SCOPE: &str = "b2b";

    pub fn documentation() -> QueryKey {
        QueryKey::new(SCOPE, "documentation")
    }
}
