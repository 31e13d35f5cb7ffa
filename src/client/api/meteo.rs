//! Weather API trait

use async_trait::async_trait;

use crate::client::models::{ApiDocument, CompareQuery};
use crate::error::Result;

/// Weather predictions and alerts (`/api/v1/meteo`)
#[async_trait]
pub trait MeteoApi: Send + Sync {
    async fn predictions(&self, airport: &str) -> Result<ApiDocument>;

    async fn runway_predictions(&self, airport: &str, runway: &str) -> Result<ApiDocument>;

    async fn alerts(&self, airport: &str) -> Result<ApiDocument>;

    async fn compare(&self, query: &CompareQuery) -> Result<ApiDocument>;

    /// Ask the backend to refresh its forecasts
    async fn trigger_update(&self) -> Result<ApiDocument>;

    async fn update_status(&self) -> Result<ApiDocument>;
}

pub mod keys {
    use crate::cache::QueryKey;

    pub const SCOPE: &str = "meteo";

    pub fn predictions(airport: &str) -> QueryKey {
        QueryKey::new(SCOPE, "predictions").with(airport)
    }

    pub fn runway_predictions(airport: &str, runway: &str) -> QueryKey {
        predictions(airport).with("piste").with(runway)
    }

    pub fn alerts(airport: &str) -> QueryKey {
        QueryKey::new(SCOPE, "alertes").with(airport)
    }

    pub fn compare() -> QueryKey {
        QueryKey::new(SCOPE, "comparer")
    }

    pub fn status() -> QueryKey {
        QueryKey::new(SCOPE, "statut")
    }
}
