//! Airport API trait

use async_trait::async_trait;

use crate::client::models::ApiDocument;
use crate::error::Result;

/// Airport reference data (`/api/v1/aeroports`)
#[async_trait]
pub trait AirportApi: Send + Sync {
    async fn list_airports(&self) -> Result<ApiDocument>;

    async fn get_airport(&self, code: &str) -> Result<ApiDocument>;

    async fn runways(&self, code: &str) -> Result<ApiDocument>;
}

pub mod keys {
    use crate::cache::QueryKey;

    pub const SCOPE: &str = "aeroports";

    pub fn list() -> QueryKey {
        QueryKey::new(SCOPE, "list")
    }

    pub fn detail(code: &str) -> QueryKey {
        QueryKey::new(SCOPE, "detail").with(code)
    }

    pub fn runways(code: &str) -> QueryKey {
        QueryKey::new(SCOPE, "pistes").with(code)
    }
}
