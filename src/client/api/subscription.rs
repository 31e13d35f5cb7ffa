//! Subscription API trait

use async_trait::async_trait;

use crate::client::models::{ApiDocument, SubscriptionRequest};
use crate::error::Result;

/// Airline plans and billing (`/api/v1/abonnements`)
#[async_trait]
pub trait SubscriptionApi: Send + Sync {
    async fn plans(&self) -> Result<ApiDocument>;

    async fn subscribe(&self, request: &SubscriptionRequest) -> Result<ApiDocument>;

    async fn usage(&self, company_id: &str) -> Result<ApiDocument>;

    async fn billing(&self, company_id: &str) -> Result<ApiDocument>;
}

pub mod keys {
    use crate::cache::QueryKey;

    pub const SCOPE: &str = "abonnements";

    pub fn plans() -> QueryKey {
        QueryKey::new(SCOPE, "forfaits")
    }

    pub fn usage(company_id: &str) -> QueryKey {
        QueryKey::new(SCOPE, "utilisation").with(company_id)
    }

    pub fn billing(company_id: &str) -> QueryKey {
        QueryKey::new(SCOPE, "facturation").with(company_id)
    }
}
