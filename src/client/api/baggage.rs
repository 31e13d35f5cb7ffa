//! Baggage tracking API trait

use async_trait::async_trait;

use crate::client::models::{
    ApiDocument, Baggage, BaggageStation, IncidentReport, RegisterBaggageRequest, ScanRequest,
};
use crate::error::Result;

/// Baggage operations (`/api/v1/bagages`)
#[async_trait]
pub trait BaggageApi: Send + Sync {
    async fn register_baggage(&self, request: &RegisterBaggageRequest) -> Result<Baggage>;

    async fn get_baggage(&self, id: &str) -> Result<Baggage>;

    async fn baggage_by_qr(&self, code: &str) -> Result<Baggage>;

    async fn flight_baggage(&self, flight_number: &str) -> Result<Vec<Baggage>>;

    /// Record a checkpoint pass
    async fn scan_baggage(&self, request: &ScanRequest) -> Result<ApiDocument>;

    async fn baggage_history(&self, id: &str) -> Result<Vec<BaggageStation>>;

    async fn report_incident(&self, id: &str, report: &IncidentReport) -> Result<ApiDocument>;

    async fn flight_statistics(&self, flight_number: &str) -> Result<ApiDocument>;
}

pub mod keys {
    use crate::cache::QueryKey;

    pub const SCOPE: &str = "bagages";

    pub fn detail(id: &str) -> QueryKey {
        QueryKey::new(SCOPE, "detail").with(id)
    }

    pub fn by_qr(code: &str) -> QueryKey {
        QueryKey::new(SCOPE, "qr").with(code)
    }

    pub fn by_flight(flight_number: &str) -> QueryKey {
        QueryKey::new(SCOPE, "vol").with(flight_number)
    }

    pub fn history(id: &str) -> QueryKey {
        QueryKey::new(SCOPE, "historique").with(id)
    }

    pub fn statistics(flight_number: &str) -> QueryKey {
        QueryKey::new(SCOPE, "statistiques").with(flight_number)
    }
}
