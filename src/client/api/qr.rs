//! QR code API trait

use async_trait::async_trait;

use crate::client::models::{ApiDocument, QrGenerateRequest, QrImage};
use crate::error::Result;

/// Baggage QR codes (`/api/v1/qr`)
#[async_trait]
pub trait QrApi: Send + Sync {
    async fn generate_qr(&self, request: &QrGenerateRequest) -> Result<ApiDocument>;

    async fn validate_qr(&self, code: &str) -> Result<ApiDocument>;

    /// Raw image bytes, never cached
    async fn download_qr(&self, code: &str) -> Result<QrImage>;
}

pub mod keys {
    use crate::cache::QueryKey;

    pub const SCOPE: &str = "qr";

    pub fn validate(code: &str) -> QueryKey {
        QueryKey::new(SCOPE, "valider").with(code)
    }
}
