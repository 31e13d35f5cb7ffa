//! QR code models

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::validation::{Validate, check_required};

/// Body of `POST /qr/generer`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrGenerateRequest {
    pub id_bagage: String,
}

impl Validate for QrGenerateRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_required(&mut errors, "id_bagage", &self.id_bagage, "Baggage ID");
        errors.into_result()
    }
}

/// Raw bytes of a downloaded QR image
#[derive(Debug, Clone)]
pub struct QrImage {
    /// Content type reported by the server, if any
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl QrImage {
    /// File extension matching the content type
    pub fn extension(&self) -> &'static str {
        match self.content_type.as_deref() {
            Some(ct) if ct.starts_with("image/svg") => "svg",
            Some(ct) if ct.starts_with("image/jpeg") => "jpg",
            _ => "png",
        }
    }
}
