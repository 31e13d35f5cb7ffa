//! Partner (B2B) models

use serde::{Deserialize, Serialize};

use super::{PathSegment, ScanRequest};
use crate::error::ValidationErrors;
use crate::validation::Validate;

/// Upper bound on items in one batch call
pub const MAX_BATCH_SIZE: usize = 100;

/// Body of `POST /b2b/meteo/lot`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchWeatherRequest {
    pub aeroports: Vec<String>,
}

impl Validate for BatchWeatherRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.aeroports.is_empty() {
            errors.add("aeroports", "At least one airport is required");
        } else if self.aeroports.len() > MAX_BATCH_SIZE {
            errors.add(
                "aeroports",
                format!("At most {} airports per batch", MAX_BATCH_SIZE),
            );
        }
        for code in &self.aeroports {
            if let Err(e) = PathSegment::parse("aeroports", code) {
                errors.fields.extend(e.fields);
            }
        }
        errors.into_result()
    }
}

/// Body of `POST /b2b/bagages/scanner-lot`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchScanRequest {
    pub scans: Vec<ScanRequest>,
}

impl Validate for BatchScanRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.scans.is_empty() {
            errors.add("scans", "At least one scan is required");
        } else if self.scans.len() > MAX_BATCH_SIZE {
            errors.add("scans", format!("At most {} scans per batch", MAX_BATCH_SIZE));
        }
        for scan in &self.scans {
            if let Err(e) = scan.validate() {
                errors.fields.extend(e.fields);
            }
        }
        errors.into_result()
    }
}

/// Body of `POST /b2b/webhook/configurer`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub url: String,
    #[serde(default)]
    pub events: Vec<String>,
}

impl Validate for WebhookConfig {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        match url::Url::parse(&self.url) {
            Ok(parsed) if parsed.scheme() == "https" => {}
            Ok(_) => errors.add("url", "Webhook URL must use https"),
            Err(_) => errors.add("url", "Invalid webhook URL"),
        }
        if self.events.iter().any(|e| e.trim().is_empty()) {
            errors.add("events", "Event names must not be blank");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_requires_https() {
        let hook = WebhookConfig {
            url: "https://partner.example/hooks/aerocast".into(),
            events: vec!["bagage.scanne".into()],
        };
        assert!(hook.validate().is_ok());

        let hook = WebhookConfig {
            url: "http://partner.example".into(),
            events: vec![],
        };
        assert_eq!(
            hook.validate().unwrap_err().message_for("url"),
            Some("Webhook URL must use https")
        );

        let hook = WebhookConfig {
            url: "not a url".into(),
            events: vec![],
        };
        assert!(hook.validate().is_err());
    }

    #[test]
    fn test_batch_weather_bounds() {
        assert!(BatchWeatherRequest { aeroports: vec![] }.validate().is_err());

        let many = BatchWeatherRequest {
            aeroports: (0..=MAX_BATCH_SIZE).map(|i| format!("A{}", i)).collect(),
        };
        assert!(many.validate().is_err());

        let ok = BatchWeatherRequest {
            aeroports: vec!["CDG".into(), "NCE".into()],
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_batch_scan_validates_items() {
        let req = BatchScanRequest {
            scans: vec![ScanRequest {
                qr_code: "".into(),
                station: "Security".into(),
                location: None,
            }],
        };
        assert!(req.validate().unwrap_err().message_for("qrCode").is_some());
    }
}
