//! JSON output formatting

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// When the output was produced (RFC 3339)
    pub timestamp: String,

    /// CLI version
    pub version: String,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Pretty-printed JSON wrapped in `{ data, meta }`
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    let output = JsonOutput::new(data);
    serde_json::to_string_pretty(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{ApiDocument, BaggageStation, BaggageStatus};

    #[test]
    fn test_json_output_carries_version() {
        let output = JsonOutput::new(vec!["CDG", "ORY"]);
        assert_eq!(output.data, vec!["CDG", "ORY"]);
        assert_eq!(output.meta.version, env!("CARGO_PKG_VERSION"));
        assert!(!output.meta.timestamp.is_empty());
    }

    #[test]
    fn test_format_json_typed_rows() {
        let route = vec![BaggageStation {
            station: "Check-in".into(),
            time: Some("10:30".into()),
            status: BaggageStatus::Delivered,
            location: None,
        }];

        let result = format_json(&route).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["data"][0]["station"], "Check-in");
        assert_eq!(parsed["data"][0]["status"], "delivered");
        assert!(parsed["meta"]["timestamp"].is_string());
    }

    #[test]
    fn test_format_json_document_is_not_rewrapped() {
        let doc: ApiDocument = serde_json::from_str(r#"{"alertes":[]}"#).unwrap();
        let result = format_json(&doc).unwrap();
        assert!(result.contains("\"alertes\": []"));
    }
}
