//! Partner batch commands

use std::path::Path;

use crate::cli::B2bCommands;
use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_document;
use crate::client::B2bApi;
use crate::client::models::{BatchScanRequest, BatchWeatherRequest, ScanRequest, WebhookConfig};
use crate::error::{Error, Result};

const SETTINGS_ROUTE: &str = "/dashboard/settings";
const SCANNER_ROUTE: &str = "/dashboard/bagages/scanner";

pub async fn run(opts: &GlobalOptions, command: B2bCommands) -> Result<()> {
    match command {
        B2bCommands::Weather { airports } => {
            let request = BatchWeatherRequest {
                aeroports: airports,
            };
            run_document(opts, SETTINGS_ROUTE, "batch weather", |client| async move {
                client.batch_weather(&request).await
            })
            .await
        }
        B2bCommands::Scan { file } => {
            let request = read_scans(&file)?;
            run_document(opts, SCANNER_ROUTE, "batch scan", |client| async move {
                client.batch_scan(&request).await
            })
            .await
        }
        B2bCommands::Docs => {
            run_document(opts, SETTINGS_ROUTE, "documentation", |client| async move {
                client.documentation().await
            })
            .await
        }
        B2bCommands::Webhook { url, events } => {
            let config = WebhookConfig { url, events };
            run_document(opts, SETTINGS_ROUTE, "webhook", |client| async move {
                client.configure_webhook(&config).await
            })
            .await
        }
    }
}

/// Load a JSON array of scans
fn read_scans(path: &Path) -> Result<BatchScanRequest> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::Other(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let scans: Vec<ScanRequest> = serde_json::from_str(&contents)?;
    Ok(BatchScanRequest { scans })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_scans() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scans.json");
        std::fs::write(
            &path,
            r#"[{"qrCode":"BAG-1","station":"Security"},{"qrCode":"BAG-2","station":"Loading","location":"A3"}]"#,
        )
        .unwrap();

        let request = read_scans(&path).unwrap();
        assert_eq!(request.scans.len(), 2);
        assert_eq!(request.scans[1].location.as_deref(), Some("A3"));
    }

    #[test]
    fn test_read_scans_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scans.json");
        std::fs::write(&path, r#"{"qrCode":"BAG-1"}"#).unwrap();
        assert!(matches!(read_scans(&path), Err(Error::Json(_))));

        assert!(read_scans(&dir.path().join("missing.json")).is_err());
    }
}
