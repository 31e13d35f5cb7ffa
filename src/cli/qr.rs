//! QR code commands

use std::path::PathBuf;

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::{run_document, with_spinner};
use crate::cli::{CommandContext, OutputFormat, QrCommands};
use crate::client::QrApi;
use crate::client::models::{QrGenerateRequest, QrImage};
use crate::error::Result;
use crate::output::json::format_json;

const SCANNER_ROUTE: &str = "/dashboard/bagages/scanner";

pub async fn run(opts: &GlobalOptions, command: QrCommands) -> Result<()> {
    match command {
        QrCommands::Generate { baggage_id } => {
            let request = QrGenerateRequest {
                id_bagage: baggage_id,
            };
            run_document(opts, SCANNER_ROUTE, "QR code", |client| async move {
                client.generate_qr(&request).await
            })
            .await
        }
        QrCommands::Validate { code } => {
            run_document(opts, SCANNER_ROUTE, "QR validation", |client| async move {
                client.validate_qr(&code).await
            })
            .await
        }
        QrCommands::Download { code, output } => download(opts, &code, output).await,
    }
}

async fn download(opts: &GlobalOptions, code: &str, output: Option<PathBuf>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.open(SCANNER_ROUTE).await?;

    let image = with_spinner("Downloading QR code...", ctx.client.download_qr(code)).await?;
    let path = output.unwrap_or_else(|| default_path(code, &image));
    std::fs::write(&path, &image.bytes)?;
    log::debug!("Wrote {} bytes to {}", image.bytes.len(), path.display());

    match ctx.format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "path": path.display().to_string(),
                "bytes": image.bytes.len(),
                "content_type": image.content_type,
            });
            println!("{}", format_json(&body)?);
        }
        _ => println!("{} Saved {}", "✓".green(), path.display()),
    }
    Ok(())
}

/// `<code>.<ext>` with anything outside `[A-Za-z0-9_-]` replaced
fn default_path(code: &str, image: &QrImage) -> PathBuf {
    let stem: String = code
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    PathBuf::from(format!("{}.{}", stem, image.extension()))
}
