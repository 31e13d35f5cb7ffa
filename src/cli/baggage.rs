//! Baggage commands

use std::future::Future;
use std::sync::Arc;

use crate::cli::BaggageCommands;
use crate::cli::CommandContext;
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::cli::handlers::{run_document, run_list, with_spinner};
use crate::client::{AeroCastClient, BaggageApi};
use crate::client::models::{
    Baggage, BaggageStation, IncidentReport, RegisterBaggageRequest, ScanRequest,
};
use crate::error::Result;
use crate::models::{BaggageDisplay, StationDisplay, render_timeline};
use crate::output::{self, json::format_json};

const TRACKING_ROUTE: &str = "/dashboard/bagages/suivi";
const SCANNER_ROUTE: &str = "/dashboard/bagages/scanner";
const INCIDENTS_ROUTE: &str = "/dashboard/bagages/incidents";

pub async fn run(opts: &GlobalOptions, command: BaggageCommands) -> Result<()> {
    match command {
        BaggageCommands::Track { id } => {
            show(opts, |client| async move { client.get_baggage(&id).await }).await
        }
        BaggageCommands::Qr { code } => {
            show(opts, |client| async move { client.baggage_by_qr(&code).await }).await
        }
        BaggageCommands::Flight { flight_number } => {
            run_list::<Baggage, BaggageDisplay, _, _>(
                opts,
                TRACKING_ROUTE,
                "baggage",
                |client| async move { client.flight_baggage(&flight_number).await },
            )
            .await
        }
        BaggageCommands::Scan {
            qr,
            station,
            location,
        } => {
            let request = ScanRequest {
                qr_code: qr,
                station,
                location,
            };
            run_document(opts, SCANNER_ROUTE, "scan result", |client| async move {
                client.scan_baggage(&request).await
            })
            .await
        }
        BaggageCommands::History { id } => {
            run_list::<BaggageStation, StationDisplay, _, _>(
                opts,
                TRACKING_ROUTE,
                "checkpoints",
                |client| async move { client.baggage_history(&id).await },
            )
            .await
        }
        BaggageCommands::Incident {
            id,
            description,
            kind,
        } => {
            let report = IncidentReport { description, kind };
            run_document(opts, INCIDENTS_ROUTE, "incident", |client| async move {
                client.report_incident(&id, &report).await
            })
            .await
        }
        BaggageCommands::Stats { flight_number } => {
            run_document(opts, TRACKING_ROUTE, "flight statistics", |client| async move {
                client.flight_statistics(&flight_number).await
            })
            .await
        }
        BaggageCommands::Register {
            flight,
            owner,
            weight,
        } => {
            let request = RegisterBaggageRequest {
                flight_number: flight,
                owner,
                weight,
            };
            show(opts, |client| async move { client.register_baggage(&request).await }).await
        }
    }
}

/// Print one bag: timeline card (pretty), single row (table), or JSON
async fn show<Fut, F>(opts: &GlobalOptions, fetch: F) -> Result<()>
where
    Fut: Future<Output = Result<Baggage>>,
    F: FnOnce(Arc<AeroCastClient>) -> Fut,
{
    let ctx = CommandContext::new(opts)?;
    ctx.open(TRACKING_ROUTE).await?;

    let bag = with_spinner("Loading baggage...", fetch(ctx.client.clone())).await?;
    match ctx.format {
        OutputFormat::Pretty => {
            println!("{}", render_timeline(&bag));
            Ok(())
        }
        OutputFormat::Table => output::print_rows(&[BaggageDisplay::from(&bag)], ctx.format),
        OutputFormat::Json => {
            println!("{}", format_json(&bag)?);
            Ok(())
        }
    }
}
