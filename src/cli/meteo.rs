//! Weather commands

use colored::Colorize;
use futures::future::join_all;

use crate::cli::CommandContext;
use crate::cli::MeteoCommands;
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::cli::handlers::{run_document, with_spinner};
use crate::client::MeteoApi;
use crate::client::models::{ApiDocument, CompareQuery};
use crate::error::{Error, Result};
use crate::output::{self, json::format_json};

const PREDICTIONS_ROUTE: &str = "/dashboard/meteo/predictions";
const ALERTS_ROUTE: &str = "/dashboard/meteo/alertes";

pub async fn run(opts: &GlobalOptions, command: MeteoCommands) -> Result<()> {
    match command {
        MeteoCommands::Predictions { airports, runway } => match runway {
            Some(runway) => {
                let [airport] = airports.as_slice() else {
                    return Err(Error::Other(
                        "--runway takes exactly one airport".to_string(),
                    ));
                };
                let airport = airport.clone();
                run_document(opts, PREDICTIONS_ROUTE, "runway forecast", |client| async move {
                    client.runway_predictions(&airport, &runway).await
                })
                .await
            }
            None => per_airport(opts, PREDICTIONS_ROUTE, airports, Kind::Predictions).await,
        },
        MeteoCommands::Alerts { airports } => {
            per_airport(opts, ALERTS_ROUTE, airports, Kind::Alerts).await
        }
        MeteoCommands::Compare { airports, horizon } => {
            let query = CompareQuery {
                aeroports: airports,
                horizon,
            };
            run_document(opts, PREDICTIONS_ROUTE, "comparison", |client| async move {
                client.compare(&query).await
            })
            .await
        }
        MeteoCommands::Update => {
            run_document(opts, PREDICTIONS_ROUTE, "weather update", |client| async move {
                client.trigger_update().await
            })
            .await
        }
        MeteoCommands::Status => {
            run_document(opts, PREDICTIONS_ROUTE, "update status", |client| async move {
                client.update_status().await
            })
            .await
        }
    }
}

#[derive(Clone, Copy)]
enum Kind {
    Predictions,
    Alerts,
}

/// Fetch one document per airport concurrently and print them in order
async fn per_airport(
    opts: &GlobalOptions,
    route: &str,
    airports: Vec<String>,
    kind: Kind,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.open(route).await?;

    let client = &ctx.client;
    let requests = airports.iter().map(|code| async move {
        match kind {
            Kind::Predictions => client.predictions(code).await,
            Kind::Alerts => client.alerts(code).await,
        }
    });
    let results = with_spinner("Loading weather...", join_all(requests)).await;

    let mut documents = Vec::with_capacity(airports.len());
    for (code, result) in airports.iter().zip(results) {
        documents.push((code.as_str(), result?));
    }
    log::debug!("Fetched weather for {} airports", documents.len());

    print_grouped(&documents, ctx.format)
}

fn print_grouped(documents: &[(&str, ApiDocument)], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        let body: serde_json::Map<String, serde_json::Value> = documents
            .iter()
            .map(|(code, doc)| (code.to_string(), doc.as_value().clone()))
            .collect();
        println!("{}", format_json(&body)?);
        return Ok(());
    }

    for (i, (code, document)) in documents.iter().enumerate() {
        if i > 0 {
            println!();
        }
        if documents.len() > 1 || format == OutputFormat::Pretty {
            println!("{}", code.bold());
        }
        output::print_document(document, format)?;
    }
    Ok(())
}
