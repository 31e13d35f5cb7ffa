//! Airport commands

use crate::cli::AirportCommands;
use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_document;
use crate::client::AirportApi;
use crate::error::Result;

const AIRPORTS_ROUTE: &str = "/dashboard/meteo/aeroports";

pub async fn run(opts: &GlobalOptions, command: AirportCommands) -> Result<()> {
    match command {
        AirportCommands::List => {
            run_document(opts, AIRPORTS_ROUTE, "airports", |client| async move {
                client.list_airports().await
            })
            .await
        }
        AirportCommands::Get { code } => {
            run_document(opts, AIRPORTS_ROUTE, "airport", |client| async move {
                client.get_airport(&code).await
            })
            .await
        }
        AirportCommands::Runways { code } => {
            run_document(opts, AIRPORTS_ROUTE, "runways", |client| async move {
                client.runways(&code).await
            })
            .await
        }
    }
}
