//! Administration commands

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_document;
use crate::cli::{AdminCommands, MaintenanceMode};
use crate::client::AdminApi;
use crate::client::models::{LogQuery, MaintenanceRequest, StatisticsQuery};
use crate::error::Result;

const STATISTICS_ROUTE: &str = "/dashboard/statistiques";
const SETTINGS_ROUTE: &str = "/dashboard/settings";

pub async fn run(opts: &GlobalOptions, command: AdminCommands) -> Result<()> {
    match command {
        AdminCommands::Stats { from, to } => {
            let query = StatisticsQuery { from, to };
            run_document(opts, STATISTICS_ROUTE, "statistics", |client| async move {
                client.statistics(&query).await
            })
            .await
        }
        AdminCommands::Logs { level, limit } => {
            let query = LogQuery { level, limit };
            run_document(opts, STATISTICS_ROUTE, "logs", |client| async move {
                client.logs(&query).await
            })
            .await
        }
        AdminCommands::Health => {
            run_document(opts, STATISTICS_ROUTE, "health report", |client| async move {
                client.health().await
            })
            .await
        }
        AdminCommands::Maintenance { mode, message } => {
            let request = maintenance_request(&mode, message);
            run_document(opts, SETTINGS_ROUTE, "maintenance mode", |client| async move {
                client.maintenance(&request).await
            })
            .await
        }
    }
}

fn maintenance_request(mode: &MaintenanceMode, message: Option<String>) -> MaintenanceRequest {
    MaintenanceRequest {
        enabled: mode.on && !mode.off,
        message,
    }
}
