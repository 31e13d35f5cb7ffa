//! Subscription commands

use crate::cli::SubscriptionCommands;
use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_document;
use crate::client::SubscriptionApi;
use crate::client::models::SubscriptionRequest;
use crate::error::Result;

const SETTINGS_ROUTE: &str = "/dashboard/settings";

pub async fn run(opts: &GlobalOptions, command: SubscriptionCommands) -> Result<()> {
    match command {
        SubscriptionCommands::Plans => {
            run_document(opts, SETTINGS_ROUTE, "plans", |client| async move {
                client.plans().await
            })
            .await
        }
        SubscriptionCommands::Subscribe { company, plan } => {
            let request = SubscriptionRequest {
                id_compagnie: company,
                id_forfait: plan,
            };
            run_document(opts, SETTINGS_ROUTE, "subscription", |client| async move {
                client.subscribe(&request).await
            })
            .await
        }
        SubscriptionCommands::Usage { company } => {
            run_document(opts, SETTINGS_ROUTE, "usage", |client| async move {
                client.usage(&company).await
            })
            .await
        }
        SubscriptionCommands::Billing { company } => {
            run_document(opts, SETTINGS_ROUTE, "billing", |client| async move {
                client.billing(&company).await
            })
            .await
        }
    }
}
