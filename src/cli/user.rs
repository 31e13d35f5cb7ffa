//! User administration commands

use crate::cli::UserCommands;
use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_document;
use crate::client::UserApi;
use crate::client::models::RoleUpdate;
use crate::error::Result;

const SETTINGS_ROUTE: &str = "/dashboard/settings";

pub async fn run(opts: &GlobalOptions, command: UserCommands) -> Result<()> {
    match command {
        UserCommands::Permissions { user_id } => {
            run_document(opts, SETTINGS_ROUTE, "permissions", |client| async move {
                client.permissions(&user_id).await
            })
            .await
        }
        UserCommands::Role { user_id, role } => {
            let update = RoleUpdate { role };
            run_document(opts, SETTINGS_ROUTE, "role", |client| async move {
                client.update_role(&user_id, &update).await
            })
            .await
        }
    }
}
