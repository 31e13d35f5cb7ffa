//! Guarded fetch-and-print handlers

use std::future::Future;
use std::sync::Arc;

use log::debug;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::args::GlobalOptions;
use crate::cli::context::{CommandContext, spinner};
use crate::client::AeroCastClient;
use crate::client::models::ApiDocument;
use crate::error::Result;
use crate::output;

/// Await `future` with a spinner on stderr
pub async fn with_spinner<T>(message: &str, future: impl Future<Output = T>) -> T {
    let pb = spinner(message);
    let result = future.await;
    pb.finish_and_clear();
    result
}

/// Run a command that prints a backend-owned document.
///
/// # Example
///
/// ```ignore
/// run_document(opts, "/dashboard/meteo/aeroports", "airports", |client| async move {
///     client.list_airports().await
/// })
/// .await
/// ```
pub async fn run_document<Fut, F>(
    opts: &GlobalOptions,
    route: &str,
    resource_name: &str,
    fetcher: F,
) -> Result<()>
where
    Fut: Future<Output = Result<ApiDocument>>,
    F: FnOnce(Arc<AeroCastClient>) -> Fut,
{
    let ctx = CommandContext::new(opts)?;
    ctx.open(route).await?;

    debug!("Fetching {}", resource_name);
    let message = format!("Loading {}...", resource_name);
    let document = with_spinner(&message, fetcher(ctx.client.clone())).await?;

    if let Some(count) = document.len() {
        debug!("Fetched {} {}", count, resource_name);
    }
    output::print_document(&document, ctx.format)
}

/// Run a command that prints typed rows through a display type `D`.
pub async fn run_list<T, D, Fut, F>(
    opts: &GlobalOptions,
    route: &str,
    resource_name: &str,
    fetcher: F,
) -> Result<()>
where
    D: for<'a> From<&'a T> + Tabled + Serialize,
    Fut: Future<Output = Result<Vec<T>>>,
    F: FnOnce(Arc<AeroCastClient>) -> Fut,
{
    let ctx = CommandContext::new(opts)?;
    ctx.open(route).await?;

    debug!("Fetching {}", resource_name);
    let message = format!("Loading {}...", resource_name);
    let items = with_spinner(&message, fetcher(ctx.client.clone())).await?;
    debug!("Fetched {} {}", items.len(), resource_name);

    let rows: Vec<D> = items.iter().map(D::from).collect();
    output::print_rows(&rows, ctx.format)
}
