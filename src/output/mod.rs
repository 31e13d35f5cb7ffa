//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::client::models::ApiDocument;
use crate::error::Result;

pub mod formatters;
pub mod json;
pub mod table;

/// Print rows as a table or as the JSON envelope
pub fn print_rows<T: Tabled + Serialize>(rows: &[T], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Pretty | OutputFormat::Table => println!("{}", table::format_table(rows)),
        OutputFormat::Json => println!("{}", json::format_json(rows)?),
    }
    Ok(())
}

/// Print a backend-owned document
pub fn print_document(document: &ApiDocument, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Pretty | OutputFormat::Table => {
            println!("{}", table::format_document(document))
        }
        OutputFormat::Json => println!("{}", json::format_json(document)?),
    }
    Ok(())
}
