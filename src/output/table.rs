//! Table output formatting

use serde_json::Value;
use tabled::{
    Table, Tabled,
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::client::models::ApiDocument;

const EMPTY: &str = "No results found.";

/// Format typed rows as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return EMPTY.to_string();
    }

    let mut table = Table::new(data);
    style(&mut table);
    table.to_string()
}

fn style(table: &mut Table) {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
}

/// Format a backend-owned document.
///
/// A list of objects becomes one row per item with the union of their keys
/// as columns. A single object becomes FIELD/VALUE rows. Anything else is
/// printed as is.
pub fn format_document(document: &ApiDocument) -> String {
    match document.as_value() {
        Value::Array(items) if items.is_empty() => EMPTY.to_string(),
        Value::Array(items) if items.iter().all(Value::is_object) => object_list(items),
        Value::Array(items) => {
            let mut builder = Builder::default();
            builder.push_record(["VALUE"]);
            for item in items {
                builder.push_record([cell(item)]);
            }
            build(builder)
        }
        Value::Object(map) if map.is_empty() => EMPTY.to_string(),
        Value::Object(map) => {
            let mut builder = Builder::default();
            builder.push_record(["FIELD", "VALUE"]);
            for (key, value) in map {
                builder.push_record([key.clone(), cell(value)]);
            }
            build(builder)
        }
        other => cell(other),
    }
}

fn object_list(items: &[Value]) -> String {
    let mut columns: Vec<&str> = Vec::new();
    for item in items {
        if let Value::Object(map) = item {
            for key in map.keys() {
                if !columns.contains(&key.as_str()) {
                    columns.push(key);
                }
            }
        }
    }

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.to_uppercase()));
    for item in items {
        builder.push_record(
            columns
                .iter()
                .map(|c| item.get(*c).map(cell).unwrap_or_else(|| "--".to_string())),
        );
    }
    build(builder)
}

fn build(builder: Builder) -> String {
    let mut table = builder.build();
    style(&mut table);
    table.to_string()
}

/// One table cell; nested values stay compact JSON
fn cell(value: &Value) -> String {
    match value {
        Value::Null => "--".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}
