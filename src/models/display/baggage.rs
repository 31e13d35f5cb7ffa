//! Baggage display models and the route timeline

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use super::common::{or_dash, truncate_string};
use crate::client::models::{Baggage, BaggageStation, BaggageStatus};

/// Baggage list row
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct BaggageDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "CODE")]
    pub code: String,

    #[tabled(rename = "FLIGHT")]
    pub flight_number: String,

    #[tabled(rename = "OWNER")]
    pub owner: String,

    #[tabled(rename = "WEIGHT")]
    pub weight: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "CURRENT STATION")]
    pub current_station: String,
}

impl From<&Baggage> for BaggageDisplay {
    fn from(bag: &Baggage) -> Self {
        Self {
            id: bag.id.clone(),
            code: bag.code.clone(),
            flight_number: bag.flight_number.clone(),
            owner: truncate_string(&bag.owner, 24),
            weight: bag
                .weight
                .map(|w| format!("{:.1} kg", w))
                .unwrap_or_else(|| "--".to_string()),
            status: bag.status.label().to_string(),
            current_station: or_dash(bag.current_station().map(|s| s.station.as_str())),
        }
    }
}

/// One checkpoint row
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct StationDisplay {
    #[tabled(rename = "STATION")]
    pub station: String,

    #[tabled(rename = "TIME")]
    pub time: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "LOCATION")]
    pub location: String,
}

impl From<&BaggageStation> for StationDisplay {
    fn from(station: &BaggageStation) -> Self {
        Self {
            station: station.station.clone(),
            time: or_dash(station.time.as_deref()),
            status: station.status.label().to_string(),
            location: or_dash(station.location.as_deref()),
        }
    }
}

fn marker(status: BaggageStatus) -> String {
    match status {
        BaggageStatus::Delivered => "●".green().to_string(),
        BaggageStatus::InTransit => "◉".blue().bold().to_string(),
        BaggageStatus::Pending => "○".dimmed().to_string(),
        BaggageStatus::Lost => "✖".red().bold().to_string(),
    }
}

/// Card and vertical timeline for one bag
pub fn render_timeline(bag: &Baggage) -> String {
    let mut out = Vec::new();

    out.push(format!("{} {}", "Baggage".bold(), bag.code.bold()));
    out.push(format!("  Flight:  {}", bag.flight_number));
    out.push(format!("  Owner:   {}", bag.owner));
    if let Some(weight) = bag.weight {
        out.push(format!("  Weight:  {:.1} kg", weight));
    }
    out.push(format!("  Status:  {}", bag.status.label()));
    out.push(String::new());

    if bag.route.is_empty() {
        out.push("  No checkpoints recorded yet.".dimmed().to_string());
        return out.join("\n");
    }

    let last = bag.route.len() - 1;
    for (i, station) in bag.route.iter().enumerate() {
        let time = station.time.as_deref().unwrap_or("--:--");
        out.push(format!(
            "  {} {}  {}  {}",
            marker(station.status),
            time,
            station.station,
            station.status.label().dimmed()
        ));
        if let Some(ref location) = station.location {
            out.push(format!("  │         {}", location.dimmed()));
        }
        if i < last {
            out.push("  │".to_string());
        }
    }

    out.join("\n")
}
