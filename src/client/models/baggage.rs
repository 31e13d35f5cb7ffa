//! Baggage models

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::validation::{Validate, check_required};

/// Where a bag or one leg of its route stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaggageStatus {
    Pending,
    InTransit,
    Delivered,
    Lost,
}

impl BaggageStatus {
    pub fn label(self) -> &'static str {
        match self {
            BaggageStatus::Pending => "Pending",
            BaggageStatus::InTransit => "In transit",
            BaggageStatus::Delivered => "Delivered",
            BaggageStatus::Lost => "Lost",
        }
    }
}

impl fmt::Display for BaggageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One checkpoint on a bag's route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaggageStation {
    /// Checkpoint name
    pub station: String,

    /// Time the bag passed (HH:MM), absent while pending
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    pub status: BaggageStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A tracked bag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Baggage {
    pub id: String,

    /// Tag code printed on the label
    pub code: String,

    /// Content of the QR code
    pub qr_code: String,

    #[serde(default)]
    pub route: Vec<BaggageStation>,

    pub owner: String,

    pub flight_number: String,

    /// Weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    pub status: BaggageStatus,
}

impl Baggage {
    /// The checkpoint currently in progress, else the last one reached
    pub fn current_station(&self) -> Option<&BaggageStation> {
        self.route
            .iter()
            .find(|s| s.status == BaggageStatus::InTransit)
            .or_else(|| {
                self.route
                    .iter()
                    .rev()
                    .find(|s| s.status == BaggageStatus::Delivered)
            })
    }
}

/// Body of `POST /bagages/enregistrer`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBaggageRequest {
    pub flight_number: String,
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Validate for RegisterBaggageRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_required(&mut errors, "flightNumber", &self.flight_number, "Flight number");
        check_required(&mut errors, "owner", &self.owner, "Owner");
        if let Some(weight) = self.weight
            && !(weight.is_finite() && weight > 0.0)
        {
            errors.add("weight", "Weight must be a positive number of kilograms");
        }
        errors.into_result()
    }
}

/// Body of `POST /bagages/scanner`, also the item of a batch scan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub qr_code: String,
    pub station: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Validate for ScanRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_required(&mut errors, "qrCode", &self.qr_code, "QR code");
        check_required(&mut errors, "station", &self.station, "Station");
        errors.into_result()
    }
}

/// Body of `POST /bagages/{id}/incident`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentReport {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Validate for IncidentReport {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_required(&mut errors, "description", &self.description, "Description");
        errors.into_result()
    }
}
