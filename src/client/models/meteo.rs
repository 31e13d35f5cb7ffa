//! Weather models

use serde::{Deserialize, Serialize};

use super::PathSegment;
use crate::error::ValidationErrors;
use crate::validation::Validate;

/// Query of `GET /meteo/comparer`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareQuery {
    /// Airport codes to compare
    pub aeroports: Vec<String>,

    /// Optional forecast horizon in hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon: Option<u32>,
}

impl CompareQuery {
    /// Query string pairs, also used for cache keys
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("aeroports", self.aeroports.join(","))];
        if let Some(horizon) = self.horizon {
            pairs.push(("horizon", horizon.to_string()));
        }
        pairs
    }
}

impl Validate for CompareQuery {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.aeroports.len() < 2 {
            errors.add("aeroports", "Select at least two airports to compare");
        }
        for code in &self.aeroports {
            if let Err(e) = PathSegment::parse("aeroports", code) {
                errors.fields.extend(e.fields);
            }
        }
        errors.into_result()
    }
}
