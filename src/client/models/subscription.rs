//! Subscription models

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::validation::{Validate, check_required};

/// Body of `POST /abonnements/souscrire`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    pub id_compagnie: String,
    pub id_forfait: String,
}

impl Validate for SubscriptionRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_required(&mut errors, "id_compagnie", &self.id_compagnie, "Company");
        check_required(&mut errors, "id_forfait", &self.id_forfait, "Plan");
        errors.into_result()
    }
}
