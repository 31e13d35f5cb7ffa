//! User administration models

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::validation::Validate;

/// Roles the platform assigns
pub const KNOWN_ROLES: &[&str] = &["user", "admin", "compagnie", "atc"];

/// Body of `PATCH /utilisateurs/{id}/role`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleUpdate {
    pub role: String,
}

impl Validate for RoleUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !KNOWN_ROLES.contains(&self.role.as_str()) {
            errors.add(
                "role",
                format!("Unknown role '{}' (expected one of: {})", self.role, KNOWN_ROLES.join(", ")),
            );
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_update_validation() {
        assert!(RoleUpdate { role: "admin".into() }.validate().is_ok());
        assert!(RoleUpdate { role: "root".into() }.validate().is_err());
    }
}
