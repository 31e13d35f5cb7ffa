//! Session, profile and route display models

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;

use super::common::or_dash;
use crate::client::models::User;
use crate::output::formatters::{format_epoch_local, format_relative};
use crate::router::Route;
use crate::session::ActiveSession;

/// `aerocast status` view
#[derive(Debug, Clone, Serialize)]
pub struct SessionDisplay {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionDisplay {
    pub fn signed_out() -> Self {
        Self {
            authenticated: false,
            user: None,
            expires_at: None,
        }
    }

    /// Lines for the pretty output
    pub fn lines(&self, now: DateTime<Utc>) -> Vec<String> {
        let Some(ref user) = self.user else {
            return vec!["Not signed in. Run `aerocast login` to start a session.".to_string()];
        };

        let mut lines = vec![
            format!("Signed in as {} <{}>", user.name, user.email),
            format!("Role: {}", or_dash(user.role.as_deref())),
        ];
        if let Some(expires_at) = self.expires_at {
            lines.push(format!(
                "Session expires: {} ({})",
                format_epoch_local(expires_at.timestamp()),
                format_relative(expires_at, now)
            ));
        }
        lines
    }
}

impl From<&ActiveSession> for SessionDisplay {
    fn from(active: &ActiveSession) -> Self {
        Self {
            authenticated: true,
            user: Some(active.user.clone()),
            expires_at: active.claims.expires_at(),
        }
    }
}

/// Profile row
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ProfileDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "ROLE")]
    pub role: String,

    #[tabled(rename = "PASSPORT")]
    pub numero_passport: String,
}

impl From<&User> for ProfileDisplay {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: or_dash(user.role.as_deref()),
            numero_passport: or_dash(user.numero_passport.as_deref()),
        }
    }
}

/// Dashboard section row
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RouteDisplay {
    #[tabled(rename = "SECTION")]
    pub title: String,

    #[tabled(rename = "PATH")]
    pub path: String,

    #[tabled(rename = "COMMAND")]
    pub command: String,
}

impl From<&Route> for RouteDisplay {
    fn from(route: &Route) -> Self {
        Self {
            title: route.title.to_string(),
            path: route.path.to_string(),
            command: route.command.to_string(),
        }
    }
}
