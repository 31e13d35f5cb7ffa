//! Application routes and login redirects
//!
//! Commands map onto the routes of the web dashboard so that the same
//! protection rules apply: everything under `/dashboard` needs a session.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub mod guard;

pub use guard::ProtectedRoute;

/// Login page
pub const LOGIN_PATH: &str = "/login";

/// Where an ended session sends the user
pub const LOGIN_EXPIRED_PATH: &str = "/login?expired=true";

/// Fallback for unknown paths
pub const HOME_PATH: &str = "/";

/// Query parameter carrying the post-login destination
pub const REDIRECT_PARAM: &str = "redirectTo";

/// Root of the protected subtree
const DASHBOARD_PATH: &str = "/dashboard";

/// A known application route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub title: &'static str,
    /// CLI command that opens this route
    pub command: &'static str,
    pub protected: bool,
}

const fn public(path: &'static str, title: &'static str, command: &'static str) -> Route {
    Route {
        path,
        title,
        command,
        protected: false,
    }
}

const fn protected(path: &'static str, title: &'static str, command: &'static str) -> Route {
    Route {
        path,
        title,
        command,
        protected: true,
    }
}

pub const ROUTES: &[Route] = &[
    public("/", "Home", "aerocast status"),
    public("/login", "Sign in", "aerocast login"),
    public("/register", "Register", "aerocast register"),
    protected("/dashboard", "Dashboard", "aerocast dashboard"),
    protected("/dashboard/bagages/suivi", "Baggage tracking", "aerocast baggage track"),
    protected("/dashboard/bagages/scanner", "Baggage scanner", "aerocast baggage scan"),
    protected("/dashboard/bagages/incidents", "Baggage incidents", "aerocast baggage incident"),
    protected("/dashboard/meteo/predictions", "Weather forecasts", "aerocast meteo predictions"),
    protected("/dashboard/meteo/alertes", "Weather alerts", "aerocast meteo alerts"),
    protected("/dashboard/meteo/aeroports", "Airports", "aerocast airport list"),
    protected("/dashboard/statistiques", "Statistics", "aerocast admin stats"),
    protected("/dashboard/settings", "Settings", "aerocast dashboard"),
    protected("/dashboard/profile", "Profile", "aerocast profile"),
];

/// Drop any query string and trailing slash
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or("");
    match path.trim_end_matches('/') {
        "" => HOME_PATH,
        trimmed => trimmed,
    }
}

/// Look up a route; unknown paths resolve to home
pub fn resolve(path: &str) -> &'static Route {
    let path = normalize(path);
    ROUTES
        .iter()
        .find(|r| r.path == path)
        .unwrap_or(&ROUTES[0])
}

/// Whether `path` lies in the protected subtree
pub fn is_protected(path: &str) -> bool {
    let path = normalize(path);
    path == DASHBOARD_PATH
        || path
            .strip_prefix(DASHBOARD_PATH)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Characters left alone by JavaScript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Login location that returns to `path` afterwards
pub fn login_redirect(path: &str) -> String {
    let encoded = utf8_percent_encode(path, URI_COMPONENT);
    format!("{}?{}={}", LOGIN_PATH, REDIRECT_PARAM, encoded)
}

/// Extract the post-login destination from a login location.
///
/// Only same-site paths are honoured.
pub fn redirect_target(location: &str) -> Option<String> {
    let (_, query) = location.split_once('?')?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == REDIRECT_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|target| is_local_path(target))
}

/// Accept a destination given either raw (`/dashboard`) or encoded
/// (`%2Fdashboard`).
pub fn decode_redirect(value: &str) -> Option<String> {
    let query = format!("{}={}", REDIRECT_PARAM, value);
    url::form_urlencoded::parse(query.as_bytes())
        .next()
        .map(|(_, v)| v.into_owned())
        .filter(|target| is_local_path(target))
}

fn is_local_path(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_encodes_path() {
        assert_eq!(
            login_redirect("/dashboard/bagages/suivi"),
            "/login?redirectTo=%2Fdashboard%2Fbagages%2Fsuivi"
        );
        assert_eq!(login_redirect("/dashboard"), "/login?redirectTo=%2Fdashboard");
    }

    #[test]
    fn test_login_redirect_matches_uri_component_encoding() {
        let location = login_redirect("/dashboard/a b(1)+é");
        assert_eq!(
            location,
            "/login?redirectTo=%2Fdashboard%2Fa%20b(1)%2B%C3%A9"
        );
        assert_eq!(
            redirect_target(&location).as_deref(),
            Some("/dashboard/a b(1)+é")
        );
    }

    #[test]
    fn test_redirect_target_round_trip() {
        let location = login_redirect("/dashboard/meteo/alertes");
        assert_eq!(
            redirect_target(&location).as_deref(),
            Some("/dashboard/meteo/alertes")
        );
    }

    #[test]
    fn test_redirect_target_missing() {
        assert_eq!(redirect_target(LOGIN_EXPIRED_PATH), None);
        assert_eq!(redirect_target("/login"), None);
    }

    #[test]
    fn test_redirect_target_rejects_foreign_hosts() {
        assert_eq!(redirect_target("/login?redirectTo=https%3A%2F%2Fevil.example"), None);
        assert_eq!(redirect_target("/login?redirectTo=%2F%2Fevil.example"), None);
    }

    #[test]
    fn test_decode_redirect_accepts_raw_and_encoded() {
        assert_eq!(decode_redirect("/dashboard").as_deref(), Some("/dashboard"));
        assert_eq!(
            decode_redirect("%2Fdashboard%2Fprofile").as_deref(),
            Some("/dashboard/profile")
        );
        assert_eq!(decode_redirect("dashboard"), None);
    }

    #[test]
    fn test_is_protected() {
        assert!(is_protected("/dashboard"));
        assert!(is_protected("/dashboard/"));
        assert!(is_protected("/dashboard/bagages/suivi"));
        assert!(is_protected("/dashboard?tab=1"));
        assert!(!is_protected("/dashboards"));
        assert!(!is_protected("/login"));
        assert!(!is_protected("/"));
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        assert_eq!(resolve("/dashboard/profile").title, "Profile");
        assert_eq!(resolve("/register/").path, "/register");
        assert_eq!(resolve("/nowhere").path, HOME_PATH);
        assert_eq!(resolve("").path, HOME_PATH);
    }

    #[test]
    fn test_route_table_protection_matches_prefix_rule() {
        for route in ROUTES {
            assert_eq!(route.protected, is_protected(route.path), "{}", route.path);
        }
    }
}
