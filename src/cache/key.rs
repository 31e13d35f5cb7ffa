//! Query keys and their SHA-256 cache keys

use std::fmt;

use sha2::{Digest, Sha256};

/// Identifies one read query, e.g. `["bagages", "detail", "42"]`.
///
/// The first part is the scope (endpoint family). Mutations invalidate
/// every cached entry that shares their scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    parts: Vec<String>,
}

impl QueryKey {
    pub fn new(scope: &'static str, kind: &'static str) -> Self {
        Self {
            parts: vec![scope.to_string(), kind.to_string()],
        }
    }

    /// Append a variable part (ID, code, ...)
    pub fn with(mut self, part: impl Into<String>) -> Self {
        self.parts.push(part.into());
        self
    }

    pub fn scope(&self) -> &str {
        &self.parts[0]
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.parts.join(","))
    }
}

/// Generate a deterministic cache key from a query key, the owning user and
/// query parameters.
///
/// Parameters are sorted so their order does not matter.
pub fn cache_key(key: &QueryKey, user_id: Option<&str>, params: &[(&str, &str)]) -> String {
    let mut hasher = Sha256::new();

    for part in key.parts() {
        hasher.update(part.as_bytes());
        hasher.update(b"\x1f");
    }
    hasher.update(b"|");

    if let Some(user) = user_id {
        hasher.update(user.as_bytes());
    }
    hasher.update(b"|");

    let mut sorted_params: Vec<_> = params.iter().collect();
    sorted_params.sort();

    for (k, v) in sorted_params {
        hasher.update(k.as_bytes());
        hasher.update(b"=");
        hasher.update(v.as_bytes());
        hasher.update(b"&");
    }

    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_key_parts() {
        let key = QueryKey::new("bagages", "detail").with("42");
        assert_eq!(key.scope(), "bagages");
        assert_eq!(key.to_string(), "[bagages,detail,42]");
    }

    #[test]
    fn test_cache_key_deterministic() {
        let key = QueryKey::new("admin", "logs");
        let key1 = cache_key(&key, Some("1"), &[("limit", "10"), ("level", "error")]);
        let key2 = cache_key(&key, Some("1"), &[("level", "error"), ("limit", "10")]);
        assert_eq!(key1, key2);
        assert_eq!(key1.len(), 64);
    }

    #[test]
    fn test_cache_key_distinguishes_parts() {
        let a = cache_key(&QueryKey::new("bagages", "detail").with("1"), None, &[]);
        let b = cache_key(&QueryKey::new("bagages", "detail").with("2"), None, &[]);
        assert_ne!(a, b);

        // joining must not make ["ab","c"] collide with ["a","bc"]
        let c = cache_key(&QueryKey::new("meteo", "x").with("ab").with("c"), None, &[]);
        let d = cache_key(&QueryKey::new("meteo", "x").with("a").with("bc"), None, &[]);
        assert_ne!(c, d);
    }

    #[test]
    fn test_cache_key_per_user() {
        let key = QueryKey::new("auth", "profile");
        assert_ne!(
            cache_key(&key, Some("1"), &[]),
            cache_key(&key, Some("2"), &[])
        );
    }
}
