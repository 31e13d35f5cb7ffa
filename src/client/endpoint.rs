//! REST endpoint paths under `/api/v1`

use std::fmt;

use url::Url;

use crate::client::models::PathSegment;
use crate::error::{ConfigError, Result};

const API_PREFIX: [&str; 2] = ["api", "v1"];

/// Path of one REST endpoint, relative to the API base URL.
///
/// Fixed parts are literals; variable parts are [`PathSegment`]s and are
/// percent-encoded when the URL is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
    trailing_slash: bool,
}

impl Endpoint {
    /// `/api/v1/<family>`
    pub fn new(family: &'static str) -> Self {
        let mut segments: Vec<String> = API_PREFIX.iter().map(|s| s.to_string()).collect();
        segments.push(family.to_string());
        Self {
            segments,
            trailing_slash: false,
        }
    }

    pub fn path(mut self, literal: &'static str) -> Self {
        self.segments.push(literal.to_string());
        self
    }

    pub fn param(mut self, segment: &PathSegment) -> Self {
        self.segments.push(segment.as_str().to_string());
        self
    }

    /// Keep a trailing `/` (the airport list is served at `/aeroports/`)
    pub fn trailing_slash(mut self) -> Self {
        self.trailing_slash = true;
        self
    }

    /// Resolve against the API base URL, keeping any base path prefix
    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ConfigError::Invalid(format!("API base URL cannot carry a path: {}", base))
            })?;
            path.pop_if_empty();
            path.extend(self.segments.iter());
            if self.trailing_slash {
                path.push("");
            }
        }
        Ok(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))?;
        if self.trailing_slash {
            f.write_str("/")?;
        }
        Ok(())
    }
}
