//! Display models for CLI output
//!
//! Converts API and session types into CLI-friendly rows and views.

pub mod display;

pub use display::{
    BaggageDisplay, CacheStatsDisplay, ProfileDisplay, RouteDisplay, SessionDisplay,
    StationDisplay, render_timeline,
};
