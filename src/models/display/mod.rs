//! Display model implementations for table and JSON output

mod baggage;
mod cache;
mod common;
mod session;

pub use baggage::{BaggageDisplay, StationDisplay, render_timeline};
pub use cache::CacheStatsDisplay;
pub use session::{ProfileDisplay, RouteDisplay, SessionDisplay};
