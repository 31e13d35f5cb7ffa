//! API trait definitions, one per endpoint family
//!
//! - [`AuthApi`] - sign-in, registration, profile
//! - [`BaggageApi`] - baggage tracking
//! - [`MeteoApi`] - weather predictions and alerts
//! - [`AirportApi`] - airport reference data
//! - [`AdminApi`] - platform administration
//! - [`SubscriptionApi`] - airline plans and billing
//! - [`B2bApi`] - partner batch endpoints
//! - [`QrApi`] - baggage QR codes
//! - [`UserApi`] - user roles
//!
//! Each module also carries the query keys of its read operations.

pub mod admin;
pub mod airport;
pub mod auth;
pub mod b2b;
pub mod baggage;
pub mod meteo;
pub mod qr;
pub mod subscription;
pub mod user;

pub use admin::AdminApi;
pub use airport::AirportApi;
pub use auth::AuthApi;
pub use b2b::B2bApi;
pub use baggage::BaggageApi;
pub use meteo::MeteoApi;
pub use qr::QrApi;
pub use subscription::SubscriptionApi;
pub use user::UserApi;
