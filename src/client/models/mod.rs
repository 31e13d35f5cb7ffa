//! AeroCast API data models
//!
//! Request bodies implement [`Validate`](crate::validation::Validate) and are
//! checked before they are sent. Responses the front end never typed are
//! carried as [`ApiDocument`].

mod admin;
mod auth;
mod b2b;
mod baggage;
mod common;
mod meteo;
mod qr;
mod subscription;
mod user;

pub use admin::{LogQuery, MaintenanceRequest, StatisticsQuery};
pub use auth::{
    AuthResponse, LoginCredentials, RefreshResponse, RegisterCredentials, RegisterRequest, User,
};
pub use b2b::{BatchScanRequest, BatchWeatherRequest, WebhookConfig};
pub use baggage::{
    Baggage, BaggageStation, BaggageStatus, IncidentReport, RegisterBaggageRequest, ScanRequest,
};
pub use common::{ApiDocument, PathSegment};
pub use meteo::CompareQuery;
pub use qr::{QrGenerateRequest, QrImage};
pub use subscription::SubscriptionRequest;
pub use user::RoleUpdate;
