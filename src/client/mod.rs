//! AeroCast API client

pub mod api;
pub mod endpoint;
pub mod http;
pub mod mock;
pub mod models;

pub use api::{
    AdminApi, AirportApi, AuthApi, B2bApi, BaggageApi, MeteoApi, QrApi, SubscriptionApi, UserApi,
};
pub use http::AeroCastClient;
pub use mock::MockAuthClient;
