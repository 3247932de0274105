//! HTTP surface for the safegear catalog: public read endpoints and the
//! password-gated admin console API.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod session;
pub mod state;
