//! HTTP request handlers.

pub mod admin_products;
pub mod auth;
pub mod products;
