pub mod admin;
pub mod auth;
pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /products                                 catalog listing (public)
/// /products/{slug}                          product detail (public)
///
/// /auth/login                               admin login (public)
///
/// /admin/products                           create (multipart, admin only)
/// /admin/products/{category}/{id}           update, delete (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
}
