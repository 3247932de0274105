//! Route definitions for the `/admin` resource.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::admin_products;
use crate::state::AppState;

/// Routes mounted at `/admin` (all require the admin session cookie).
///
/// ```text
/// POST   /products                    -> create product (multipart)
/// PUT    /products/{category}/{id}    -> update product (multipart)
/// DELETE /products/{category}/{id}    -> delete product
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", post(admin_products::create))
        .route(
            "/products/{category}/{id}",
            put(admin_products::update).delete(admin_products::delete),
        )
}
