//! Route definitions for the public `/products` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET /          -> merged catalog listing (?category=, ?q=)
/// GET /{slug}    -> product detail by slug
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list))
        .route("/{slug}", get(products::get_by_slug))
}
