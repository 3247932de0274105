//! Handlers for the public `/products` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use safegear_core::media::is_video_url;
use safegear_core::registry::Category;
use safegear_core::specs::Spec;
use safegear_core::types::DbId;
use safegear_db::models::product::{filter_and_search, ProductRecord, ProductSummary};
use safegear_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// One row of the public product list.
#[derive(Debug, Serialize)]
pub struct ProductListItem {
    pub id: DbId,
    pub slug: String,
    pub image: Option<String>,
    pub product_name: Option<String>,
    pub product_code: Option<String>,
    pub category: &'static str,
    pub category_label: &'static str,
}

impl From<ProductSummary> for ProductListItem {
    fn from(s: ProductSummary) -> Self {
        ProductListItem {
            id: s.id,
            slug: s.slug,
            image: s.image,
            product_name: s.product_name,
            product_code: s.product_code,
            category: s.category.key(),
            category_label: s.category.label(),
        }
    }
}

/// One detail-media entry with its rendering treatment.
#[derive(Debug, Serialize)]
pub struct DetailMediaItem {
    pub url: String,
    pub is_video: bool,
}

/// Full public view of one product.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    pub id: DbId,
    pub slug: String,
    pub category: &'static str,
    pub category_label: &'static str,
    pub product_name: Option<String>,
    pub product_code: Option<String>,
    pub model_name: Option<String>,
    pub image: Option<String>,
    pub description: Vec<String>,
    pub detail_media: Vec<DetailMediaItem>,
    pub specs: Vec<Spec>,
}

impl From<&ProductRecord> for ProductDetail {
    fn from(record: &ProductRecord) -> Self {
        ProductDetail {
            id: record.id(),
            slug: record.slug().to_string(),
            category: record.category.key(),
            category_label: record.category.label(),
            product_name: record.product_name(),
            product_code: record.product_code(),
            model_name: record.model_name(),
            image: record.image(),
            description: record.description_lines(),
            detail_media: record
                .detail_media()
                .into_iter()
                .map(|url| DetailMediaItem {
                    is_video: is_video_url(&url),
                    url,
                })
                .collect(),
            specs: record.specs(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// GET /api/v1/products
///
/// Lists the whole catalog across all active category tables, with an
/// optional exact-category filter and case-insensitive text search. A
/// filter value outside the registry matches nothing rather than erroring.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<ProductListItem>>>> {
    let rows = ProductRepo::list_all(&state.pool).await;

    let category_filter = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let filtered = match category_filter {
        Some(raw) => match Category::parse(raw) {
            Some(cat) => filter_and_search(rows, Some(cat), params.q.as_deref()),
            None => Vec::new(),
        },
        None => filter_and_search(rows, None, params.q.as_deref()),
    };

    Ok(Json(DataResponse {
        data: filtered.into_iter().map(ProductListItem::from).collect(),
    }))
}

/// GET /api/v1/products/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ProductDetail>> {
    let record = ProductRepo::find_by_slug(&state.pool, &slug)
        .await
        .ok_or_else(|| AppError::NotFound(format!("No product with slug '{slug}'")))?;
    Ok(Json(ProductDetail::from(&record)))
}
