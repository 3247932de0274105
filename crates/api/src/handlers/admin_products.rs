//! Handlers for the admin `/admin/products` resource.
//!
//! Create and update accept one multipart form: common text fields, a
//! `specs` JSON object, an optional main `image` file, any number of
//! `detail_images` files, and `detail_keep_urls` naming the existing
//! detail URLs to retain. The pipeline is upload-then-write; blob keys
//! uploaded within one request are tracked and removed again if a later
//! step fails, since the row write and the uploads are not atomic.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Map, Value};

use safegear_core::error::CoreError;
use safegear_core::media::{merge_detail_media, parse_media_list, serialize_media_list};
use safegear_core::naming::make_file_key;
use safegear_core::product::{resolve_specs, ProductInput};
use safegear_core::registry::Category;
use safegear_core::types::DbId;
use safegear_db::models::product::ProductWrite;
use safegear_db::repositories::ProductRepo;
use safegear_storage::ObjectStorage;

use crate::error::{AppError, AppResult};
use crate::handlers::products::ProductDetail;
use crate::session::AdminSession;
use crate::state::AppState;

/// One file field pulled out of the multipart form.
struct UploadedFile {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// Decoded admin product form.
struct ProductForm {
    category_raw: String,
    input: ProductInput,
    specs_raw: Map<String, Value>,
    current_image: Option<String>,
    keep_urls: Vec<String>,
    main_image: Option<UploadedFile>,
    detail_files: Vec<UploadedFile>,
}

fn non_empty(s: String) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

async fn parse_product_form(mut multipart: Multipart) -> Result<ProductForm, AppError> {
    let mut category_raw = String::new();
    let mut slug = String::new();
    let mut product_name = String::new();
    let mut product_code = None;
    let mut description = String::new();
    let mut model_name = None;
    let mut specs_raw = Map::new();
    let mut current_image = None;
    let mut keep_urls = Vec::new();
    let mut main_image = None;
    let mut detail_files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" | "detail_images" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                // Browsers submit empty file inputs as zero-byte parts.
                if bytes.is_empty() {
                    continue;
                }
                let file = UploadedFile {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                };
                if name == "image" {
                    main_image = Some(file);
                } else {
                    detail_files.push(file);
                }
            }
            _ => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                match name.as_str() {
                    "category" => category_raw = text.trim().to_string(),
                    "slug" => slug = text.trim().to_string(),
                    "product_name" => product_name = text.trim().to_string(),
                    "product_code" => product_code = non_empty(text),
                    "description" => description = text,
                    "model_name" => model_name = non_empty(text),
                    "current_image" => current_image = non_empty(text),
                    "specs" => {
                        // A malformed specs payload degrades to "no specs",
                        // matching the form's empty-map default.
                        specs_raw = serde_json::from_str::<Value>(&text)
                            .ok()
                            .and_then(|v| v.as_object().cloned())
                            .unwrap_or_default();
                    }
                    "detail_keep_urls" => {
                        keep_urls = parse_media_list(&Value::String(text));
                    }
                    _ => {} // ignore unknown fields
                }
            }
        }
    }

    Ok(ProductForm {
        category_raw,
        input: ProductInput {
            slug,
            product_name,
            product_code,
            description,
            model_name,
        },
        specs_raw,
        current_image,
        keep_urls,
        main_image,
        detail_files,
    })
}

/// Resolve the form's category against the registry, admitting only
/// writable categories.
fn writable_category(raw: &str) -> Result<Category, AppError> {
    Category::parse(raw)
        .filter(|c| c.is_writable())
        .ok_or_else(|| AppError::Core(CoreError::UnknownCategory(raw.to_string())))
}

/// Best-effort removal of blobs uploaded earlier in a failed request.
async fn cleanup_uploads(storage: &Arc<dyn ObjectStorage>, keys: &[String]) {
    for key in keys {
        if let Err(e) = storage.delete(key).await {
            tracing::warn!(key, error = %e, "Failed to clean up orphaned upload");
        }
    }
}

/// Upload the form's files and assemble the full write payload.
///
/// Returns the payload together with the storage keys it uploaded, so a
/// failing row write can clean them up.
async fn build_write(
    state: &AppState,
    category: Category,
    form: &ProductForm,
) -> Result<(ProductWrite, Vec<String>), AppError> {
    form.input.validate_required()?;
    let specs = resolve_specs(category, &form.specs_raw)?;

    let mut uploaded_keys: Vec<String> = Vec::new();

    // Upload failures abort the request; anything stored so far is
    // removed again before the error surfaces.
    macro_rules! try_or_cleanup {
        ($expr:expr) => {
            match $expr {
                Ok(v) => v,
                Err(e) => {
                    cleanup_uploads(&state.storage, &uploaded_keys).await;
                    return Err(AppError::Core(CoreError::Upload(e.to_string())));
                }
            }
        };
    }

    let slug = &form.input.slug;

    let image = match &form.main_image {
        Some(file) => {
            let key = make_file_key(&format!("{}/main", category.key()), slug, &file.filename);
            let url =
                try_or_cleanup!(state.storage.put(&key, &file.bytes, &file.content_type).await);
            uploaded_keys.push(key);
            Some(url)
        }
        None => form.current_image.clone(),
    };

    let mut new_urls = Vec::new();
    for file in &form.detail_files {
        let key = make_file_key(&format!("{}/detail", category.key()), slug, &file.filename);
        let url = try_or_cleanup!(state.storage.put(&key, &file.bytes, &file.content_type).await);
        uploaded_keys.push(key);
        new_urls.push(url);
    }

    let detail_images = serialize_media_list(&merge_detail_media(&form.keep_urls, &new_urls));

    let write = ProductWrite {
        category,
        slug: form.input.slug.clone(),
        product_name: form.input.product_name.clone(),
        product_code: form.input.product_code.clone(),
        image,
        detail_images,
        description: safegear_core::specs::normalize_description(&form.input.description),
        model_name: form.input.model_name.clone(),
        specs,
    };

    Ok((write, uploaded_keys))
}

/// POST /api/v1/admin/products
pub async fn create(
    _session: AdminSession,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Value>)> {
    let form = parse_product_form(multipart).await?;
    let category = writable_category(&form.category_raw)?;
    let (write, uploaded_keys) = build_write(&state, category, &form).await?;

    let id = match ProductRepo::insert(&state.pool, &write).await {
        Ok(id) => id,
        Err(e) => {
            cleanup_uploads(&state.storage, &uploaded_keys).await;
            return Err(e.into());
        }
    };

    tracing::info!(id, category = category.key(), slug = %write.slug, "Product created");
    Ok((StatusCode::CREATED, Json(json!({ "ok": true, "id": id }))))
}

/// PUT /api/v1/admin/products/{category}/{id}
///
/// The path category names the table the update targets; it must be the
/// table the record currently lives in. A mismatch matches zero rows and
/// reports not-found — records do not move between categories.
pub async fn update(
    _session: AdminSession,
    State(state): State<AppState>,
    Path((category_raw, id)): Path<(String, DbId)>,
    multipart: Multipart,
) -> AppResult<Json<ProductDetail>> {
    let category = writable_category(&category_raw)?;
    let form = parse_product_form(multipart).await?;
    let (write, uploaded_keys) = build_write(&state, category, &form).await?;

    let updated = match ProductRepo::update(&state.pool, id, &write).await {
        Ok(updated) => updated,
        Err(e) => {
            cleanup_uploads(&state.storage, &uploaded_keys).await;
            return Err(e.into());
        }
    };
    if !updated {
        cleanup_uploads(&state.storage, &uploaded_keys).await;
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }));
    }

    let record = ProductRepo::find_by_id(&state.pool, category, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;

    tracing::info!(id, category = category.key(), "Product updated");
    Ok(Json(ProductDetail::from(&record)))
}

/// DELETE /api/v1/admin/products/{category}/{id}
///
/// Idempotent: deleting a missing id succeeds as a no-op.
pub async fn delete(
    _session: AdminSession,
    State(state): State<AppState>,
    Path((category_raw, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let category = writable_category(&category_raw)?;
    let existed = ProductRepo::delete(&state.pool, category, id).await?;
    tracing::info!(id, category = category.key(), existed, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
