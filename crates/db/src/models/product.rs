//! Product models: the list projection, the full loosely-typed record,
//! and the write payload.
//!
//! Category tables are independently schema'd, so full rows travel as
//! JSON maps (`to_jsonb` fetches) and the typed accessors here are the
//! only sanctioned way to read common fields out of them.

use serde::Serialize;
use serde_json::{Map, Value};

use safegear_core::registry::Category;
use safegear_core::specs::{self, Spec};
use safegear_core::types::DbId;
use safegear_core::{media, specs::extract_specs};

/// Fixed list projection of a product row, tagged with its resolved
/// category.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub id: DbId,
    pub slug: String,
    pub image: Option<String>,
    pub product_name: Option<String>,
    pub product_code: Option<String>,
    pub category: Category,
}

impl ProductSummary {
    /// Project a raw row fetched from `table_category`'s table.
    ///
    /// The stored category value wins when it resolves; otherwise the row
    /// is tagged with the table it came from. A missing product code
    /// falls back to the first description line.
    pub fn from_row(row: &Map<String, Value>, table_category: Category) -> Self {
        let category = row
            .get("category")
            .and_then(Value::as_str)
            .and_then(Category::normalize)
            .unwrap_or(table_category);

        let product_code = match string_field(row, "product_code") {
            Some(code) => Some(code),
            None => row
                .get("description")
                .map(specs::parse_description)
                .and_then(|lines| lines.into_iter().next()),
        };

        ProductSummary {
            id: row.get("id").and_then(Value::as_i64).unwrap_or_default(),
            slug: string_field(row, "slug").unwrap_or_default(),
            image: string_field(row, "image"),
            product_name: string_field(row, "product_name"),
            product_code,
            category,
        }
    }

    /// Case-insensitive search haystack: name, code, slug, category key
    /// and label concatenated.
    fn haystack(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.product_name.as_deref().unwrap_or(""),
            self.product_code.as_deref().unwrap_or(""),
            self.slug,
            self.category.key(),
            self.category.label(),
        )
        .to_lowercase()
    }
}

/// Apply the optional exact-category filter and free-text search to an
/// already-fetched list, preserving its order.
pub fn filter_and_search(
    rows: Vec<ProductSummary>,
    category: Option<Category>,
    query: Option<&str>,
) -> Vec<ProductSummary> {
    let needle = query.map(str::trim).filter(|q| !q.is_empty()).map(str::to_lowercase);
    rows.into_iter()
        .filter(|r| category.is_none_or(|c| r.category == c))
        .filter(|r| {
            needle
                .as_deref()
                .is_none_or(|q| r.haystack().contains(q))
        })
        .collect()
}

/// A full product row from one category table, plus the category it
/// resolved to.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub category: Category,
    pub row: Map<String, Value>,
}

impl ProductRecord {
    /// Wrap a `to_jsonb` row fetched from `table_category`'s table,
    /// normalizing the stored category with the table as fallback.
    pub fn from_row_value(table_category: Category, value: Value) -> Self {
        let row = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let category = row
            .get("category")
            .and_then(Value::as_str)
            .and_then(Category::normalize)
            .unwrap_or(table_category);
        ProductRecord { category, row }
    }

    pub fn id(&self) -> DbId {
        self.row.get("id").and_then(Value::as_i64).unwrap_or_default()
    }

    pub fn slug(&self) -> &str {
        self.row.get("slug").and_then(Value::as_str).unwrap_or("")
    }

    pub fn product_name(&self) -> Option<String> {
        string_field(&self.row, "product_name")
    }

    pub fn product_code(&self) -> Option<String> {
        string_field(&self.row, "product_code")
    }

    pub fn model_name(&self) -> Option<String> {
        string_field(&self.row, "model_name")
    }

    pub fn image(&self) -> Option<String> {
        string_field(&self.row, "image")
    }

    /// Ordered description lines parsed from the stored form.
    pub fn description_lines(&self) -> Vec<String> {
        self.row
            .get("description")
            .map(specs::parse_description)
            .unwrap_or_default()
    }

    /// Ordered detail media URLs parsed from the stored form.
    pub fn detail_media(&self) -> Vec<String> {
        self.row
            .get("detail_images")
            .map(media::parse_media_list)
            .unwrap_or_default()
    }

    /// Resolved `(label, value)` spec list for this record's category.
    pub fn specs(&self) -> Vec<Spec> {
        extract_specs(&self.row, self.category)
    }
}

/// Write payload for an insert or full-row update. `specs` covers every
/// declared field of the category (`None` clears the column), produced by
/// `safegear_core::product::resolve_specs`.
#[derive(Debug, Clone)]
pub struct ProductWrite {
    pub category: Category,
    pub slug: String,
    pub product_name: String,
    pub product_code: Option<String>,
    pub image: Option<String>,
    pub detail_images: String,
    pub description: Option<String>,
    pub model_name: Option<String>,
    pub specs: Vec<(&'static str, Option<String>)>,
}

fn string_field(row: &Map<String, Value>, key: &str) -> Option<String> {
    row.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
