//! Repository for the per-category product tables.
//!
//! Every query here is assembled with `format!` over identifiers that
//! come exclusively from the static registry (table names, canonical
//! column names) — user input only ever reaches the database as a bind
//! parameter.

use serde_json::Value;
use sqlx::PgPool;

use safegear_core::registry::Category;
use safegear_core::types::DbId;

use crate::models::product::{ProductRecord, ProductSummary, ProductWrite};

/// Postgres error 42703: undefined_column. Raised when a legacy table
/// lacks the optional `category` column.
fn is_undefined_column(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("42703"))
}

/// Provides the multi-table catalog read/write operations.
pub struct ProductRepo;

impl ProductRepo {
    /// Fetch every row of one category table as summaries, newest id first.
    ///
    /// Rows travel as `to_jsonb` maps because the tables are independently
    /// schema'd; the fixed projection is applied when building the summary.
    async fn fetch_table(
        pool: &PgPool,
        category: Category,
    ) -> Result<Vec<ProductSummary>, sqlx::Error> {
        let sql = format!(
            "SELECT to_jsonb(t) FROM {} t ORDER BY id DESC",
            category.table()
        );
        let rows: Vec<Value> = sqlx::query_scalar(&sql).fetch_all(pool).await?;
        Ok(rows
            .iter()
            .filter_map(Value::as_object)
            .map(|row| ProductSummary::from_row(row, category))
            .collect())
    }

    /// List the whole catalog across all active category tables.
    ///
    /// Table reads run concurrently; a failing table is logged and
    /// contributes zero rows so the rest of the catalog still renders.
    /// The merged list is sorted by numeric id descending — a display
    /// heuristic only, since ids are per-table and can collide across
    /// tables.
    pub async fn list_all(pool: &PgPool) -> Vec<ProductSummary> {
        let fetches = Category::ACTIVE.map(|cat| Self::fetch_table(pool, cat));
        let results = futures::future::join_all(fetches).await;

        let mut merged = Vec::new();
        for (category, result) in Category::ACTIVE.into_iter().zip(results) {
            match result {
                Ok(rows) => merged.extend(rows),
                Err(e) => {
                    tracing::warn!(table = category.table(), error = %e, "Catalog table read failed; omitting its rows");
                }
            }
        }

        merged.sort_by(|a, b| b.id.cmp(&a.id));
        merged
    }

    /// Locate one product by slug, probing tables in registry order and
    /// returning the first hit. Probe failures are logged and skipped.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Option<ProductRecord> {
        for category in Category::PROBE {
            let sql = format!(
                "SELECT to_jsonb(t) FROM {} t WHERE slug = $1 LIMIT 1",
                category.table()
            );
            match sqlx::query_scalar::<_, Value>(&sql)
                .bind(slug)
                .fetch_optional(pool)
                .await
            {
                Ok(Some(row)) => return Some(ProductRecord::from_row_value(category, row)),
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!(table = category.table(), error = %e, "Slug probe failed");
                    continue;
                }
            }
        }
        None
    }

    /// Fetch one product by id from the given category's table.
    pub async fn find_by_id(
        pool: &PgPool,
        category: Category,
        id: DbId,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        let sql = format!(
            "SELECT to_jsonb(t) FROM {} t WHERE id = $1",
            category.table()
        );
        let row: Option<Value> = sqlx::query_scalar(&sql).bind(id).fetch_optional(pool).await?;
        Ok(row.map(|v| ProductRecord::from_row_value(category, v)))
    }

    /// Column/value pairs for a write, in bind order. `with_category`
    /// controls whether the optional `category` column is included.
    fn write_pairs(input: &ProductWrite, with_category: bool) -> Vec<(&str, Option<String>)> {
        let mut pairs: Vec<(&str, Option<String>)> = vec![
            ("slug", Some(input.slug.clone())),
            ("product_name", Some(input.product_name.clone())),
            ("product_code", input.product_code.clone()),
            ("image", input.image.clone()),
            ("detail_images", Some(input.detail_images.clone())),
            ("description", input.description.clone()),
            ("model_name", input.model_name.clone()),
        ];
        if with_category {
            pairs.push(("category", Some(input.category.key().to_string())));
        }
        for (key, value) in &input.specs {
            pairs.push((key, value.clone()));
        }
        pairs
    }

    async fn insert_inner(
        pool: &PgPool,
        input: &ProductWrite,
        with_category: bool,
    ) -> Result<DbId, sqlx::Error> {
        let pairs = Self::write_pairs(input, with_category);
        let columns: Vec<&str> = pairs.iter().map(|(c, _)| *c).collect();
        let binds: Vec<String> = (1..=pairs.len()).map(|i| format!("${i}")).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
            input.category.table(),
            columns.join(", "),
            binds.join(", ")
        );

        let mut query = sqlx::query_scalar::<_, DbId>(&sql);
        for (_, value) in &pairs {
            query = query.bind(value.clone());
        }
        query.fetch_one(pool).await
    }

    /// Insert a product row, returning the new id.
    ///
    /// If the table turns out to lack the `category` column (42703), the
    /// insert is retried exactly once with that column omitted. A second
    /// failure surfaces as-is.
    pub async fn insert(pool: &PgPool, input: &ProductWrite) -> Result<DbId, sqlx::Error> {
        match Self::insert_inner(pool, input, true).await {
            Err(e) if is_undefined_column(&e) => {
                tracing::debug!(table = input.category.table(), "Retrying insert without category column");
                Self::insert_inner(pool, input, false).await
            }
            other => other,
        }
    }

    async fn update_inner(
        pool: &PgPool,
        id: DbId,
        input: &ProductWrite,
        with_category: bool,
    ) -> Result<u64, sqlx::Error> {
        let pairs = Self::write_pairs(input, with_category);
        let assignments: Vec<String> = pairs
            .iter()
            .enumerate()
            .map(|(i, (col, _))| format!("{col} = ${}", i + 2))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = $1",
            input.category.table(),
            assignments.join(", ")
        );

        let mut query = sqlx::query(&sql).bind(id);
        for (_, value) in &pairs {
            query = query.bind(value.clone());
        }
        Ok(query.execute(pool).await?.rows_affected())
    }

    /// Replace a product row by id within the category's table, with the
    /// same 42703 fallback as inserts. Returns `false` when no row
    /// matched — including when the caller's category names a different
    /// table than the one the record lives in.
    pub async fn update(pool: &PgPool, id: DbId, input: &ProductWrite) -> Result<bool, sqlx::Error> {
        let affected = match Self::update_inner(pool, id, input, true).await {
            Err(e) if is_undefined_column(&e) => {
                tracing::debug!(table = input.category.table(), "Retrying update without category column");
                Self::update_inner(pool, id, input, false).await?
            }
            other => other?,
        };
        Ok(affected > 0)
    }

    /// Delete a product row by id. Idempotent: a missing id is a no-op
    /// and reports success.
    pub async fn delete(pool: &PgPool, category: Category, id: DbId) -> Result<bool, sqlx::Error> {
        let sql = format!("DELETE FROM {} WHERE id = $1", category.table());
        let result = sqlx::query(&sql).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
