//! Repository layer.
//!
//! Repositories are zero-sized structs providing async methods that take
//! `&PgPool` as the first argument.

pub mod product_repo;

pub use product_repo::ProductRepo;
