//! Domain logic for the safegear product catalog.
//!
//! Everything in this crate is pure: the category registry, spec-field
//! reconciliation, description/media normalization, upload key naming,
//! and admin form validation. All I/O lives in `safegear-db`,
//! `safegear-storage`, and `safegear-api`.

pub mod error;
pub mod media;
pub mod naming;
pub mod product;
pub mod registry;
pub mod specs;
pub mod types;
