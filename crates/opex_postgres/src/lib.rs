//! PostgreSQL adapter for the OPEX aggregation core.
//!
//! Implements [`opex_core::AssessmentStore`] against the `opex` schema
//! (see `migrations/0001_opex_schema.sql`). Row shapes are normalized
//! into domain entities once, here, at the adapter edge.

pub mod rows;
pub mod store;

pub use store::{connect, PgAssessmentStore};
