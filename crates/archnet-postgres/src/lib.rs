//! archnet-postgres — Postgres implementations of the archnet-core ports.
//!
//! Each adapter is a newtype wrapping `PgPool`. All SQL is runtime-checked
//! (`sqlx::query` / `sqlx::query_as`, not the compile-time macros) so the
//! crate builds without a database. Schema lives in
//! `migrations/schema.sql`.

mod sqlx_types;
mod store;

pub use store::PgStores;
