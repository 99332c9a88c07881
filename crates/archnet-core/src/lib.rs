//! archnet-core — domain layer for the ArchNet platform.
//!
//! Holds the entities, the storage port traits consumed as `Arc<dyn Trait>`,
//! the request identity (`Principal`), the wire DTOs and the unified-feed
//! aggregator. Persistence lives in `archnet-postgres`; the HTTP surface in
//! `archnet-server`. `mem::MemStores` is the fixture store both test suites
//! run against.

pub mod error;
pub mod feed;
pub mod mem;
pub mod ports;
pub mod principal;
pub mod proto;
pub mod types;

pub use error::{ArchError, Result};
pub use principal::Principal;
