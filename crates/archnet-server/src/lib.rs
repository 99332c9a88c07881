//! archnet-server — HTTP surface for the ArchNet platform.
//!
//! Exposed as a library so the integration tests can build the router
//! directly and drive it with `tower::ServiceExt::oneshot`.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
