//! service-core: Shared infrastructure for relay services.
pub mod error;
pub mod middleware;
pub mod observability;
