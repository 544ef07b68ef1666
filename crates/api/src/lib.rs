//! HTTP API layer for buzz.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: one router per feature, nested under the API root
//! - **Extractors**: authentication and voter identity
//! - **Middleware**: Bearer-token resolution
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
