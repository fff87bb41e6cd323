//! HTTP client module for the canonical menu endpoint.
//!
//! This module provides the `ApiClient` for fetching the menu list from the
//! remote JSON endpoint. The endpoint is unauthenticated and unpaginated;
//! the fetch is a single best-effort GET with no retry policy.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
