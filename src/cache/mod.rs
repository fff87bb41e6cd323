//! Local caching module for offline data access.
//!
//! This module provides the `CacheManager` for storing and retrieving the
//! menu list locally. Data is cached in JSON format and expires 24 hours
//! after the last write, at which point it is refetched from the endpoint.

pub mod manager;

pub use manager::CacheManager;
