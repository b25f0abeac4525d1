//! Registry adapters for resolving latest package versions
//!
//! This module provides:
//! - HTTP client shared foundation
//! - PyPI JSON API adapter
//!
//! npm projects never reach this layer; their latest versions come from the
//! package-manager CLI instead.

mod client;
mod pypi;

pub use client::HttpClient;
pub use pypi::PyPiRegistry;

use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for package registries
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Resolve the latest published version of a package
    async fn latest_version(&self, package: &str) -> Result<String, RegistryError>;
}
