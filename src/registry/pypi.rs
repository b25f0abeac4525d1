//! PyPI JSON API adapter
//!
//! API endpoint: https://pypi.org/pypi/{package}/json
//! The latest version is whatever `info.version` reports; no version
//! ordering happens on this side.

use crate::error::RegistryError;
use crate::registry::{HttpClient, PackageRegistry};
use async_trait::async_trait;
use serde::Deserialize;

/// PyPI API base URL
const PYPI_API_URL: &str = "https://pypi.org/pypi";

/// PyPI registry adapter
pub struct PyPiRegistry {
    client: HttpClient,
}

/// PyPI package metadata response
#[derive(Debug, Deserialize)]
struct PyPiResponse {
    info: PyPiInfo,
}

#[derive(Debug, Deserialize)]
struct PyPiInfo {
    version: String,
}

impl PyPiRegistry {
    /// Create a new PyPI adapter
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}/json", PYPI_API_URL, package)
    }
}

#[async_trait]
impl PackageRegistry for PyPiRegistry {
    fn registry_name(&self) -> &'static str {
        "PyPI"
    }

    async fn latest_version(&self, package: &str) -> Result<String, RegistryError> {
        let url = self.build_url(package);
        let response: PyPiResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;
        Ok(response.info.version)
    }
}
