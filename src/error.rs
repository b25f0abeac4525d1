//! Application error types using thiserror
//!
//! Error hierarchy:
//! - AnalysisError: the only conditions that abort an analysis run; they
//!   surface as the `error` field of the report with no partial data
//! - RegistryError: package registry communication failures (degrade locally)
//! - ToolError: package-manager CLI invocation failures (degrade locally)
//!
//! Everything outside `AnalysisError` is handled inside the step that
//! produced it: the step falls back to an empty/unknown value and records
//! the failure through `tracing`.

use std::path::PathBuf;
use thiserror::Error;

/// Hard-failure taxonomy for an analysis run
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Local project path missing
    #[error("Project path does not exist: {}", path.display())]
    PathNotFound { path: PathBuf },

    /// Remote reference unreachable or invalid at clone time
    #[error("Failed to clone repository: {message}")]
    CloneFailed { url: String, message: String },

    /// No dependency-declaration files found for the resolved ecosystem
    #[error("No {ecosystem} dependency files found in the project")]
    NoManifestFound { ecosystem: String },

    /// Manifest files were found but yielded zero declarations
    #[error("No dependencies found in the detected files")]
    NoDependenciesFound,

    /// Ecosystem name outside the supported set
    #[error("Unsupported ecosystem: {name}")]
    UnsupportedEcosystem { name: String },

    /// Remote reference missing the owner or repository segment
    #[error("Invalid repository reference: {reference}")]
    InvalidRepositoryReference { reference: String },
}

impl AnalysisError {
    /// Creates a new PathNotFound error
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        AnalysisError::PathNotFound { path: path.into() }
    }

    /// Creates a new CloneFailed error
    pub fn clone_failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        AnalysisError::CloneFailed {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new NoManifestFound error
    pub fn no_manifest_found(ecosystem: impl Into<String>) -> Self {
        AnalysisError::NoManifestFound {
            ecosystem: ecosystem.into(),
        }
    }

    /// Creates a new UnsupportedEcosystem error
    pub fn unsupported_ecosystem(name: impl Into<String>) -> Self {
        AnalysisError::UnsupportedEcosystem { name: name.into() }
    }

    /// Creates a new InvalidRepositoryReference error
    pub fn invalid_reference(reference: impl Into<String>) -> Self {
        AnalysisError::InvalidRepositoryReference {
            reference: reference.into(),
        }
    }
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Returns true for a 404-equivalent registry response
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::PackageNotFound { .. })
    }
}

/// Errors related to package-manager CLI invocation
#[derive(Error, Debug)]
pub enum ToolError {
    /// The tool binary could not be launched
    #[error("failed to launch '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool produced output that could not be parsed
    #[error("failed to parse '{command}' output: {message}")]
    Parse { command: String, message: String },

    /// The tool exited unsuccessfully without usable output
    #[error("'{command}' exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: i32,
        stderr: String,
    },
}

impl ToolError {
    /// Creates a new Launch error
    pub fn launch(command: impl Into<String>, source: std::io::Error) -> Self {
        ToolError::Launch {
            command: command.into(),
            source,
        }
    }

    /// Creates a new Parse error
    pub fn parse(command: impl Into<String>, message: impl Into<String>) -> Self {
        ToolError::Parse {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Creates a new Failed error
    pub fn failed(command: impl Into<String>, status: i32, stderr: impl Into<String>) -> Self {
        ToolError::Failed {
            command: command.into(),
            status,
            stderr: stderr.into(),
        }
    }
}
