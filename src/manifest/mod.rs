//! Manifest location and dependency extraction
//!
//! This module provides:
//! - Ecosystem detection from signature files in the project root
//! - Discovery of dependency-declaration files per ecosystem
//! - One extractor per manifest format behind the `DependencyExtractor`
//!   trait, selected by filename dispatch
//!
//! Extraction is pure: the same file content always yields the same
//! declaration set, and malformed lines never affect well-formed ones.

mod package_json;
mod pipfile;
mod pyproject_toml;
mod requirements_txt;
mod setup_py;

pub use package_json::PackageJsonExtractor;
pub use pipfile::PipfileExtractor;
pub use pyproject_toml::PyprojectExtractor;
pub use requirements_txt::RequirementsExtractor;
pub use setup_py::SetupPyExtractor;

use crate::domain::{DependencyDeclaration, DependencySet, Ecosystem};
use std::path::Path;
use tracing::warn;

/// Files whose presence in the project root marks an npm project
pub const NPM_SIGNATURE_FILES: &[&str] = &["package.json", "package-lock.json", "yarn.lock"];

/// Files whose presence in the project root marks a pip project
pub const PIP_SIGNATURE_FILES: &[&str] = &[
    "requirements.txt",
    "pyproject.toml",
    "setup.py",
    "Pipfile",
    "poetry.lock",
];

/// All pip declaration files reported by the locator, in detection order.
/// Lockfiles and conda environments are detected (and reported) even though
/// no extractor consumes them.
const PIP_DECLARATION_FILES: &[&str] = &[
    "requirements.txt",
    "pyproject.toml",
    "setup.py",
    "Pipfile",
    "poetry.lock",
    "environment.yml",
    "conda.yml",
];

/// Subdirectories conventionally holding extra requirements files
const REQUIREMENTS_DIRS: &[&str] = &["requirements", "deps", "dependencies"];

/// Trait for converting one manifest format into declarations
pub trait DependencyExtractor {
    /// Extract declarations from the manifest content.
    ///
    /// Unparsable input yields fewer (possibly zero) declarations, never an
    /// error; hard failure for an empty project is decided by the caller.
    fn extract(&self, content: &str) -> Vec<DependencyDeclaration>;

    /// Human-readable name of the format this extractor handles
    fn format_name(&self) -> &'static str;
}

/// Select the extractor for a detected file, by filename
pub fn extractor_for(file_name: &str) -> Option<Box<dyn DependencyExtractor>> {
    match file_name {
        "package.json" => Some(Box::new(PackageJsonExtractor)),
        "pyproject.toml" => Some(Box::new(PyprojectExtractor)),
        "setup.py" => Some(Box::new(SetupPyExtractor)),
        "Pipfile" => Some(Box::new(PipfileExtractor)),
        name if name.ends_with(".txt") || name.contains("requirements") => {
            Some(Box::new(RequirementsExtractor))
        }
        _ => None,
    }
}

/// Infer the ecosystem from the root directory's immediate entries.
///
/// npm wins when both signatures are present; a directory matching neither
/// defaults to npm (documented policy choice). Never fails.
pub fn detect_ecosystem(root: &Path) -> Ecosystem {
    if NPM_SIGNATURE_FILES.iter().any(|f| root.join(f).is_file()) {
        return Ecosystem::Npm;
    }
    if PIP_SIGNATURE_FILES.iter().any(|f| root.join(f).is_file()) {
        return Ecosystem::Pip;
    }
    Ecosystem::Npm
}

/// Find the dependency-declaration files for an ecosystem.
///
/// Returns project-relative paths. npm projects report `package.json` only;
/// pip projects report every known declaration file plus requirements files
/// under the conventional subdirectories.
pub fn find_manifests(root: &Path, ecosystem: Ecosystem) -> Vec<String> {
    match ecosystem {
        Ecosystem::Npm => {
            if root.join("package.json").is_file() {
                vec!["package.json".to_string()]
            } else {
                Vec::new()
            }
        }
        Ecosystem::Pip => find_pip_manifests(root),
    }
}

fn find_pip_manifests(root: &Path) -> Vec<String> {
    let mut detected = Vec::new();

    for file in PIP_DECLARATION_FILES {
        if root.join(file).is_file() {
            detected.push(file.to_string());
        }
    }

    for dir in REQUIREMENTS_DIRS {
        let dir_path = root.join(dir);
        if !dir_path.is_dir() {
            continue;
        }
        let entries = match std::fs::read_dir(&dir_path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(directory = %dir_path.display(), error = %e, "skipping unreadable requirements directory");
                continue;
            }
        };
        let mut names: Vec<String> = entries
            .flatten()
            .filter(|e| e.path().is_file())
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| name.ends_with(".txt") || name.contains("requirements"))
            .collect();
        names.sort();
        detected.extend(names.into_iter().map(|name| format!("{}/{}", dir, name)));
    }

    detected
}

/// Parse every detected file into one declaration set.
///
/// Files are processed in detection order; a later file's entry for a name
/// already seen overwrites the earlier one. Files with no extractor or
/// unreadable content contribute nothing.
pub fn extract_all(root: &Path, detected_files: &[String]) -> DependencySet {
    let mut set = DependencySet::new();

    for relative in detected_files {
        let file_name = relative.rsplit('/').next().unwrap_or(relative);
        let Some(extractor) = extractor_for(file_name) else {
            continue;
        };
        let path = root.join(relative);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable manifest file");
                continue;
            }
        };
        set.extend(extractor.extract(&content));
    }

    set
}
