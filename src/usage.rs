//! Source-scan usage classification
//!
//! Walks the project tree once and counts import/require references for
//! every declared package. Purely textual: a reference inside a comment or
//! string literal counts. The scan is deterministic for a given tree, and
//! vendored/generated directories are skipped entirely.

use crate::domain::{DependencySet, Ecosystem, UsageRecord};
use regex::Regex;
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

/// Directories never scanned
const SKIPPED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "target",
    "__pycache__",
    "venv",
    ".venv",
];

/// Source extensions scanned per ecosystem
const NPM_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];
const PIP_EXTENSIONS: &[&str] = &["py"];

/// Classify every declared package as used or unused.
///
/// Records come back in declaration order, one per package.
pub fn scan_usage(
    root: &Path,
    ecosystem: Ecosystem,
    declarations: &DependencySet,
) -> Vec<UsageRecord> {
    let matchers: Vec<(String, Regex)> = declarations
        .iter()
        .map(|d| (d.name.clone(), reference_pattern(ecosystem, &d.name)))
        .collect();
    let mut counts = vec![0u32; matchers.len()];

    let extensions = match ecosystem {
        Ecosystem::Npm => NPM_EXTENSIONS,
        Ecosystem::Pip => PIP_EXTENSIONS,
    };

    // depth 0 is the project root itself, scanned whatever its name
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        let name = entry.file_name().to_string_lossy();
        entry.depth() == 0
            || !(entry.file_type().is_dir() && SKIPPED_DIRS.contains(&name.as_ref()))
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let has_source_extension = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.contains(&ext));
        if !has_source_extension {
            continue;
        }

        // Unreadable or non-UTF-8 files contribute no references
        let Ok(content) = std::fs::read_to_string(entry.path()) else {
            continue;
        };
        for ((_, pattern), count) in matchers.iter().zip(counts.iter_mut()) {
            *count += pattern.find_iter(&content).count() as u32;
        }
    }

    matchers
        .into_iter()
        .zip(counts)
        .map(|((name, _), count)| UsageRecord::from_count(name, count))
        .collect()
}

/// Build the reference pattern for one package.
///
/// npm: `require('name')`, `from 'name'` and side-effect `import 'name'`,
/// with subpath imports (`name/sub`) included. pip: `import module` and
/// `from module ...` at line start, with dashes in the package name mapped
/// to underscores.
fn reference_pattern(ecosystem: Ecosystem, package: &str) -> Regex {
    let pattern = match ecosystem {
        Ecosystem::Npm => {
            let name = regex::escape(package);
            format!(
                r#"(?:require\s*\(\s*|from\s+|import\s+)['"]{}(?:/[^'"]*)?['"]"#,
                name
            )
        }
        Ecosystem::Pip => {
            let module = regex::escape(&package.replace('-', "_"));
            format!(r"(?m)^\s*(?:import\s+{}\b|from\s+{}\b)", module, module)
        }
    };
    // Escaped literal alternations cannot produce an invalid pattern
    Regex::new(&pattern).unwrap_or_else(|_| Regex::new("$^").unwrap())
}
