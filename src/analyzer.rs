//! Analysis orchestration
//!
//! One `Analyzer` composes the whole pipeline: resolve the ecosystem,
//! extract declarations, resolve outdated packages, collect advisories,
//! classify usage, and for remote references score repository activity.
//!
//! The failure model is asymmetric on purpose. Only the `AnalysisError`
//! conditions abort a run, surfacing as the report's `error` field with
//! every other field empty. Everything downstream of extraction degrades
//! in place and the run still returns its best available picture.

use crate::activity::{analyze_repository_activity, GitCli, SystemGit};
use crate::audit::npm_audit;
use crate::domain::{AnalysisReport, Ecosystem, EcosystemHint};
use crate::error::{AnalysisError, RegistryError};
use crate::manifest::{detect_ecosystem, extract_all, find_manifests};
use crate::outdated::{npm_outdated, pip_outdated};
use crate::registry::{HttpClient, PackageRegistry, PyPiRegistry};
use crate::repo::RepoRef;
use crate::tool::{PackageTool, SystemNpm};
use crate::usage::scan_usage;
use crate::workspace::ScopedWorkspace;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Dependency-health analyzer over a local path or remote reference
pub struct Analyzer {
    tool: Arc<dyn PackageTool>,
    git: Arc<dyn GitCli>,
    registry: Arc<dyn PackageRegistry>,
}

impl Analyzer {
    /// Create an analyzer wired to the real npm, git and PyPI collaborators
    pub fn new() -> Result<Self, RegistryError> {
        let client = HttpClient::new()?;
        Ok(Self::with_components(
            Arc::new(SystemNpm::new()),
            Arc::new(SystemGit::new()),
            Arc::new(PyPiRegistry::new(client)),
        ))
    }

    /// Create an analyzer with explicit collaborators
    pub fn with_components(
        tool: Arc<dyn PackageTool>,
        git: Arc<dyn GitCli>,
        registry: Arc<dyn PackageRegistry>,
    ) -> Self {
        Self {
            tool,
            git,
            registry,
        }
    }

    /// Analyze a project location, always returning a report.
    ///
    /// Hard failures surface as the report's `error` field; the call itself
    /// never errors.
    pub async fn analyze(&self, location: &str, hint: EcosystemHint) -> AnalysisReport {
        match self.try_analyze(location, hint).await {
            Ok(report) => report,
            Err(e) => {
                info!(location = %location, error = %e, "analysis aborted");
                AnalysisReport::failure(e.to_string())
            }
        }
    }

    async fn try_analyze(
        &self,
        location: &str,
        hint: EcosystemHint,
    ) -> Result<AnalysisReport, AnalysisError> {
        if RepoRef::is_remote(location) {
            self.analyze_remote(location, hint).await
        } else {
            self.analyze_local(Path::new(location), hint).await
        }
    }

    /// Run the dependency pipeline against a local project directory
    async fn analyze_local(
        &self,
        root: &Path,
        hint: EcosystemHint,
    ) -> Result<AnalysisReport, AnalysisError> {
        if !root.exists() {
            return Err(AnalysisError::path_not_found(root));
        }

        let ecosystem = hint
            .ecosystem()
            .unwrap_or_else(|| detect_ecosystem(root));
        debug!(ecosystem = %ecosystem, path = %root.display(), "resolved ecosystem");

        let detected_files = find_manifests(root, ecosystem);
        if detected_files.is_empty() {
            return Err(AnalysisError::no_manifest_found(ecosystem.display_name()));
        }

        let declarations = extract_all(root, &detected_files);
        if declarations.is_empty() {
            return Err(AnalysisError::NoDependenciesFound);
        }
        debug!(
            count = declarations.len(),
            files = detected_files.len(),
            "extracted dependency declarations"
        );

        let outdated = match ecosystem {
            Ecosystem::Npm => npm_outdated(self.tool.as_ref(), root, &declarations),
            Ecosystem::Pip => pip_outdated(self.registry.as_ref(), &declarations).await,
        };

        // No advisory source is wired for pip
        let vulnerabilities = match ecosystem {
            Ecosystem::Npm => npm_audit(self.tool.as_ref(), root),
            Ecosystem::Pip => Vec::new(),
        };

        let usage = scan_usage(root, ecosystem, &declarations);

        Ok(AnalysisReport {
            outdated,
            vulnerabilities,
            usage,
            activity: None,
            detected_files,
            error: None,
        })
    }

    /// Clone a remote reference into a scoped workspace, run the local
    /// pipeline against the clone, then score activity. The workspace is
    /// removed on every exit path.
    async fn analyze_remote(
        &self,
        reference: &str,
        hint: EcosystemHint,
    ) -> Result<AnalysisReport, AnalysisError> {
        let repo = RepoRef::parse(reference)?;

        let workspace = ScopedWorkspace::create()
            .map_err(|e| AnalysisError::clone_failed(repo.url(), e.to_string()))?;
        let clone_dir = workspace.path().join(repo.repo());
        let clone_dest = clone_dir.to_string_lossy().to_string();

        let cloned = self
            .git
            .run(
                workspace.path(),
                &["clone", "--quiet", repo.url(), &clone_dest],
            )
            .map_err(|e| AnalysisError::clone_failed(repo.url(), e.to_string()));

        let outcome = match cloned {
            Ok(_) => match self.analyze_local(&clone_dir, hint).await {
                Ok(mut report) => {
                    // Activity runs only once dependency analysis succeeded,
                    // and its failure merely degrades the activity field
                    report.activity =
                        Some(analyze_repository_activity(self.git.as_ref(), reference));
                    Ok(report)
                }
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };

        workspace.close();
        outcome
    }
}
