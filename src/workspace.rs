//! Scoped temporary workspaces for remote analysis
//!
//! Every remote analysis clones into its own freshly created directory and
//! removes it before returning, success or failure. `Drop` covers the
//! panic/early-return paths; `close` is the explicit form that can report
//! removal problems.

use std::path::Path;
use tempfile::TempDir;
use tracing::{debug, warn};

/// Temp-directory prefix for clone workspaces
const WORKSPACE_PREFIX: &str = "dep-health-";

/// A per-run temporary directory, removed when the run ends
pub struct ScopedWorkspace {
    dir: TempDir,
}

impl ScopedWorkspace {
    /// Create a fresh workspace under the system temp directory
    pub fn create() -> std::io::Result<Self> {
        let dir = tempfile::Builder::new().prefix(WORKSPACE_PREFIX).tempdir()?;
        debug!(path = %dir.path().display(), "created clone workspace");
        Ok(Self { dir })
    }

    /// Path of the workspace directory
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the workspace, logging removal failures
    pub fn close(self) {
        let path = self.dir.path().display().to_string();
        if let Err(e) = self.dir.close() {
            warn!(path = %path, error = %e, "failed to remove clone workspace");
        }
    }
}
