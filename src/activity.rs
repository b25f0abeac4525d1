//! Repository activity scoring from commit history
//!
//! Clones the repository into its own scoped workspace, reads four history
//! facts through the `GitCli` seam, and folds them into a bounded 0-100
//! score. Every failure path yields the zeroed `RepositoryActivity::failed`
//! form; nothing in this module propagates an error to the caller.

use crate::domain::RepositoryActivity;
use crate::error::ToolError;
use crate::repo::RepoRef;
use crate::workspace::ScopedWorkspace;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use std::path::Path;
use std::process::Command;
use tracing::warn;

/// Commit window defining "recent" activity, in days
const RECENT_WINDOW_DAYS: i64 = 30;

/// Trait for running source-control commands
pub trait GitCli: Send + Sync {
    /// Run `git <args>` in `cwd`, returning trimmed stdout on success
    fn run(&self, cwd: &Path, args: &[&str]) -> Result<String, ToolError>;
}

/// Git runner that executes the real binary
#[derive(Debug, Default)]
pub struct SystemGit;

impl SystemGit {
    pub fn new() -> Self {
        Self
    }
}

impl GitCli for SystemGit {
    fn run(&self, cwd: &Path, args: &[&str]) -> Result<String, ToolError> {
        let command_str = format!("git {}", args.join(" "));
        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| ToolError::launch(&command_str, e))?;

        if !output.status.success() {
            return Err(ToolError::failed(
                &command_str,
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Bounded activity heuristic.
///
/// `min(recent x 5, 70)` plus a recency bonus of 30/20/10/0 for a last
/// commit within 7/30/90/more days, clamped to [0, 100].
pub fn calculate_activity_score(recent_commit_count: u32, days_since_last_commit: i64) -> u8 {
    let base = (recent_commit_count.saturating_mul(5)).min(70);
    let bonus: u32 = if days_since_last_commit <= 7 {
        30
    } else if days_since_last_commit <= 30 {
        20
    } else if days_since_last_commit <= 90 {
        10
    } else {
        0
    };
    (base + bonus).min(100) as u8
}

/// Score the maintenance activity of a remote repository.
///
/// Clones into a scoped workspace that is removed before returning; any
/// failure collapses into the `failed` record.
pub fn analyze_repository_activity(git: &dyn GitCli, reference: &str) -> RepositoryActivity {
    let repo = match RepoRef::parse(reference) {
        Ok(repo) => repo,
        Err(e) => return RepositoryActivity::failed(e.to_string()),
    };

    let workspace = match ScopedWorkspace::create() {
        Ok(workspace) => workspace,
        Err(e) => {
            warn!(error = %e, "could not create activity workspace");
            return RepositoryActivity::failed(format!("failed to create workspace: {}", e));
        }
    };

    let activity = read_history(git, &workspace, &repo, Utc::now());
    workspace.close();

    match activity {
        Ok(activity) => activity,
        Err(e) => {
            warn!(repository = %repo.url(), error = %e, "activity scoring failed");
            RepositoryActivity::failed(e.to_string())
        }
    }
}

fn read_history(
    git: &dyn GitCli,
    workspace: &ScopedWorkspace,
    repo: &RepoRef,
    now: DateTime<Utc>,
) -> Result<RepositoryActivity, ToolError> {
    let clone_dir = workspace.path().join(repo.repo());
    let clone_dest = clone_dir.to_string_lossy().to_string();
    git.run(
        workspace.path(),
        &["clone", "--quiet", repo.url(), &clone_dest],
    )?;

    let last_commit_date = git.run(&clone_dir, &["log", "-1", "--format=%cI"])?;
    let days_since_last_commit = match last_commit_date.parse::<DateTime<Utc>>() {
        Ok(date) => (now - date).num_days(),
        Err(e) => {
            return Err(ToolError::parse(
                "git log -1 --format=%cI",
                format!("unparsable commit date '{}': {}", last_commit_date, e),
            ))
        }
    };

    let since = (now - Duration::days(RECENT_WINDOW_DAYS))
        .format("%Y-%m-%d")
        .to_string();
    let recent = git.run(
        &clone_dir,
        &["log", &format!("--since={}", since), "--pretty=format:%h"],
    )?;
    let recent_commit_count = recent.lines().filter(|l| !l.trim().is_empty()).count() as u32;

    let total = git.run(&clone_dir, &["rev-list", "--count", "HEAD"])?;
    let total_commit_count = total.trim().parse::<u64>().map_err(|e| {
        ToolError::parse(
            "git rev-list --count HEAD",
            format!("unparsable commit count '{}': {}", total, e),
        )
    })?;

    let authors = git.run(&clone_dir, &["log", "--format=%aN"])?;
    let contributor_count = authors
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<HashSet<_>>()
        .len() as u32;

    Ok(RepositoryActivity {
        last_commit_date: Some(last_commit_date),
        recent_commit_count,
        total_commit_count,
        contributor_count,
        activity_score: calculate_activity_score(recent_commit_count, days_since_last_commit),
        is_active: recent_commit_count > 0,
        error: None,
    })
}
