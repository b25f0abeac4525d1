//! Remote repository references
//!
//! Accepted forms: `https://github.com/<owner>/<repo>`,
//! `http://github.com/<owner>/<repo>`, and the bare `github.com/<owner>/<repo>`
//! (normalized by prefixing `https://`). A reference missing the owner or
//! repository segment is rejected before any clone attempt.

use crate::error::AnalysisError;

/// A validated remote repository reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    url: String,
    owner: String,
    repo: String,
}

impl RepoRef {
    /// Returns true when a location string names a remote repository rather
    /// than a filesystem path
    pub fn is_remote(location: &str) -> bool {
        location.starts_with("https://")
            || location.starts_with("http://")
            || location.starts_with("github.com/")
    }

    /// Parse and normalize a remote reference
    pub fn parse(reference: &str) -> Result<Self, AnalysisError> {
        let trimmed = reference.trim().trim_end_matches('/');
        let without_scheme = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .unwrap_or(trimmed);

        // host / owner / repo
        let mut segments = without_scheme.split('/').filter(|s| !s.is_empty());
        let host = segments.next();
        let owner = segments.next();
        let repo = segments.next();

        let (Some(_host), Some(owner), Some(repo)) = (host, owner, repo) else {
            return Err(AnalysisError::invalid_reference(reference));
        };

        let url = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };

        Ok(Self {
            url,
            owner: owner.to_string(),
            repo: repo.trim_end_matches(".git").to_string(),
        })
    }

    /// Normalized clone URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Repository owner segment
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name segment, without any `.git` suffix
    pub fn repo(&self) -> &str {
        &self.repo
    }
}
