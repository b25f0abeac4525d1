//! Ecosystem type definitions for the supported package-manager families

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported package ecosystems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// npm-based JavaScript tooling (package.json)
    Npm,
    /// pip-based Python tooling (requirements.txt, pyproject.toml, ...)
    Pip,
}

impl Ecosystem {
    /// Returns the display name for this ecosystem
    pub fn display_name(&self) -> &'static str {
        match self {
            Ecosystem::Npm => "npm",
            Ecosystem::Pip => "pip",
        }
    }

    /// Returns the registry name for this ecosystem
    pub fn registry_name(&self) -> &'static str {
        match self {
            Ecosystem::Npm => "npm",
            Ecosystem::Pip => "PyPI",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Ecosystem selection accepted at the analysis entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EcosystemHint {
    /// Analyze as an npm project
    Npm,
    /// Analyze as a pip project
    Pip,
    /// Detect the ecosystem from the project's manifest files
    #[default]
    Auto,
}

impl EcosystemHint {
    /// Returns the explicitly hinted ecosystem, or `None` for `Auto`
    pub fn ecosystem(&self) -> Option<Ecosystem> {
        match self {
            EcosystemHint::Npm => Some(Ecosystem::Npm),
            EcosystemHint::Pip => Some(Ecosystem::Pip),
            EcosystemHint::Auto => None,
        }
    }
}

impl FromStr for EcosystemHint {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npm" => Ok(EcosystemHint::Npm),
            "pip" => Ok(EcosystemHint::Pip),
            "auto" | "" => Ok(EcosystemHint::Auto),
            other => Err(AnalysisError::unsupported_ecosystem(other)),
        }
    }
}

impl fmt::Display for EcosystemHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EcosystemHint::Npm => "npm",
            EcosystemHint::Pip => "pip",
            EcosystemHint::Auto => "auto",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(Ecosystem::Npm.display_name(), "npm");
        assert_eq!(Ecosystem::Pip.display_name(), "pip");
    }

    #[test]
    fn test_registry_names() {
        assert_eq!(Ecosystem::Npm.registry_name(), "npm");
        assert_eq!(Ecosystem::Pip.registry_name(), "PyPI");
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", Ecosystem::Npm), "npm");
        assert_eq!(format!("{}", Ecosystem::Pip), "pip");
    }

    #[test]
    fn test_serde_serialization() {
        assert_eq!(serde_json::to_string(&Ecosystem::Npm).unwrap(), "\"npm\"");
        assert_eq!(serde_json::to_string(&Ecosystem::Pip).unwrap(), "\"pip\"");
    }

    #[test]
    fn test_serde_deserialization() {
        let eco: Ecosystem = serde_json::from_str("\"npm\"").unwrap();
        assert_eq!(eco, Ecosystem::Npm);
        let eco: Ecosystem = serde_json::from_str("\"pip\"").unwrap();
        assert_eq!(eco, Ecosystem::Pip);
    }

    #[test]
    fn test_hint_default_is_auto() {
        assert_eq!(EcosystemHint::default(), EcosystemHint::Auto);
    }

    #[test]
    fn test_hint_ecosystem() {
        assert_eq!(EcosystemHint::Npm.ecosystem(), Some(Ecosystem::Npm));
        assert_eq!(EcosystemHint::Pip.ecosystem(), Some(Ecosystem::Pip));
        assert_eq!(EcosystemHint::Auto.ecosystem(), None);
    }

    #[test]
    fn test_hint_from_str() {
        assert_eq!("npm".parse::<EcosystemHint>().unwrap(), EcosystemHint::Npm);
        assert_eq!("pip".parse::<EcosystemHint>().unwrap(), EcosystemHint::Pip);
        assert_eq!(
            "auto".parse::<EcosystemHint>().unwrap(),
            EcosystemHint::Auto
        );
        assert_eq!("NPM".parse::<EcosystemHint>().unwrap(), EcosystemHint::Npm);
    }

    #[test]
    fn test_hint_from_str_unsupported() {
        let err = "cargo".parse::<EcosystemHint>().unwrap_err();
        assert!(err.to_string().contains("Unsupported ecosystem"));
        assert!(err.to_string().contains("cargo"));
    }

    #[test]
    fn test_hint_display() {
        assert_eq!(format!("{}", EcosystemHint::Npm), "npm");
        assert_eq!(format!("{}", EcosystemHint::Auto), "auto");
    }
}
