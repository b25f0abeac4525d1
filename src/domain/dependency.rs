//! Dependency declaration structures extracted from manifest files

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a dependency in the project manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyRole {
    /// Declared in the direct dependency map
    #[serde(rename = "dependency")]
    Direct,
    /// Declared in the development dependency map
    #[serde(rename = "devDependency")]
    Dev,
}

impl fmt::Display for DependencyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DependencyRole::Direct => "dependency",
            DependencyRole::Dev => "devDependency",
        };
        write!(f, "{}", name)
    }
}

/// A single `(package name, declared version constraint)` entry produced by
/// a manifest extractor. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyDeclaration {
    /// Package name
    pub name: String,
    /// Declared version, or `None` when the manifest pins no concrete version
    pub version: Option<String>,
    /// Constraint operator as written in the manifest (`==`, `>=`, `~=`, ...)
    pub operator: Option<String>,
    /// Whether this is a direct or a development dependency
    pub role: DependencyRole,
}

impl DependencyDeclaration {
    /// Creates a new declaration
    pub fn new(
        name: impl Into<String>,
        version: Option<String>,
        operator: Option<String>,
        role: DependencyRole,
    ) -> Self {
        Self {
            name: name.into(),
            version,
            operator,
            role,
        }
    }

    /// Creates a direct dependency with a concrete version and operator
    pub fn direct(
        name: impl Into<String>,
        version: impl Into<String>,
        operator: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            Some(version.into()),
            Some(operator.into()),
            DependencyRole::Direct,
        )
    }

    /// Creates a development dependency with a concrete version and operator
    pub fn dev(
        name: impl Into<String>,
        version: impl Into<String>,
        operator: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            Some(version.into()),
            Some(operator.into()),
            DependencyRole::Dev,
        )
    }

    /// Creates a declaration for a bare package name (no version constraint)
    pub fn unversioned(name: impl Into<String>, role: DependencyRole) -> Self {
        Self::new(name, None, Some("==".to_string()), role)
    }

    /// Returns the declared version, or `"unknown"` when none was given
    pub fn version_or_unknown(&self) -> &str {
        self.version.as_deref().unwrap_or("unknown")
    }
}

impl fmt::Display for DependencyDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.name,
            self.operator.as_deref().unwrap_or("@"),
            self.version_or_unknown()
        )
    }
}

/// Insertion-ordered set of declarations, uniquely keyed by package name.
///
/// Later inserts for a name already present overwrite the earlier entry in
/// place (last-file-wins across multiple manifest files).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    entries: Vec<DependencyDeclaration>,
}

impl DependencySet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a declaration, replacing any existing entry with the same name
    pub fn insert(&mut self, declaration: DependencyDeclaration) {
        match self.entries.iter_mut().find(|e| e.name == declaration.name) {
            Some(existing) => *existing = declaration,
            None => self.entries.push(declaration),
        }
    }

    /// Inserts every declaration from `declarations` in order
    pub fn extend(&mut self, declarations: impl IntoIterator<Item = DependencyDeclaration>) {
        for declaration in declarations {
            self.insert(declaration);
        }
    }

    /// Looks up a declaration by package name
    pub fn get(&self, name: &str) -> Option<&DependencyDeclaration> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Returns the role recorded for a package, defaulting to `Direct`
    pub fn role_of(&self, name: &str) -> DependencyRole {
        self.get(name)
            .map(|e| e.role)
            .unwrap_or(DependencyRole::Direct)
    }

    /// Iterates declarations in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &DependencyDeclaration> {
        self.entries.iter()
    }

    /// Returns the declared package names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Number of declarations in the set
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the set holds no declarations
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for DependencySet {
    type Item = DependencyDeclaration;
    type IntoIter = std::vec::IntoIter<DependencyDeclaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
