use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a dependency node
///
/// Either an external module coordinate (`group:artifact`) or a project
/// path (`:core`). Equality and ordering are by the raw string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyId(String);

impl DependencyId {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Project paths start with a colon
    pub fn is_project(&self) -> bool {
        self.0.starts_with(':')
    }
}

impl fmt::Display for DependencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DependencyId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DependencyId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A dependency as declared (or discovered) for a project variant
///
/// Usage is keyed by [`DependencyId`] only; two values with the same
/// identifier but different configurations are distinct declarations of the
/// same graph node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub identifier: DependencyId,

    /// Resolved version, absent for project dependencies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_version: Option<String>,

    /// Configuration the dependency is declared on, absent when inferred
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,
}

impl Dependency {
    pub fn new(identifier: impl Into<DependencyId>) -> Self {
        Self {
            identifier: identifier.into(),
            resolved_version: None,
            configuration: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.resolved_version = Some(version.into());
        self
    }

    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }

    pub fn is_project(&self) -> bool {
        self.identifier.is_project()
    }

    /// Same dependency with the configuration stripped, as used for graph attribution
    pub fn undeclared(&self) -> Self {
        Self {
            identifier: self.identifier.clone(),
            resolved_version: self.resolved_version.clone(),
            configuration: None,
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.resolved_version {
            Some(version) => write!(f, "{}:{}", self.identifier, version),
            None => write!(f, "{}", self.identifier),
        }
    }
}
