use super::Dependency;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A project path paired with one of its build variants
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectVariant {
    pub project: String,
    pub variant: String,
}

impl ProjectVariant {
    pub fn new(project: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            variant: variant.into(),
        }
    }
}

impl fmt::Display for ProjectVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.project, self.variant)
    }
}

/// A declared dependency together with the transitives reached through it
/// that the module actually uses
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentWithTransitives {
    pub dependency: Dependency,
    pub used_transitives: BTreeSet<Dependency>,
}

impl ComponentWithTransitives {
    pub fn new(dependency: Dependency, used_transitives: BTreeSet<Dependency>) -> Self {
        Self {
            dependency,
            used_transitives,
        }
    }

    /// An external component re-exporting used capabilities of its transitives
    ///
    /// Project components are never facades.
    pub fn is_facade(&self) -> bool {
        !self.dependency.is_project() && !self.used_transitives.is_empty()
    }
}

/// A used but undeclared dependency and the declarations that bring it in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitiveDependency {
    pub dependency: Dependency,
    pub parents: BTreeSet<Dependency>,
}

impl TransitiveDependency {
    pub fn new(dependency: Dependency, parents: BTreeSet<Dependency>) -> Self {
        Self { dependency, parents }
    }
}
