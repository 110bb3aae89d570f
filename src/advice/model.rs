use crate::error::{AnalysisError, Result};
use crate::model::{ComponentWithTransitives, Dependency, DependencyId, Tier, TransitiveDependency};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Kind of recommendation
///
/// Variant order is the sort bucket order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdviceKind {
    Remove,
    Change,
    Add,
    CompileOnly,
    RuntimeOnly,
}

impl AdviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdviceKind::Remove => "remove",
            AdviceKind::Change => "change",
            AdviceKind::Add => "add",
            AdviceKind::CompileOnly => "compile-only",
            AdviceKind::RuntimeOnly => "runtime-only",
        }
    }

    /// Whether advice of this kind is about an existing declaration
    pub fn is_declaration(&self) -> bool {
        !matches!(self, AdviceKind::Add)
    }

    fn validate(&self, from: Option<&str>, to: Option<&str>) -> Result<()> {
        let ok = match self {
            AdviceKind::Add => from.is_none() && to.is_some(),
            AdviceKind::Remove => from.is_some() && to.is_none(),
            AdviceKind::Change | AdviceKind::CompileOnly | AdviceKind::RuntimeOnly => {
                from.is_some() && to.is_some() && from != to
            }
        };
        if ok {
            Ok(())
        } else {
            Err(AnalysisError::InvalidAdvice {
                reason: format!(
                    "{} advice cannot go from {:?} to {:?}",
                    self.as_str(),
                    from,
                    to
                ),
            })
        }
    }
}

impl fmt::Display for AdviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recommended change to a dependency declaration
///
/// Equality, ordering and hashing all derive from [`Advice::key`]:
/// kind, identifier, from-configuration, to-configuration. Parents and used
/// transitives are attribution only and never distinguish two advices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawAdvice")]
pub struct Advice {
    kind: AdviceKind,
    dependency: Dependency,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    used_transitive_dependencies: BTreeSet<Dependency>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    parents: BTreeSet<Dependency>,
    from_configuration: Option<String>,
    to_configuration: Option<String>,
}

#[derive(Deserialize)]
struct RawAdvice {
    kind: AdviceKind,
    dependency: Dependency,
    #[serde(default)]
    used_transitive_dependencies: BTreeSet<Dependency>,
    #[serde(default)]
    parents: BTreeSet<Dependency>,
    #[serde(default)]
    from_configuration: Option<String>,
    #[serde(default)]
    to_configuration: Option<String>,
}

impl TryFrom<RawAdvice> for Advice {
    type Error = AnalysisError;

    fn try_from(raw: RawAdvice) -> Result<Self> {
        raw.kind
            .validate(raw.from_configuration.as_deref(), raw.to_configuration.as_deref())?;
        Ok(Self {
            kind: raw.kind,
            dependency: raw.dependency,
            used_transitive_dependencies: raw.used_transitive_dependencies,
            parents: raw.parents,
            from_configuration: raw.from_configuration,
            to_configuration: raw.to_configuration,
        })
    }
}

impl Advice {
    fn build(
        kind: AdviceKind,
        dependency: Dependency,
        from: Option<String>,
        to: Option<String>,
    ) -> Result<Self> {
        kind.validate(from.as_deref(), to.as_deref())?;
        Ok(Self {
            kind,
            dependency,
            used_transitive_dependencies: BTreeSet::new(),
            parents: BTreeSet::new(),
            from_configuration: from,
            to_configuration: to,
        })
    }

    /// Declare a used transitive dependency
    pub fn of_add(transitive: TransitiveDependency, to_configuration: impl Into<String>) -> Self {
        Self {
            kind: AdviceKind::Add,
            dependency: transitive.dependency.undeclared(),
            used_transitive_dependencies: BTreeSet::new(),
            parents: transitive.parents,
            from_configuration: None,
            to_configuration: Some(to_configuration.into()),
        }
    }

    /// Remove an unused declaration
    pub fn of_remove(dependency: &Dependency) -> Result<Self> {
        Self::build(
            AdviceKind::Remove,
            dependency.clone(),
            dependency.configuration.clone(),
            None,
        )
    }

    /// Remove an unused component, recording the transitives it supplies
    pub fn of_remove_component(component: &ComponentWithTransitives) -> Result<Self> {
        let mut advice = Self::of_remove(&component.dependency)?;
        advice.used_transitive_dependencies = component.used_transitives.clone();
        Ok(advice)
    }

    /// Move a declaration to another configuration
    pub fn of_change(dependency: &Dependency, to_configuration: impl Into<String>) -> Result<Self> {
        Self::build(
            AdviceKind::Change,
            dependency.clone(),
            dependency.configuration.clone(),
            Some(to_configuration.into()),
        )
    }

    /// Move a declaration to a compile-only configuration
    pub fn of_compile_only(
        dependency: &Dependency,
        to_configuration: impl Into<String>,
    ) -> Result<Self> {
        Self::build(
            AdviceKind::CompileOnly,
            dependency.clone(),
            dependency.configuration.clone(),
            Some(to_configuration.into()),
        )
    }

    /// Move a declaration to a runtime-only configuration
    pub fn of_runtime_only(
        dependency: &Dependency,
        to_configuration: impl Into<String>,
    ) -> Result<Self> {
        Self::build(
            AdviceKind::RuntimeOnly,
            dependency.clone(),
            dependency.configuration.clone(),
            Some(to_configuration.into()),
        )
    }

    /// The tuple equality, ordering and hashing are derived from
    pub fn key(&self) -> (AdviceKind, &DependencyId, Option<&str>, Option<&str>) {
        (
            self.kind,
            &self.dependency.identifier,
            self.from_configuration.as_deref(),
            self.to_configuration.as_deref(),
        )
    }

    pub fn kind(&self) -> AdviceKind {
        self.kind
    }

    pub fn dependency(&self) -> &Dependency {
        &self.dependency
    }

    pub fn identifier(&self) -> &DependencyId {
        &self.dependency.identifier
    }

    pub fn parents(&self) -> &BTreeSet<Dependency> {
        &self.parents
    }

    pub fn used_transitive_dependencies(&self) -> &BTreeSet<Dependency> {
        &self.used_transitive_dependencies
    }

    pub fn from_configuration(&self) -> Option<&str> {
        self.from_configuration.as_deref()
    }

    pub fn to_configuration(&self) -> Option<&str> {
        self.to_configuration.as_deref()
    }

    pub fn is_add(&self) -> bool {
        self.kind == AdviceKind::Add
    }

    pub fn is_remove(&self) -> bool {
        self.kind == AdviceKind::Remove
    }

    pub fn is_change(&self) -> bool {
        self.kind == AdviceKind::Change
    }

    pub fn is_compile_only(&self) -> bool {
        self.kind == AdviceKind::CompileOnly
    }

    pub fn is_runtime_only(&self) -> bool {
        self.kind == AdviceKind::RuntimeOnly
    }

    /// Remove advice for an annotation processor declaration
    pub fn is_processor(&self) -> bool {
        self.is_remove()
            && self
                .from_configuration
                .as_deref()
                .and_then(Tier::from_configuration)
                == Some(Tier::AnnotationProcessor)
    }

    /// Fold the attribution of an equal advice into this one
    pub(crate) fn absorb(&mut self, other: &Advice) {
        debug_assert_eq!(self, other);
        self.parents.extend(other.parents.iter().cloned());
        self.used_transitive_dependencies
            .extend(other.used_transitive_dependencies.iter().cloned());
    }

    /// Identifier as it would be written in a build script
    pub fn printable_identifier(&self) -> String {
        if self.dependency.is_project() {
            format!("project(\"{}\")", self.dependency.identifier)
        } else {
            format!("\"{}\"", self.dependency)
        }
    }
}

impl PartialEq for Advice {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Advice {}

impl PartialOrd for Advice {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Advice {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Hash for Advice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.printable_identifier();
        match (&self.from_configuration, &self.to_configuration) {
            (None, Some(to)) => write!(f, "{}: {}({})", self.kind, to, id),
            (Some(from), None) => write!(f, "{}: {}({})", self.kind, from, id),
            (Some(from), Some(to)) => write!(f, "{}: {}({}) (was {})", self.kind, to, id, from),
            (None, None) => write!(f, "{}: {}", self.kind, id),
        }
    }
}
