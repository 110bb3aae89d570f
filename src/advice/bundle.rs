//! Dependency bundles: groups of identifiers that are treated as one unit.
//!
//! A bundle is a named list of regular expressions. Each pattern must match
//! a whole identifier. When a used transitive and one of its parents belong
//! to the same bundle, the parent already supplies it and no ADD is advised.
//! When an unused declaration supplies a used transitive from its own
//! bundle, the declaration is kept.

use crate::model::{ComponentWithTransitives, DependencyId, TransitiveDependency};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Bundle {
    name: String,
    patterns: Vec<String>,
    members: Vec<Regex>,
}

impl Bundle {
    fn contains(&self, id: &DependencyId) -> bool {
        self.members.iter().any(|regex| regex.is_match(id.as_str()))
    }
}

/// Named groups of identifier patterns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct DependencyBundles {
    bundles: Vec<Bundle>,
}

impl DependencyBundles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bundle. Fails if any pattern is not a valid regular expression.
    pub fn with_bundle<I, S>(
        mut self,
        name: impl Into<String>,
        patterns: I,
    ) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let members = patterns
            .iter()
            .map(|p| Regex::new(&format!("^(?:{})$", p)))
            .collect::<Result<Vec<_>, _>>()?;
        self.bundles.push(Bundle {
            name: name.into(),
            patterns,
            members,
        });
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bundles.iter().map(|b| b.name.as_str())
    }

    /// `id` and one of `others` belong to a common bundle
    fn shared(&self, id: &DependencyId, others: &[&DependencyId]) -> bool {
        self.bundles
            .iter()
            .filter(|bundle| bundle.contains(id))
            .any(|bundle| others.iter().any(|other| bundle.contains(other)))
    }

    /// Some parent of the transitive is in one of its bundles
    pub fn supplied_by_parent(&self, transitive: &TransitiveDependency) -> bool {
        let parents: Vec<&DependencyId> =
            transitive.parents.iter().map(|p| &p.identifier).collect();
        self.shared(&transitive.dependency.identifier, &parents)
    }

    /// Some used transitive of the component is in one of its bundles
    pub fn supplies_member(&self, component: &ComponentWithTransitives) -> bool {
        let used: Vec<&DependencyId> =
            component.used_transitives.iter().map(|d| &d.identifier).collect();
        self.shared(&component.dependency.identifier, &used)
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for DependencyBundles {
    type Error = regex::Error;

    fn try_from(map: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        map.into_iter().try_fold(Self::new(), |bundles, (name, patterns)| {
            bundles.with_bundle(name, patterns)
        })
    }
}

impl From<DependencyBundles> for BTreeMap<String, Vec<String>> {
    fn from(bundles: DependencyBundles) -> Self {
        bundles
            .bundles
            .into_iter()
            .map(|b| (b.name, b.patterns))
            .collect()
    }
}
