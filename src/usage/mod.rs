//! Usage facts: which classes and members of a dependency the module touches.
//!
//! Facts are produced by bytecode analysis upstream and arrive here already
//! parsed. [`UsageFacts`] indexes them by owning dependency.

use crate::model::{DependencyId, Tier};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How a referenced class is needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessKind {
    /// Ordinary bytecode reference
    Compile,

    /// Annotation that is not retained at runtime
    CompileOnlyAnnotation,

    /// The dependency runs as an annotation processor
    AnnotationProcessor,

    /// Reflective or service-loader access with no compile-time reference
    Runtime,
}

/// A single usage fact
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Dependency that owns the referenced class
    pub owner: DependencyId,

    /// Fully qualified class name
    pub class_name: String,

    /// Referenced member, if the fact is finer than class level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,

    #[serde(default = "default_access")]
    pub access: AccessKind,

    /// The referenced type leaks into this module's public signatures
    #[serde(default)]
    pub exposed: bool,
}

fn default_access() -> AccessKind {
    AccessKind::Compile
}

impl Location {
    pub fn new(owner: impl Into<DependencyId>, class_name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            class_name: class_name.into(),
            member: None,
            access: AccessKind::Compile,
            exposed: false,
        }
    }

    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }

    pub fn with_access(mut self, access: AccessKind) -> Self {
        self.access = access;
        self
    }

    pub fn exposed(mut self) -> Self {
        self.exposed = true;
        self
    }
}

/// All facts about one dependency
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyUsage {
    locations: BTreeSet<Location>,
}

impl DependencyUsage {
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    fn has(&self, access: AccessKind) -> bool {
        self.locations.iter().any(|l| l.access == access)
    }

    /// Used classes, sorted and deduplicated
    pub fn class_names(&self) -> BTreeSet<&str> {
        self.locations.iter().map(|l| l.class_name.as_str()).collect()
    }

    /// Tier this usage requires, or `None` when there is no usage at all
    pub fn required_tier(&self) -> Option<Tier> {
        if self.locations.is_empty() {
            return None;
        }

        let compile = self.has(AccessKind::Compile);
        let annotations = self.has(AccessKind::CompileOnlyAnnotation);
        let runtime = self.has(AccessKind::Runtime);

        let exposed = self
            .locations
            .iter()
            .any(|l| l.access == AccessKind::Compile && l.exposed);

        let tier = if compile && exposed {
            Tier::Api
        } else if compile || (annotations && runtime) {
            Tier::Implementation
        } else if annotations {
            Tier::CompileOnly
        } else if runtime {
            Tier::RuntimeOnly
        } else {
            Tier::AnnotationProcessor
        };
        Some(tier)
    }
}

/// Usage facts of one project variant, keyed by owning dependency
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageFacts {
    by_owner: BTreeMap<DependencyId, DependencyUsage>,
}

impl UsageFacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_locations(locations: impl IntoIterator<Item = Location>) -> Self {
        let mut facts = Self::new();
        for location in locations {
            facts.add(location);
        }
        facts
    }

    pub fn add(&mut self, location: Location) {
        self.by_owner
            .entry(location.owner.clone())
            .or_default()
            .locations
            .insert(location);
    }

    /// Facts for a dependency; `None` means the dependency is unused
    pub fn get(&self, id: &DependencyId) -> Option<&DependencyUsage> {
        self.by_owner.get(id).filter(|usage| !usage.is_empty())
    }

    pub fn is_used(&self, id: &DependencyId) -> bool {
        self.get(id).is_some()
    }

    pub fn required_tier(&self, id: &DependencyId) -> Option<Tier> {
        self.get(id).and_then(DependencyUsage::required_tier)
    }

    pub fn owners(&self) -> impl Iterator<Item = &DependencyId> {
        self.by_owner.keys()
    }

    pub fn len(&self) -> usize {
        self.by_owner.values().map(DependencyUsage::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_owner.is_empty()
    }
}
