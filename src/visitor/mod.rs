//! Walks the declared dependencies of one project variant.
//!
//! A visitor is a plain function `(&Dependency, &Context) -> T`. The reader
//! calls it once per declared dependency; callers fold the results. Visitors
//! must not rely on visitation order.

use crate::graph::DependencyGraph;
use crate::model::{Dependency, DependencyId, ProjectVariant};
use crate::usage::UsageFacts;
use std::collections::BTreeSet;

/// Read-only inputs shared by every visit
#[derive(Debug, Clone)]
pub struct Context<'a> {
    pub project: &'a ProjectVariant,
    pub dependencies: &'a [Dependency],
    pub graph: &'a DependencyGraph,
    pub usages: &'a UsageFacts,
    declared: BTreeSet<&'a DependencyId>,
}

impl<'a> Context<'a> {
    /// Identifiers declared with a configuration
    pub fn declared_ids(&self) -> &BTreeSet<&'a DependencyId> {
        &self.declared
    }

    pub fn is_declared(&self, id: &DependencyId) -> bool {
        self.declared_ids().contains(id)
    }

    /// Identifier of the project itself, as it appears in the graph
    pub fn project_id(&self) -> DependencyId {
        DependencyId::new(self.project.project.as_str())
    }
}

/// Drives visitor functions over a project variant's declared dependencies
pub struct GraphViewReader<'a> {
    context: Context<'a>,
}

impl<'a> GraphViewReader<'a> {
    pub fn new(
        project: &'a ProjectVariant,
        dependencies: &'a [Dependency],
        graph: &'a DependencyGraph,
        usages: &'a UsageFacts,
    ) -> Self {
        Self {
            context: Context {
                project,
                dependencies,
                graph,
                usages,
                declared: dependencies
                    .iter()
                    .filter(|d| d.configuration.is_some())
                    .map(|d| &d.identifier)
                    .collect(),
            },
        }
    }

    pub fn context(&self) -> &Context<'a> {
        &self.context
    }

    /// Visit every declared dependency exactly once, collecting each result
    pub fn accept<T, F>(&self, mut visitor: F) -> Vec<T>
    where
        F: FnMut(&Dependency, &Context<'a>) -> T,
    {
        self.context
            .dependencies
            .iter()
            .map(|dependency| visitor(dependency, &self.context))
            .collect()
    }
}
