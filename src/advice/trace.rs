use super::model::Advice;
use crate::graph::DependencyGraph;
use crate::model::DependencyId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Explains why a transitive dependency is on the classpath
///
/// One path per parent, `parent -> ... -> transitive`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyTrace {
    pub dependency: DependencyId,
    pub paths: Vec<Vec<DependencyId>>,
}

impl DependencyTrace {
    /// Trace an ADD advice through the graph; other kinds have no trace
    pub fn for_advice(advice: &Advice, graph: &DependencyGraph) -> Option<Self> {
        if !advice.is_add() || advice.parents().is_empty() {
            return None;
        }

        let target = advice.identifier();
        let paths: Vec<Vec<DependencyId>> = advice
            .parents()
            .iter()
            .map(|parent| graph.shortest_path(&parent.identifier, target))
            .filter(|path| !path.is_empty())
            .collect();

        if paths.is_empty() {
            return None;
        }

        Some(Self {
            dependency: target.clone(),
            paths,
        })
    }

    /// Traces for every ADD advice in a set, in advice order
    pub fn all(advice: &BTreeSet<Advice>, graph: &DependencyGraph) -> Vec<Self> {
        advice
            .iter()
            .filter_map(|a| Self::for_advice(a, graph))
            .collect()
    }
}

impl fmt::Display for DependencyTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.paths.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let hops: Vec<&str> = path.iter().map(DependencyId::as_str).collect();
            write!(f, "{}", hops.join(" -> "))?;
        }
        Ok(())
    }
}
