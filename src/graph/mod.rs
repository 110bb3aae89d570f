//! Resolved dependency graph of one project variant.
//!
//! Edges point from consumer to dependency: `a -> b` means "a depends on b".
//! The graph is built once from the resolution result and only queried
//! afterwards.

use crate::error::{AnalysisError, Result};
use crate::model::DependencyId;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// Directed graph of dependency identifiers
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// The underlying directed graph
    inner: DiGraph<DependencyId, ()>,

    /// Map from identifier to node index
    node_map: HashMap<DependencyId, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(from, to)` pairs
    pub fn from_edges<I, A, B>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<DependencyId>,
        B: Into<DependencyId>,
    {
        let mut graph = Self::new();
        for (from, to) in edges {
            graph.add_edge(from, to)?;
        }
        Ok(graph)
    }

    /// Add a node if absent and return its index
    pub fn add_node(&mut self, id: impl Into<DependencyId>) -> NodeIndex {
        let id = id.into();
        if let Some(&idx) = self.node_map.get(&id) {
            return idx;
        }
        let idx = self.inner.add_node(id.clone());
        self.node_map.insert(id, idx);
        idx
    }

    /// Add a "depends on" edge, creating both endpoints as needed
    ///
    /// Adding an existing edge is a no-op. Self-loops are rejected.
    pub fn add_edge(
        &mut self,
        from: impl Into<DependencyId>,
        to: impl Into<DependencyId>,
    ) -> Result<()> {
        let from = from.into();
        let to = to.into();
        if from == to {
            return Err(AnalysisError::InvalidEdge {
                node: from.to_string(),
            });
        }

        let from_idx = self.add_node(from);
        let to_idx = self.add_node(to);
        if self.inner.find_edge(from_idx, to_idx).is_none() {
            self.inner.add_edge(from_idx, to_idx, ());
        }
        Ok(())
    }

    pub fn contains(&self, id: &DependencyId) -> bool {
        self.node_map.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// All node identifiers, sorted
    pub fn nodes(&self) -> BTreeSet<DependencyId> {
        self.node_map.keys().cloned().collect()
    }

    /// All edges as `(from, to)` pairs, sorted
    pub fn edges(&self) -> BTreeSet<(DependencyId, DependencyId)> {
        self.inner
            .raw_edges()
            .iter()
            .map(|edge| {
                (
                    self.inner[edge.source()].clone(),
                    self.inner[edge.target()].clone(),
                )
            })
            .collect()
    }

    /// Direct dependencies of a node, sorted
    pub fn successors(&self, id: &DependencyId) -> Vec<&DependencyId> {
        let Some(&idx) = self.node_map.get(id) else {
            return Vec::new();
        };

        let mut successors: Vec<&DependencyId> = self
            .inner
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|n| &self.inner[n])
            .collect();
        successors.sort();
        successors.dedup();
        successors
    }

    /// Every node transitively reachable from `root`, excluding `root` itself
    pub fn reachable_from(&self, root: &DependencyId) -> BTreeSet<DependencyId> {
        let mut reachable = BTreeSet::new();
        let Some(&start_idx) = self.node_map.get(root) else {
            return reachable;
        };

        let mut dfs = Dfs::new(&self.inner, start_idx);
        while let Some(node_idx) = dfs.next(&self.inner) {
            if node_idx != start_idx {
                reachable.insert(self.inner[node_idx].clone());
            }
        }
        reachable
    }

    /// Does `from` reach `to` through one or more edges
    pub fn reaches(&self, from: &DependencyId, to: &DependencyId) -> bool {
        !self.shortest_path(from, to).is_empty() && from != to
    }

    /// Shortest path `source -> ... -> target`, or empty if unreachable
    ///
    /// Breadth-first with successors visited in identifier order, so ties
    /// resolve the same way for identical graphs.
    pub fn shortest_path(&self, source: &DependencyId, target: &DependencyId) -> Vec<DependencyId> {
        let (Some(&start), Some(&goal)) = (self.node_map.get(source), self.node_map.get(target))
        else {
            return Vec::new();
        };
        if start == goal {
            return vec![source.clone()];
        }

        let mut predecessor: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            let mut next: Vec<NodeIndex> = self
                .inner
                .neighbors_directed(current, Direction::Outgoing)
                .collect();
            next.sort_by(|a, b| self.inner[*a].cmp(&self.inner[*b]));
            next.dedup();

            for neighbor in next {
                if neighbor == start || predecessor.contains_key(&neighbor) {
                    continue;
                }
                predecessor.insert(neighbor, current);
                if neighbor == goal {
                    return self.unwind(&predecessor, start, goal);
                }
                queue.push_back(neighbor);
            }
        }

        Vec::new()
    }

    fn unwind(
        &self,
        predecessor: &HashMap<NodeIndex, NodeIndex>,
        start: NodeIndex,
        goal: NodeIndex,
    ) -> Vec<DependencyId> {
        let mut path = vec![self.inner[goal].clone()];
        let mut current = goal;
        while current != start {
            match predecessor.get(&current) {
                Some(&prev) => {
                    path.push(self.inner[prev].clone());
                    current = prev;
                }
                None => return Vec::new(),
            }
        }
        path.reverse();
        path
    }
}
