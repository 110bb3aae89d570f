//! Shared instrumentation for a whole-build analysis
//!
//! Many variant analyses run in parallel and report into one
//! [`Instrumentation`]. Counters merge by atomic increment, so concurrent
//! updates commute. Variant summaries are write-once: the first summary stored
//! for a variant is kept and later writes are ignored.

use crate::advice::{Advice, AdviceKind};
use crate::model::ProjectVariant;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

const KINDS: [AdviceKind; 5] = [
    AdviceKind::Remove,
    AdviceKind::Change,
    AdviceKind::Add,
    AdviceKind::CompileOnly,
    AdviceKind::RuntimeOnly,
];

fn slot(kind: AdviceKind) -> usize {
    match kind {
        AdviceKind::Remove => 0,
        AdviceKind::Change => 1,
        AdviceKind::Add => 2,
        AdviceKind::CompileOnly => 3,
        AdviceKind::RuntimeOnly => 4,
    }
}

/// Immutable record of one finished variant analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSummary {
    pub declared: usize,
    pub graph_nodes: usize,
    pub used_owners: usize,
    pub advice: usize,
}

/// Point-in-time copy of all counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentationSnapshot {
    pub variants_analyzed: u64,
    pub variants_failed: u64,
    pub dependencies_visited: u64,
    pub advice_by_kind: BTreeMap<AdviceKind, u64>,
}

#[derive(Debug, Default)]
pub struct Instrumentation {
    variants_analyzed: AtomicU64,
    variants_failed: AtomicU64,
    dependencies_visited: AtomicU64,
    advice_by_kind: [AtomicU64; 5],
    summaries: RwLock<HashMap<ProjectVariant, Arc<VariantSummary>>>,
}

impl Instrumentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_visits(&self, count: usize) {
        self.dependencies_visited
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.variants_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a variant's advice by kind
    pub fn record_advice(&self, advice: &BTreeSet<Advice>) {
        self.variants_analyzed.fetch_add(1, Ordering::Relaxed);
        for item in advice {
            self.advice_by_kind[slot(item.kind())].fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Store a variant summary unless one is already present
    ///
    /// Returns the summary that ends up stored.
    pub fn store_summary(
        &self,
        variant: &ProjectVariant,
        summary: VariantSummary,
    ) -> Arc<VariantSummary> {
        if let Some(existing) = self.summary(variant) {
            return existing;
        }

        let mut summaries = match self.summaries.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        summaries
            .entry(variant.clone())
            .or_insert_with(|| Arc::new(summary))
            .clone()
    }

    pub fn summary(&self, variant: &ProjectVariant) -> Option<Arc<VariantSummary>> {
        let summaries = match self.summaries.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        summaries.get(variant).cloned()
    }

    pub fn snapshot(&self) -> InstrumentationSnapshot {
        InstrumentationSnapshot {
            variants_analyzed: self.variants_analyzed.load(Ordering::Relaxed),
            variants_failed: self.variants_failed.load(Ordering::Relaxed),
            dependencies_visited: self.dependencies_visited.load(Ordering::Relaxed),
            advice_by_kind: KINDS
                .iter()
                .map(|kind| (*kind, self.advice_by_kind[slot(*kind)].load(Ordering::Relaxed)))
                .filter(|(_, count)| *count > 0)
                .collect(),
        }
    }
}
