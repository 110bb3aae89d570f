use super::model::Advice;
use super::plugin::PluginAdvice;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Final verdict for one project, across all of its variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComprehensiveAdvice {
    pub project_path: String,
    pub dependency_advice: BTreeSet<Advice>,
    pub plugin_advice: BTreeSet<PluginAdvice>,
    pub should_fail: bool,
}

impl ComprehensiveAdvice {
    /// `fail_policy` comes from configuration; it only matters when there is advice
    pub fn new(
        project_path: impl Into<String>,
        dependency_advice: BTreeSet<Advice>,
        plugin_advice: BTreeSet<PluginAdvice>,
        fail_policy: bool,
    ) -> Self {
        let has_advice = !dependency_advice.is_empty() || !plugin_advice.is_empty();
        Self {
            project_path: project_path.into(),
            dependency_advice,
            plugin_advice,
            should_fail: has_advice && fail_policy,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dependency_advice.is_empty() && self.plugin_advice.is_empty()
    }
}

/// Union of per-variant advice sets
///
/// Equal advice from different variants collapses to one entry whose
/// parents and used transitives are the union of all of them.
pub fn merge_variants<I>(variants: I) -> BTreeSet<Advice>
where
    I: IntoIterator<Item = BTreeSet<Advice>>,
{
    let mut merged = BTreeSet::new();
    for advice in variants.into_iter().flatten() {
        let mut advice = advice;
        if let Some(existing) = merged.take(&advice) {
            advice.absorb(&existing);
        }
        merged.insert(advice);
    }
    merged
}
