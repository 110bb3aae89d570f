// Per-category filtering and fail policy

use super::model::{Advice, AdviceKind};
use super::plugin::PluginAdvice;
use crate::config::{IssueCategory, IssuesConfig, Severity};
use std::collections::BTreeSet;

/// Category an advice is reported under
pub fn category_of(advice: &Advice) -> IssueCategory {
    match advice.kind() {
        AdviceKind::Remove if advice.is_processor() => IssueCategory::UnusedAnnotationProcessors,
        AdviceKind::Remove => IssueCategory::UnusedDependencies,
        AdviceKind::Add => IssueCategory::UsedTransitiveDependencies,
        AdviceKind::Change => IssueCategory::IncorrectConfiguration,
        AdviceKind::CompileOnly => IssueCategory::CompileOnly,
        AdviceKind::RuntimeOnly => IssueCategory::RuntimeOnly,
    }
}

/// Drops advice the configuration ignores or excludes
#[derive(Debug, Clone, Default)]
pub struct AdviceFilter {
    issues: IssuesConfig,
}

impl AdviceFilter {
    pub fn new(issues: IssuesConfig) -> Self {
        Self { issues }
    }

    fn keeps(&self, category: IssueCategory, identifier: &str) -> bool {
        self.issues.severity(category) != Severity::Ignore
            && !self.issues.excludes(category, identifier)
    }

    pub fn filter(&self, advice: BTreeSet<Advice>) -> BTreeSet<Advice> {
        advice
            .into_iter()
            .filter(|a| self.keeps(category_of(a), a.identifier().as_str()))
            .collect()
    }

    pub fn filter_plugins(&self, plugins: BTreeSet<PluginAdvice>) -> BTreeSet<PluginAdvice> {
        plugins
            .into_iter()
            .filter(|p| self.keeps(IssueCategory::RedundantPlugins, &p.plugin_id))
            .collect()
    }
}

/// Decides whether surviving advice should fail the build
#[derive(Debug, Clone, Default)]
pub struct SeverityHandler {
    issues: IssuesConfig,
}

impl SeverityHandler {
    pub fn new(issues: IssuesConfig) -> Self {
        Self { issues }
    }

    /// Fail policy for a project's filtered advice
    pub fn should_fail(&self, advice: &BTreeSet<Advice>, plugins: &BTreeSet<PluginAdvice>) -> bool {
        let advice_fails = advice
            .iter()
            .any(|a| self.issues.severity(category_of(a)) == Severity::Fail);
        let plugins_fail = !plugins.is_empty()
            && self.issues.severity(IssueCategory::RedundantPlugins) == Severity::Fail;
        advice_fails || plugins_fail
    }
}
