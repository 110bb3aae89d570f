// Whole-build analysis pipeline
//
// Every (project, variant) pair is reconciled independently and in parallel.
// A variant that fails is recorded and skipped; its siblings are unaffected.

use crate::advice::{
    compute_ripples, merge_variants, Advice, AdviceFilter, Advisor, ComprehensiveAdvice,
    DependencyTrace, PluginAdvice, Ripple, SeverityHandler,
};
use crate::cache::{Instrumentation, InstrumentationSnapshot, VariantSummary};
use crate::config::Config;
use crate::error::{AnalysisError, Result};
use crate::input::{BuildInput, ProjectInput, VariantInput};
use crate::model::ProjectVariant;
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// A variant whose analysis could not complete
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantFailure {
    pub project: String,
    pub variant: String,
    #[serde(serialize_with = "serialize_error")]
    pub error: AnalysisError,
}

fn serialize_error<S: Serializer>(
    error: &AnalysisError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&error.to_string())
}

/// Advice and diagnostics for one project
#[derive(Debug, Clone, Serialize)]
pub struct ProjectReport {
    pub advice: ComprehensiveAdvice,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub traces: Vec<DependencyTrace>,
}

/// Result of analysing a whole build
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub projects: Vec<ProjectReport>,
    pub failures: Vec<VariantFailure>,
    /// Downgrades that force dependent projects to declare what they used to inherit
    pub ripples: Vec<Ripple>,
    pub stats: InstrumentationSnapshot,
}

impl BuildReport {
    /// Whether the build should fail: some project fails, or some variant could not be analysed
    pub fn should_fail(&self) -> bool {
        !self.failures.is_empty() || self.projects.iter().any(|p| p.advice.should_fail)
    }

    pub fn advice_count(&self) -> usize {
        self.projects
            .iter()
            .map(|p| p.advice.dependency_advice.len() + p.advice.plugin_advice.len())
            .sum()
    }

    /// Ripples caused by downgrades in one project
    pub fn ripples_from<'a>(&'a self, project: &'a str) -> impl Iterator<Item = &'a Ripple> {
        self.ripples.iter().filter(move |r| r.source_project == project)
    }
}

/// Advice for one variant, before filtering
pub struct VariantOutcome {
    pub advice: BTreeSet<Advice>,
    pub traces: Vec<DependencyTrace>,
}

/// Runs reconciliation over every project variant of a build
pub struct Analyzer {
    advisor: Advisor,
    filter: AdviceFilter,
    severity: SeverityHandler,
    instrumentation: Instrumentation,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Analyzer {
    pub fn new(config: &Config) -> Self {
        if !config.bundles.is_empty() {
            let names: Vec<&str> = config.bundles.names().collect();
            debug!("Dependency bundles: {}", names.join(", "));
        }
        Self {
            advisor: Advisor::new()
                .with_facade_exemption(config.exempt_facades)
                .with_bundles(config.bundles.clone()),
            filter: AdviceFilter::new(config.issues.clone()),
            severity: SeverityHandler::new(config.issues.clone()),
            instrumentation: Instrumentation::new(),
        }
    }

    pub fn instrumentation(&self) -> &Instrumentation {
        &self.instrumentation
    }

    pub fn analyze_build(&self, input: &BuildInput) -> BuildReport {
        info!(
            "Analyzing {} projects ({} variants)...",
            input.projects.len(),
            input.variant_count()
        );

        let results: Vec<(ProjectReport, Vec<VariantFailure>)> = input
            .projects
            .par_iter()
            .map(|project| self.analyze_project(project))
            .collect();

        let mut projects = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (report, failed) in results {
            projects.push(report);
            failures.extend(failed);
        }
        projects.sort_by(|a, b| a.advice.project_path.cmp(&b.advice.project_path));

        let ripples = compute_ripples(projects.iter().map(|p| &p.advice));

        let report = BuildReport {
            projects,
            failures,
            ripples,
            stats: self.instrumentation.snapshot(),
        };
        info!(
            "Found {} advice across {} projects ({} ripples)",
            report.advice_count(),
            report.projects.len(),
            report.ripples.len()
        );
        report
    }

    fn analyze_project(&self, project: &ProjectInput) -> (ProjectReport, Vec<VariantFailure>) {
        let outcomes: Vec<(ProjectVariant, Result<VariantOutcome>)> = project
            .variants
            .par_iter()
            .map(|variant| {
                let pv = variant.project_variant(&project.path);
                let outcome = self.analyze_variant(&pv, variant);
                (pv, outcome)
            })
            .collect();

        let mut advice_sets = Vec::new();
        let mut traces = Vec::new();
        let mut failures = Vec::new();
        for (pv, outcome) in outcomes {
            match outcome {
                Ok(outcome) => {
                    advice_sets.push(outcome.advice);
                    traces.extend(outcome.traces);
                }
                Err(error) => {
                    warn!("Skipping {}: {}", pv, error);
                    self.instrumentation.record_failure();
                    failures.push(VariantFailure {
                        project: pv.project,
                        variant: pv.variant,
                        error,
                    });
                }
            }
        }

        let dependency_advice = self.filter.filter(merge_variants(advice_sets));
        let plugin_advice: BTreeSet<PluginAdvice> = self
            .filter
            .filter_plugins(project.plugin_advice.iter().cloned().collect());
        let fail_policy = self.severity.should_fail(&dependency_advice, &plugin_advice);

        traces.retain(|t| {
            dependency_advice
                .iter()
                .any(|a| a.is_add() && a.identifier() == &t.dependency)
        });
        traces.sort_by(|a, b| a.dependency.cmp(&b.dependency));
        traces.dedup_by(|a, b| a.dependency == b.dependency);

        let advice = ComprehensiveAdvice::new(
            project.path.as_str(),
            dependency_advice,
            plugin_advice,
            fail_policy,
        );
        (ProjectReport { advice, traces }, failures)
    }

    /// Reconcile one variant
    pub fn analyze_variant(
        &self,
        pv: &ProjectVariant,
        variant: &VariantInput,
    ) -> Result<VariantOutcome> {
        debug!("Analyzing {}", pv);

        let graph = variant.graph()?;
        let usages = variant.usage_facts();
        let advice = self.advisor.advise(pv, &variant.declared, &graph, &usages)?;
        let traces = DependencyTrace::all(&advice, &graph);

        self.instrumentation.record_visits(variant.declared.len());
        self.instrumentation.record_advice(&advice);
        self.instrumentation.store_summary(
            pv,
            VariantSummary {
                declared: variant.declared.len(),
                graph_nodes: graph.node_count(),
                used_owners: usages.owners().count(),
                advice: advice.len(),
            },
        );

        debug!("{}: {} advice", pv, advice.len());
        Ok(VariantOutcome { advice, traces })
    }
}
