// Advice reconciliation
//
// Compares what a project variant declares against what its code uses and
// produces the minimal set of add/remove/change recommendations.

use super::bundle::DependencyBundles;
use super::model::{Advice, AdviceKind};
use crate::error::{AnalysisError, Result};
use crate::graph::DependencyGraph;
use crate::model::{
    ComponentWithTransitives, Dependency, DependencyId, ProjectVariant, Tier, TransitiveDependency,
};
use crate::usage::UsageFacts;
use crate::visitor::{Context, GraphViewReader};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// What one declared dependency contributes to the result
#[derive(Debug)]
struct Finding {
    /// The declaration and the used transitives reached through it
    component: Option<ComponentWithTransitives>,

    /// Advice about the declaration itself
    advice: Option<Advice>,

    /// A used dependency that is present but has no configuration
    undeclared: Option<DependencyId>,
}

impl Finding {
    fn empty() -> Self {
        Self {
            component: None,
            advice: None,
            undeclared: None,
        }
    }
}

/// Reconciles declarations against usage for one project variant
#[derive(Debug, Clone)]
pub struct Advisor {
    exempt_facades: bool,
    bundles: DependencyBundles,
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Advisor {
    pub fn new() -> Self {
        Self {
            exempt_facades: true,
            bundles: DependencyBundles::new(),
        }
    }

    /// Whether unused facades are kept instead of advised for removal
    pub fn with_facade_exemption(mut self, exempt: bool) -> Self {
        self.exempt_facades = exempt;
        self
    }

    pub fn with_bundles(mut self, bundles: DependencyBundles) -> Self {
        self.bundles = bundles;
        self
    }

    /// Compute the advice set for one project variant
    pub fn advise(
        &self,
        project: &ProjectVariant,
        declared: &[Dependency],
        graph: &DependencyGraph,
        usages: &UsageFacts,
    ) -> Result<BTreeSet<Advice>> {
        check_graph(project, declared, graph)?;

        let reader = GraphViewReader::new(project, declared, graph, usages);
        let findings = reader
            .accept(|dependency, ctx| self.visit(dependency, ctx))
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        let mut advice = BTreeSet::new();
        let mut parents: BTreeMap<DependencyId, BTreeSet<Dependency>> = BTreeMap::new();
        let mut removed: BTreeSet<DependencyId> = BTreeSet::new();
        let mut undeclared: BTreeSet<DependencyId> = BTreeSet::new();

        for finding in findings {
            if let Some(component) = finding.component {
                for transitive in &component.used_transitives {
                    parents
                        .entry(transitive.identifier.clone())
                        .or_default()
                        .insert(component.dependency.clone());
                }
            }
            if let Some(item) = finding.advice {
                if item.is_remove() {
                    removed.insert(item.identifier().clone());
                }
                insert_merged(&mut advice, item);
            }
            if let Some(id) = finding.undeclared {
                undeclared.insert(id);
            }
        }

        for id in &undeclared {
            parents.entry(id.clone()).or_default();
        }

        for (id, parents) in parents {
            let Some(tier) = usages.required_tier(&id) else {
                continue;
            };
            let direct = undeclared.contains(&id);
            if !direct && !should_add_transitive(tier, &parents, &removed) {
                debug!("{}: not adding transitive {} ({})", project, id, tier);
                continue;
            }

            let transitive = TransitiveDependency::new(Dependency::new(id), parents);
            if !direct && self.bundles.supplied_by_parent(&transitive) {
                debug!(
                    "{}: {} is supplied by its bundle",
                    project, transitive.dependency.identifier
                );
                continue;
            }
            insert_merged(
                &mut advice,
                Advice::of_add(transitive, tier.configuration_name(&project.variant)),
            );
        }

        check_unambiguous(&advice)?;

        debug!("{}: {} advice", project, advice.len());
        Ok(advice)
    }

    fn visit(&self, dependency: &Dependency, ctx: &Context<'_>) -> Result<Finding> {
        if dependency.identifier == ctx.project_id() {
            return Ok(Finding::empty());
        }

        let required = ctx.usages.required_tier(&dependency.identifier);

        let Some(configuration) = dependency.configuration.as_deref() else {
            let mut finding = Finding::empty();
            if required.is_some() {
                finding.undeclared = Some(dependency.identifier.clone());
            }
            return Ok(finding);
        };

        let component =
            ComponentWithTransitives::new(dependency.clone(), used_transitives(dependency, ctx));

        let advice = match required {
            None if self.exempt_facades && component.is_facade() => {
                debug!("{}: keeping facade {}", ctx.project, dependency.identifier);
                None
            }
            None if self.bundles.supplies_member(&component) => {
                debug!("{}: keeping bundle entry point {}", ctx.project, dependency.identifier);
                None
            }
            None => Some(Advice::of_remove_component(&component)?),
            Some(tier) if Tier::from_configuration(configuration) == Some(tier) => None,
            Some(tier) => {
                let to = tier.configuration_name(&ctx.project.variant);
                Some(match tier {
                    Tier::CompileOnly => Advice::of_compile_only(dependency, to)?,
                    Tier::RuntimeOnly => Advice::of_runtime_only(dependency, to)?,
                    _ => Advice::of_change(dependency, to)?,
                })
            }
        };

        Ok(Finding {
            component: Some(component),
            advice,
            undeclared: None,
        })
    }
}

/// Used, undeclared dependencies reachable from a declaration
fn used_transitives(dependency: &Dependency, ctx: &Context<'_>) -> BTreeSet<Dependency> {
    let project_id = ctx.project_id();
    ctx.graph
        .reachable_from(&dependency.identifier)
        .into_iter()
        .filter(|id| *id != project_id)
        .filter(|id| ctx.usages.is_used(id))
        .filter(|id| !ctx.is_declared(id))
        .map(Dependency::new)
        .collect()
}

fn should_add_transitive(
    tier: Tier,
    parents: &BTreeSet<Dependency>,
    removed: &BTreeSet<DependencyId>,
) -> bool {
    match tier {
        Tier::CompileOnly | Tier::AnnotationProcessor => false,
        // Still arrives at runtime while any parent stays
        Tier::RuntimeOnly => {
            !parents.is_empty() && parents.iter().all(|p| removed.contains(&p.identifier))
        }
        Tier::Api | Tier::Implementation => true,
    }
}

fn insert_merged(set: &mut BTreeSet<Advice>, mut advice: Advice) {
    if let Some(existing) = set.take(&advice) {
        advice.absorb(&existing);
    }
    set.insert(advice);
}

/// The graph must be consistent with the declarations it was resolved from
fn check_graph(
    project: &ProjectVariant,
    declared: &[Dependency],
    graph: &DependencyGraph,
) -> Result<()> {
    let malformed = |id: &DependencyId| AnalysisError::MalformedGraph {
        project: project.project.clone(),
        variant: project.variant.clone(),
        identifier: id.to_string(),
    };

    if let Some(missing) = declared
        .iter()
        .filter(|d| d.configuration.is_some())
        .find(|d| !graph.contains(&d.identifier))
    {
        return Err(malformed(&missing.identifier));
    }

    let root = DependencyId::new(project.project.as_str());
    let declared_ids: BTreeSet<&DependencyId> = declared.iter().map(|d| &d.identifier).collect();
    if let Some(stray) = graph
        .successors(&root)
        .into_iter()
        .find(|id| !declared_ids.contains(id))
    {
        return Err(malformed(stray));
    }

    Ok(())
}

/// No declaration may receive two conflicting recommendations
fn check_unambiguous(advice: &BTreeSet<Advice>) -> Result<()> {
    let mut by_declaration: BTreeMap<(&DependencyId, &str), Vec<AdviceKind>> = BTreeMap::new();
    for item in advice.iter().filter(|a| a.kind().is_declaration()) {
        if let Some(from) = item.from_configuration() {
            by_declaration
                .entry((item.identifier(), from))
                .or_default()
                .push(item.kind());
        }
    }

    match by_declaration.into_iter().find(|(_, kinds)| kinds.len() > 1) {
        Some(((identifier, configuration), kinds)) => Err(AnalysisError::AmbiguousAdvice {
            identifier: identifier.to_string(),
            configuration: configuration.to_string(),
            kinds: kinds
                .iter()
                .map(AdviceKind::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        }),
        None => Ok(()),
    }
}
