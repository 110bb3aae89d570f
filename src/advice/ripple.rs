// Ripples across projects
//
// A project that removes or narrows an api-like declaration stops exporting
// that dependency. Any downstream project that was told to add the same
// dependency, with the upstream project as a parent, is hit by the change.

use super::comprehensive::ComprehensiveAdvice;
use super::model::Advice;
use serde::Serialize;
use std::fmt;

/// A downgrade in one project paired with the advice it forces elsewhere
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Ripple {
    pub source_project: String,
    pub impacted_project: String,
    pub downgrade: Advice,
    pub upgrade: Advice,
}

impl fmt::Display for Ripple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} forces {} to add {}",
            self.source_project,
            self.downgrade.kind().as_str().to_lowercase(),
            self.downgrade.from_configuration().unwrap_or_default(),
            self.downgrade.printable_identifier(),
            self.impacted_project,
            self.upgrade.to_configuration().unwrap_or_default(),
        )
    }
}

/// Removal or narrowing of a declaration that was exported to consumers
pub fn is_downgrade(advice: &Advice) -> bool {
    (advice.is_remove() || advice.is_change() || advice.is_compile_only())
        && advice
            .from_configuration()
            .is_some_and(|c| c.to_ascii_lowercase().ends_with("api"))
}

/// Pair every upstream downgrade with the downstream ADDs that rely on it
pub fn compute_ripples<'a, I>(build: I) -> Vec<Ripple>
where
    I: IntoIterator<Item = &'a ComprehensiveAdvice>,
{
    let build: Vec<&ComprehensiveAdvice> = build.into_iter().collect();

    let mut ripples: Vec<Ripple> = Vec::new();
    for upstream in &build {
        for downgrade in upstream.dependency_advice.iter().filter(|a| is_downgrade(a)) {
            for downstream in &build {
                let impacts = downstream.dependency_advice.iter().filter(|a| {
                    a.is_add()
                        && a.identifier() == downgrade.identifier()
                        && a.parents().iter().any(|p| {
                            p.is_project() && p.identifier.as_str() == upstream.project_path
                        })
                });
                for upgrade in impacts {
                    ripples.push(Ripple {
                        source_project: upstream.project_path.clone(),
                        impacted_project: downstream.project_path.clone(),
                        downgrade: downgrade.clone(),
                        upgrade: upgrade.clone(),
                    });
                }
            }
        }
    }

    ripples.sort();
    ripples
}
