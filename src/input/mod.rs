//! Materialized analysis input.
//!
//! Resolution, build-script parsing and bytecode analysis happen upstream;
//! their results arrive as one JSON or YAML document:
//!
//! ```yaml
//! projects:
//!   - path: ":app"
//!     variants:
//!       - name: main
//!         declared:
//!           - { identifier: "commons-io:commons-io", configuration: compile }
//!         edges:
//!           - [":app", "commons-io:commons-io"]
//!         usages:
//!           - { owner: "commons-io:commons-io", class_name: "org.apache.commons.io.IOUtils" }
//!     plugin_advice: []
//! ```

use crate::advice::PluginAdvice;
use crate::error::Result as AnalysisResult;
use crate::graph::DependencyGraph;
use crate::model::{Dependency, DependencyId, ProjectVariant, MAIN_VARIANT};
use crate::usage::{Location, UsageFacts};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildInput {
    #[serde(default)]
    pub projects: Vec<ProjectInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInput {
    /// Project path, e.g. `:app`
    pub path: String,

    #[serde(default)]
    pub variants: Vec<VariantInput>,

    /// Plugin advice computed upstream
    #[serde(default)]
    pub plugin_advice: Vec<PluginAdvice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantInput {
    #[serde(default = "main_variant")]
    pub name: String,

    #[serde(default)]
    pub declared: Vec<Dependency>,

    /// `[from, to]` pairs, "from depends on to"
    #[serde(default)]
    pub edges: Vec<(DependencyId, DependencyId)>,

    #[serde(default)]
    pub usages: Vec<Location>,
}

fn main_variant() -> String {
    MAIN_VARIANT.to_string()
}

impl VariantInput {
    pub fn project_variant(&self, project: &str) -> ProjectVariant {
        ProjectVariant::new(project, self.name.as_str())
    }

    pub fn graph(&self) -> AnalysisResult<DependencyGraph> {
        DependencyGraph::from_edges(self.edges.iter().cloned())
    }

    pub fn usage_facts(&self) -> UsageFacts {
        UsageFacts::from_locations(self.usages.iter().cloned())
    }
}

impl BuildInput {
    /// Load input from a file (JSON or YAML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read input file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML input"),
            _ => serde_json::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse JSON input"),
        }
    }

    pub fn variant_count(&self) -> usize {
        self.projects.iter().map(|p| p.variants.len()).sum()
    }
}
