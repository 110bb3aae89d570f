// Configuration loader

use crate::advice::DependencyBundles;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for depadvice analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How each category of advice is treated
    pub issues: IssuesConfig,

    /// Keep unused facades instead of advising their removal
    pub exempt_facades: bool,

    /// Named groups of identifier regexes that stand in for each other
    pub bundles: DependencyBundles,

    /// Report configuration
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: terminal, json
    pub format: String,

    /// Print the dependency path behind each added transitive
    pub show_traces: bool,
}

/// What to do with advice of one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Warn,
    Fail,
    Ignore,
}

/// Categories advice is sorted into for filtering and severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    UnusedDependencies,
    UsedTransitiveDependencies,
    IncorrectConfiguration,
    CompileOnly,
    RuntimeOnly,
    UnusedAnnotationProcessors,
    RedundantPlugins,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 7] = [
        IssueCategory::UnusedDependencies,
        IssueCategory::UsedTransitiveDependencies,
        IssueCategory::IncorrectConfiguration,
        IssueCategory::CompileOnly,
        IssueCategory::RuntimeOnly,
        IssueCategory::UnusedAnnotationProcessors,
        IssueCategory::RedundantPlugins,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::UnusedDependencies => "unused dependencies",
            IssueCategory::UsedTransitiveDependencies => "used transitive dependencies",
            IssueCategory::IncorrectConfiguration => "incorrect configuration",
            IssueCategory::CompileOnly => "compile-only candidates",
            IssueCategory::RuntimeOnly => "runtime-only candidates",
            IssueCategory::UnusedAnnotationProcessors => "unused annotation processors",
            IssueCategory::RedundantPlugins => "redundant plugins",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueConfig {
    pub severity: Severity,

    /// Identifiers (or `*` patterns) never reported in this category
    pub exclude: Vec<String>,
}

impl IssueConfig {
    pub fn excludes(&self, identifier: &str) -> bool {
        self.exclude.iter().any(|pattern| glob_match(pattern, identifier))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuesConfig {
    /// Applies on top of every category
    pub any: IssueConfig,
    pub unused_dependencies: IssueConfig,
    pub used_transitive_dependencies: IssueConfig,
    pub incorrect_configuration: IssueConfig,
    pub compile_only: IssueConfig,
    pub runtime_only: IssueConfig,
    pub unused_annotation_processors: IssueConfig,
    pub redundant_plugins: IssueConfig,
}

impl IssuesConfig {
    pub fn get(&self, category: IssueCategory) -> &IssueConfig {
        match category {
            IssueCategory::UnusedDependencies => &self.unused_dependencies,
            IssueCategory::UsedTransitiveDependencies => &self.used_transitive_dependencies,
            IssueCategory::IncorrectConfiguration => &self.incorrect_configuration,
            IssueCategory::CompileOnly => &self.compile_only,
            IssueCategory::RuntimeOnly => &self.runtime_only,
            IssueCategory::UnusedAnnotationProcessors => &self.unused_annotation_processors,
            IssueCategory::RedundantPlugins => &self.redundant_plugins,
        }
    }

    /// Severity of a category, with `any` taking precedence for ignore and fail
    pub fn severity(&self, category: IssueCategory) -> Severity {
        match (self.any.severity, self.get(category).severity) {
            (Severity::Ignore, _) | (_, Severity::Ignore) => Severity::Ignore,
            (Severity::Fail, _) | (_, Severity::Fail) => Severity::Fail,
            _ => Severity::Warn,
        }
    }

    /// Is this identifier excluded from the category, directly or via `any`
    pub fn excludes(&self, category: IssueCategory, identifier: &str) -> bool {
        self.any.excludes(identifier) || self.get(category).excludes(identifier)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            issues: IssuesConfig::default(),
            exempt_facades: true,
            bundles: DependencyBundles::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "terminal".to_string(),
            show_traces: false,
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".depadvice.yml",
            ".depadvice.yaml",
            ".depadvice.toml",
            "depadvice.yml",
            "depadvice.yaml",
            "depadvice.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }
}

/// Simple glob matching for patterns like "com.squareup.*" or "*:annotations"
fn glob_match(pattern: &str, text: &str) -> bool {
    if pattern == "*" {
        return true;
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        return text.ends_with(suffix);
    }

    if let Some(prefix) = pattern.strip_suffix('*') {
        return text.starts_with(prefix);
    }

    // Exact match
    text == pattern
}
