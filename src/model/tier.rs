use serde::{Deserialize, Serialize};

/// The variant whose configurations carry no prefix
pub const MAIN_VARIANT: &str = "main";

/// Visibility tier a dependency can be declared on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Exported as part of the module's ABI
    Api,
    /// Needed to compile and run, not exported
    Implementation,
    /// Needed only at compile time
    CompileOnly,
    /// Needed only at runtime
    RuntimeOnly,
    /// Runs as an annotation processor
    AnnotationProcessor,
}

impl Tier {
    /// Base configuration name for the main variant
    pub fn base_name(&self) -> &'static str {
        match self {
            Tier::Api => "api",
            Tier::Implementation => "implementation",
            Tier::CompileOnly => "compileOnly",
            Tier::RuntimeOnly => "runtimeOnly",
            Tier::AnnotationProcessor => "annotationProcessor",
        }
    }

    /// Configuration name for this tier in the given variant
    ///
    /// `main` yields the bare name; `test` yields `testImplementation`.
    pub fn configuration_name(&self, variant: &str) -> String {
        if variant.is_empty() || variant == MAIN_VARIANT {
            return self.base_name().to_string();
        }

        let base = self.base_name();
        let mut chars = base.chars();
        match chars.next() {
            Some(first) => format!("{}{}{}", variant, first.to_ascii_uppercase(), chars.as_str()),
            None => variant.to_string(),
        }
    }

    /// Classify a declared configuration name by suffix, case-insensitively
    ///
    /// Returns `None` for names that map to no known tier (e.g. legacy `compile`).
    pub fn from_configuration(name: &str) -> Option<Tier> {
        let lower = name.to_ascii_lowercase();

        if lower.ends_with("compileonlyapi") || lower.ends_with("compileonly") {
            Some(Tier::CompileOnly)
        } else if lower.ends_with("runtimeonly") {
            Some(Tier::RuntimeOnly)
        } else if lower.ends_with("annotationprocessor")
            || lower.ends_with("kapt")
            || lower.ends_with("ksp")
        {
            Some(Tier::AnnotationProcessor)
        } else if lower.ends_with("implementation") {
            Some(Tier::Implementation)
        } else if lower.ends_with("api") {
            Some(Tier::Api)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base_name())
    }
}
