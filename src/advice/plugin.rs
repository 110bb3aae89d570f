use serde::{Deserialize, Serialize};
use std::fmt;

/// Advice about a build-tool plugin that is applied but does nothing useful
///
/// Detection happens upstream; the engine only carries these through to the
/// project verdict.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PluginAdvice {
    pub plugin_id: String,
    pub reason: String,
}

impl PluginAdvice {
    pub fn new(plugin_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            reason: reason.into(),
        }
    }

    /// The common redundant-kapt case
    pub fn redundant_kapt() -> Self {
        Self::new(
            "kotlin-kapt",
            "this project has the kapt plugin applied, but there are no used annotation processors",
        )
    }
}

impl fmt::Display for PluginAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.plugin_id, self.reason)
    }
}
