//! Advice: the recommendations the engine produces, how they are computed
//! from declarations and usage, and how they are filtered and aggregated.

mod advisor;
mod bundle;
mod comprehensive;
mod filter;
mod model;
mod plugin;
mod ripple;
mod trace;

pub use advisor::Advisor;
pub use bundle::DependencyBundles;
pub use comprehensive::{merge_variants, ComprehensiveAdvice};
pub use filter::{category_of, AdviceFilter, SeverityHandler};
pub use model::{Advice, AdviceKind};
pub use plugin::PluginAdvice;
pub use ripple::{compute_ripples, is_downgrade, Ripple};
pub use trace::DependencyTrace;
