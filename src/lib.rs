//! depadvice - dependency advice for multi-module builds
//!
//! This library compares what each module of a build declares against what
//! its code actually uses, and recommends dependencies to add, remove, or
//! move to a different visibility tier.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **Input** - Load the resolved graph, declarations and usage facts
//! 2. **Graph** - Build a dependency graph per project variant
//! 3. **Reconciliation** - Visit every declaration and compute advice
//! 4. **Aggregation** - Merge variants, filter, decide whether to fail, and
//!    find downgrades that ripple into dependent projects
//! 5. **Reporting** - Output results as terminal text or JSON

pub mod advice;
pub mod analysis;
pub mod cache;
pub mod config;
pub mod error;
pub mod graph;
pub mod input;
pub mod model;
pub mod report;
pub mod usage;
pub mod visitor;

pub use advice::{
    Advice, AdviceKind, Advisor, ComprehensiveAdvice, DependencyBundles, PluginAdvice, Ripple,
};
pub use analysis::{Analyzer, BuildReport, VariantFailure};
pub use config::Config;
pub use error::AnalysisError;
pub use graph::DependencyGraph;
pub use input::BuildInput;
pub use model::{
    ComponentWithTransitives, Dependency, DependencyId, ProjectVariant, Tier, TransitiveDependency,
};
pub use report::{ReportFormat, Reporter};
pub use usage::{AccessKind, Location, UsageFacts};
pub use visitor::{Context, GraphViewReader};
