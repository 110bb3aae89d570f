//! Core data model: identifiers, declarations, tiers and components.

mod component;
mod dependency;
mod tier;

pub use component::{ComponentWithTransitives, ProjectVariant, TransitiveDependency};
pub use dependency::{Dependency, DependencyId};
pub use tier::{Tier, MAIN_VARIANT};
