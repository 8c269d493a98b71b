//! Module system for cpboot.
//!
//! Turns an ordered classpath into a conflict-free set of modules and
//! resolves them into a layer:
//!
//! - **Ignore rules**: drop classpath entries before any module work
//! - **Package ownership**: the first entry containing a package owns it;
//!   later entries lose their files in that package
//! - **Synthesis**: one module per entry, named from its manifest or file name
//! - **Merging**: regroup finished modules under caller-chosen names
//! - **Resolution**: bind the modules against a parent layer
//!
//! # Example
//!
//! ```ignore
//! use cpboot_module::{Configuration, ModuleFinder, ModuleLayer, ModulePlanner};
//!
//! let plan = ModulePlanner::default().plan(&classpath)?;
//! let finder = ModuleFinder::of(plan.into_modules())?;
//! let config = Configuration::resolve(&finder, &ModuleLayer::empty(), &finder.names())?;
//! let layer = ModuleLayer::define(config);
//! ```

mod configuration;
mod error;
mod finder;
mod ignore;
mod layer;
mod membership;
mod merge;
mod module;
mod naming;
mod ownership;
mod plan;
mod policy;

#[cfg(test)]
mod testing;

pub use configuration::Configuration;
pub use error::{ModuleError, ModuleResult};
pub use finder::ModuleFinder;
pub use ignore::{should_ignore, IgnoreRules};
pub use layer::ModuleLayer;
pub use membership::Membership;
pub use merge::{MergeGroup, MergeSpec};
pub use module::{synthesize, synthesize_path, Module};
pub use naming::{automatic_module_name, is_valid_module_name};
pub use ownership::{OwnershipFilter, PackageOwnership};
pub use plan::{ModulePlan, ModulePlanner};
pub use policy::{ConflictPolicy, ParsePolicyError};
