//! Classpath → module planning.
//!
//! The main pass walks the classpath in order. Each entry that survives the
//! ignore rules is synthesized under the ownership filter accumulated so far,
//! checked against the conflict policy, and its packages are claimed before
//! the next entry is looked at. The merge specification is applied once the
//! pass is complete.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::ModuleResult;
use crate::ignore::{should_ignore, IgnoreRules};
use crate::membership::Membership;
use crate::merge::MergeSpec;
use crate::module::{synthesize_path, Module};
use crate::ownership::PackageOwnership;
use crate::policy::ConflictPolicy;

/// Settings for one planning run.
#[derive(Debug, Clone, Default)]
pub struct ModulePlanner {
    pub ignores: IgnoreRules,
    pub merge: MergeSpec,
    pub policy: ConflictPolicy,
}

/// Outcome of planning: the final modules and what was left out.
#[derive(Debug, Clone)]
pub struct ModulePlan {
    modules: Vec<Module>,
    ignored: Vec<PathBuf>,
}

impl ModulePlanner {
    pub fn new(ignores: IgnoreRules, merge: MergeSpec, policy: ConflictPolicy) -> Self {
        Self { ignores, merge, policy }
    }

    pub fn plan(&self, classpath: &[PathBuf]) -> ModuleResult<ModulePlan> {
        let mut ownership = PackageOwnership::new();
        let mut modules = Vec::new();
        let mut ignored = Vec::new();

        for entry in classpath {
            if should_ignore(entry, &self.ignores) {
                ignored.push(entry.clone());
                continue;
            }

            tracing::debug!(entry = %entry.display(), "encountered classpath entry");

            let module = synthesize_path(Membership::Owned(ownership.filter()), entry)?;
            self.policy.check(&module)?;

            tracing::debug!(
                entry = %entry.display(),
                module = module.name(),
                packages = ?module.packages(),
                "synthesized module"
            );

            let claimed = ownership.claim(&module);
            tracing::debug!(module = module.name(), claimed = ?claimed, "claimed packages");
            modules.push(module);
        }
        tracing::debug!(
            modules = modules.len(),
            packages = ownership.len(),
            ignored = ignored.len(),
            "main pass complete"
        );

        let modules = self.merge.apply(modules);

        Ok(ModulePlan { modules, ignored })
    }
}

impl ModulePlan {
    /// Final modules, in classpath order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn into_modules(self) -> Vec<Module> {
        self.modules
    }

    /// Entries dropped by the ignore rules.
    pub fn ignored(&self) -> &[PathBuf] {
        &self.ignored
    }

    /// Package → name of the final module owning it.
    pub fn package_owners(&self) -> BTreeMap<&str, &str> {
        self.modules
            .iter()
            .flat_map(|m| m.packages().iter().map(move |p| (p.as_str(), m.name())))
            .collect()
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name() == name)
    }
}
