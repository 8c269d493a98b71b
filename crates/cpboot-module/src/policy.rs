//! What to do when a module loses packages to an earlier owner.

use std::fmt;
use std::str::FromStr;

use crate::error::{ModuleError, ModuleResult};
use crate::module::Module;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// The earliest classpath entry keeps the package; later copies are dropped.
    #[default]
    FirstClaimWins,
    /// Any shadowed package is an error.
    RejectConflicts,
}

impl ConflictPolicy {
    /// Checks a freshly synthesized module against the policy.
    pub fn check(self, module: &Module) -> ModuleResult<()> {
        if module.shadowed().is_empty() {
            return Ok(());
        }
        match self {
            ConflictPolicy::FirstClaimWins => {
                tracing::debug!(
                    module = module.name(),
                    packages = ?module.shadowed(),
                    "packages already owned by earlier modules were excluded"
                );
                Ok(())
            }
            ConflictPolicy::RejectConflicts => Err(ModuleError::PackageConflict {
                module: module.name().to_string(),
                packages: module.shadowed().iter().cloned().collect(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConflictPolicy::FirstClaimWins => "first-claim-wins",
            ConflictPolicy::RejectConflicts => "reject",
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown conflict policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown conflict policy '{0}', expected 'first-claim-wins' or 'reject'")]
pub struct ParsePolicyError(pub String);

impl FromStr for ConflictPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "first-claim-wins" => Ok(ConflictPolicy::FirstClaimWins),
            "reject" => Ok(ConflictPolicy::RejectConflicts),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}
