//! Package ownership tracking.
//!
//! The pipeline driver owns one [`PackageOwnership`] accumulator. Before a
//! module is synthesized it takes an [`OwnershipFilter`] snapshot; once the
//! module is finished its packages are claimed. The first module to claim a
//! package owns it for good, later modules silently lose their files in that
//! package.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use cpboot_archive::{is_directory, is_metadata, package_of};

use crate::module::Module;

/// Accumulated package → owning module mapping.
#[derive(Debug, Clone, Default)]
pub struct PackageOwnership {
    owners: BTreeMap<String, String>,
    /// Claimed packages as of the last finished module.
    snapshot: Arc<BTreeSet<String>>,
}

impl PackageOwnership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership filter for the next module to be built.
    pub fn filter(&self) -> OwnershipFilter {
        OwnershipFilter {
            claimed: Arc::clone(&self.snapshot),
        }
    }

    /// Claims every package of a finished module that is not owned yet.
    ///
    /// Returns the packages newly claimed by this module.
    pub fn claim(&mut self, module: &Module) -> Vec<String> {
        let mut claimed = Vec::new();
        for package in module.packages() {
            if !self.owners.contains_key(package) {
                self.owners.insert(package.clone(), module.name().to_string());
                claimed.push(package.clone());
            }
        }
        if !claimed.is_empty() {
            self.snapshot = Arc::new(self.owners.keys().cloned().collect());
        }
        claimed
    }

    pub fn owner_of(&self, package: &str) -> Option<&str> {
        self.owners.get(package).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// Snapshot of claimed packages used as a path filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnershipFilter {
    claimed: Arc<BTreeSet<String>>,
}

impl OwnershipFilter {
    /// A filter over an explicit package set.
    pub fn from_packages<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            claimed: Arc::new(packages.into_iter().map(Into::into).collect()),
        }
    }

    /// Whether `path` may join the module under construction.
    pub fn accepts(&self, path: &str) -> bool {
        // First module: nothing is claimed yet
        if self.claimed.is_empty() || is_metadata(path) {
            return true;
        }
        // Root files and directories never conflict, only real files do
        if is_directory(path) {
            return true;
        }
        match package_of(path) {
            Some(package) => !self.claimed.contains(&package),
            None => true,
        }
    }
}
