//! Modules and module synthesis.
//!
//! [`synthesize`] opens one or more classpath entries, filters their entries
//! through a [`Membership`] predicate and records what the accepted entries
//! contribute: packages and service providers. Entries rejected by the
//! predicate are remembered as shadowed packages so a [`ConflictPolicy`]
//! can inspect them.
//!
//! [`ConflictPolicy`]: crate::ConflictPolicy

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use cpboot_archive::{is_directory, package_of, parse_providers, service_capability, Archive};

use crate::error::{ModuleError, ModuleResult};
use crate::membership::Membership;
use crate::naming::{automatic_module_name, check_module_name};

/// A named unit owning a fixed set of packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    name: String,
    packages: BTreeSet<String>,
    paths: Vec<PathBuf>,
    membership: Membership,
    /// Capability → provider names, in discovery order.
    providers: BTreeMap<String, Vec<String>>,
    /// Packages whose files were excluded by the membership predicate.
    shadowed: BTreeSet<String>,
}

impl Module {
    /// A module known only by name and packages, with no backing archives.
    ///
    /// Used for base layers whose modules are provided by the host.
    pub fn declared<I, S>(name: impl Into<String>, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            packages: packages.into_iter().map(Into::into).collect(),
            paths: Vec::new(),
            membership: Membership::AcceptAll,
            providers: BTreeMap::new(),
            shadowed: BTreeSet::new(),
        }
    }

    /// Combines already-synthesized modules under a new name.
    ///
    /// Packages, providers and backing paths are taken from the constituents
    /// without rescanning. The merged predicate accepts a path whenever any
    /// constituent's predicate does, whichever backing path it comes from.
    pub fn merged(name: impl Into<String>, constituents: Vec<Module>) -> Self {
        let mut packages = BTreeSet::new();
        let mut paths = Vec::new();
        let mut providers: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut shadowed = BTreeSet::new();
        let mut alternatives = Vec::with_capacity(constituents.len());

        for module in constituents {
            packages.extend(module.packages);
            shadowed.extend(module.shadowed);
            for (capability, names) in module.providers {
                let list = providers.entry(capability).or_default();
                for provider in names {
                    if !list.contains(&provider) {
                        list.push(provider);
                    }
                }
            }
            alternatives.push(module.membership);
            paths.extend(module.paths);
        }
        shadowed.retain(|p| !packages.contains(p));

        Self {
            name: name.into(),
            packages,
            paths,
            membership: Membership::any_of(alternatives),
            providers,
            shadowed,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn packages(&self) -> &BTreeSet<String> {
        &self.packages
    }

    pub fn contains_package(&self, package: &str) -> bool {
        self.packages.contains(package)
    }

    /// Backing classpath entries, in precedence order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    /// Providers this module declares for `capability`.
    pub fn providers(&self, capability: &str) -> &[String] {
        self.providers
            .get(capability)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Packages this module lost to earlier owners.
    pub fn shadowed(&self) -> &BTreeSet<String> {
        &self.shadowed
    }

    /// Whether `source` names this module, one of its files, or one of its paths.
    pub fn matches_source(&self, source: &str) -> bool {
        self.name == source
            || self.paths.iter().any(|path| {
                path.as_os_str() == source
                    || path.file_name().is_some_and(|name| name == source)
            })
    }
}

/// Builds one module from `paths`, keeping only entries `membership` accepts.
///
/// The name comes from the first path's `Automatic-Module-Name` manifest
/// attribute, or is derived from its file name.
pub fn synthesize(membership: Membership, paths: &[PathBuf]) -> ModuleResult<Module> {
    let first = paths.first().ok_or(ModuleError::NoBackingPaths)?;

    let mut name = None;
    let mut packages = BTreeSet::new();
    let mut providers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut shadowed = BTreeSet::new();

    for path in paths {
        let archive = Archive::open(path)?;

        if name.is_none() {
            name = Some(module_name(&archive)?);
        }

        for entry in archive.entries() {
            if !membership.accepts(entry, path) {
                if let Some(package) = package_of(entry) {
                    shadowed.insert(package);
                }
                continue;
            }
            if is_directory(entry) {
                continue;
            }
            if let Some(package) = package_of(entry) {
                packages.insert(package);
            } else if let Some(capability) = service_capability(entry) {
                let list = providers.entry(capability.to_string()).or_default();
                for provider in parse_providers(&archive.read_to_string(entry)?) {
                    if !list.contains(&provider) {
                        list.push(provider);
                    }
                }
            }
        }
    }
    shadowed.retain(|p| !packages.contains(p));

    let name = match name {
        Some(name) => name,
        None => automatic_module_name(first)?,
    };

    Ok(Module {
        name,
        packages,
        paths: paths.to_vec(),
        membership,
        providers,
        shadowed,
    })
}

fn module_name(archive: &Archive) -> ModuleResult<String> {
    let declared = archive
        .manifest()?
        .and_then(|m| m.automatic_module_name().map(str::to_string));
    match declared {
        Some(name) => {
            check_module_name(&name, archive.root())?;
            Ok(name)
        }
        None => automatic_module_name(archive.root()),
    }
}

/// Convenience for a single classpath entry.
pub fn synthesize_path(membership: Membership, path: &Path) -> ModuleResult<Module> {
    synthesize(membership, &[path.to_path_buf()])
}
