//! Resolution of root modules into a configuration.
//!
//! Resolution binds the requested roots from a [`ModuleFinder`] against a
//! parent [`ModuleLayer`] and checks that package ownership stays unique:
//! no package may live in two modules of the configuration, and no module
//! may contain a package a parent layer already provides.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{ModuleError, ModuleResult};
use crate::finder::ModuleFinder;
use crate::layer::ModuleLayer;
use crate::module::Module;

/// A resolved set of modules with a package index.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    modules: Vec<Arc<Module>>,
    packages: FxHashMap<String, usize>,
    parent: Option<Arc<ModuleLayer>>,
}

impl Configuration {
    /// Resolves `roots` (in order, duplicates ignored) against `parent`.
    pub fn resolve(
        finder: &ModuleFinder,
        parent: &Arc<ModuleLayer>,
        roots: &[String],
    ) -> ModuleResult<Self> {
        let mut seen = FxHashSet::default();
        let mut modules = Vec::new();
        for root in roots {
            if !seen.insert(root.as_str()) {
                continue;
            }
            let module = finder
                .find(root)
                .ok_or_else(|| ModuleError::ModuleNotFound(root.clone()))?;
            modules.push(Arc::clone(module));
        }

        let configuration = Self::index(modules, Some(Arc::clone(parent)))?;
        tracing::debug!(
            modules = configuration.modules.len(),
            packages = configuration.packages.len(),
            "resolved configuration"
        );
        Ok(configuration)
    }

    /// Builds a parentless configuration, used for base layers.
    pub(crate) fn root(modules: Vec<Module>) -> ModuleResult<Self> {
        let finder = ModuleFinder::of(modules)?;
        Self::index(finder.modules().to_vec(), None)
    }

    fn index(modules: Vec<Arc<Module>>, parent: Option<Arc<ModuleLayer>>) -> ModuleResult<Self> {
        let mut packages: FxHashMap<String, usize> = FxHashMap::default();
        for (idx, module) in modules.iter().enumerate() {
            for package in module.packages() {
                if let Some(owner) = parent.as_ref().and_then(|p| p.package_owner(package)) {
                    return Err(ModuleError::ParentPackage {
                        package: package.clone(),
                        module: module.name().to_string(),
                        parent_module: owner.name().to_string(),
                    });
                }
                if let Some(&other) = packages.get(package) {
                    return Err(ModuleError::SplitPackage {
                        package: package.clone(),
                        first: modules[other].name().to_string(),
                        second: module.name().to_string(),
                    });
                }
                packages.insert(package.clone(), idx);
            }
        }
        Ok(Self {
            modules,
            packages,
            parent,
        })
    }

    /// Resolved modules, in root order.
    pub fn modules(&self) -> &[Arc<Module>] {
        &self.modules
    }

    pub fn find_module(&self, name: &str) -> Option<&Arc<Module>> {
        self.modules.iter().find(|m| m.name() == name)
    }

    /// The module of this configuration containing `package`.
    pub fn package_owner(&self, package: &str) -> Option<&Arc<Module>> {
        self.packages.get(package).map(|&idx| &self.modules[idx])
    }

    pub fn parent(&self) -> Option<&Arc<ModuleLayer>> {
        self.parent.as_ref()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
