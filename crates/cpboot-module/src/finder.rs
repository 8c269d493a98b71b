//! Lookup of modules by name.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::{ModuleError, ModuleResult};
use crate::module::Module;

/// Finds modules by name among a fixed set.
#[derive(Debug, Clone, Default)]
pub struct ModuleFinder {
    modules: Vec<Arc<Module>>,
    by_name: FxHashMap<String, usize>,
}

impl ModuleFinder {
    /// Builds a finder over `modules`. Duplicate names are an error.
    pub fn of(modules: Vec<Module>) -> ModuleResult<Self> {
        let mut finder = Self::default();
        for module in modules {
            if finder.by_name.contains_key(module.name()) {
                return Err(ModuleError::DuplicateModule(module.name().to_string()));
            }
            finder.by_name.insert(module.name().to_string(), finder.modules.len());
            finder.modules.push(Arc::new(module));
        }
        Ok(finder)
    }

    pub fn find(&self, name: &str) -> Option<&Arc<Module>> {
        self.by_name.get(name).map(|&idx| &self.modules[idx])
    }

    /// Module names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.modules.iter().map(|m| m.name().to_string()).collect()
    }

    pub fn modules(&self) -> &[Arc<Module>] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
