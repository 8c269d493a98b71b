//! Module layers.
//!
//! A layer is a resolved [`Configuration`] instantiated on top of a parent
//! layer. The base of every chain is a boot layer holding the host's
//! declared modules.

use std::sync::Arc;

use crate::configuration::Configuration;
use crate::error::ModuleResult;
use crate::module::Module;

#[derive(Debug, Default)]
pub struct ModuleLayer {
    configuration: Configuration,
}

impl ModuleLayer {
    /// A layer with no modules and no parent.
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// The base layer, built from modules the host provides.
    pub fn boot(modules: Vec<Module>) -> ModuleResult<Arc<Self>> {
        Ok(Arc::new(Self {
            configuration: Configuration::root(modules)?,
        }))
    }

    /// Instantiates a resolved configuration on top of its parent layer.
    pub fn define(configuration: Configuration) -> Arc<Self> {
        Arc::new(Self { configuration })
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn parent(&self) -> Option<&Arc<ModuleLayer>> {
        self.configuration.parent()
    }

    /// Modules defined in this layer (parents excluded).
    pub fn modules(&self) -> &[Arc<Module>] {
        self.configuration.modules()
    }

    /// Finds a module in this layer or, failing that, in its parents.
    pub fn find_module(&self, name: &str) -> Option<&Arc<Module>> {
        self.configuration
            .find_module(name)
            .or_else(|| self.parent()?.find_module(name))
    }

    /// The module providing `package`, searching this layer then its parents.
    pub fn package_owner(&self, package: &str) -> Option<&Arc<Module>> {
        self.configuration
            .package_owner(package)
            .or_else(|| self.parent()?.package_owner(package))
    }
}
