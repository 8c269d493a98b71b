//! Loading context over a resolved module layer.
//!
//! The context answers "which module defines this package", "where do these
//! bytes come from" and "who provides this capability" for the layer it was
//! built from. While a launch runs, the context is installed as the current
//! context of the dispatching thread.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use cpboot_archive::{is_directory, package_of, Archive};
use cpboot_module::{Module, ModuleLayer};
use rustc_hash::FxHashMap;

use crate::error::LaunchResult;

/// Name given to the context when none is configured.
pub const DEFAULT_CONTEXT_NAME: &str = "MC-BOOTSTRAP";

/// Property holding the joined legacy classpath.
pub const LEGACY_CLASSPATH_PROPERTY: &str = "legacyClassPath";

thread_local! {
    static CURRENT: RefCell<Option<Arc<LoadingContext>>> = const { RefCell::new(None) };
}

/// A named context that loads from one module layer.
#[derive(Debug)]
pub struct LoadingContext {
    name: String,
    layer: Arc<ModuleLayer>,
    archives: FxHashMap<PathBuf, Archive>,
    properties: BTreeMap<String, String>,
}

/// Bytes found for a resource path, and where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub module: String,
    pub origin: PathBuf,
    pub bytes: Vec<u8>,
}

/// A provider declared by a module for some capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub module: String,
    pub name: String,
}

impl LoadingContext {
    /// Builds a context over `layer`, opening every backing archive once.
    pub fn new(name: impl Into<String>, layer: Arc<ModuleLayer>) -> LaunchResult<Self> {
        let mut archives = FxHashMap::default();
        for module in layer.modules() {
            for path in module.paths() {
                if !archives.contains_key(path) {
                    archives.insert(path.clone(), Archive::open(path)?);
                }
            }
        }

        Ok(Self {
            name: name.into(),
            layer,
            archives,
            properties: BTreeMap::new(),
        })
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layer(&self) -> &Arc<ModuleLayer> {
        &self.layer
    }

    /// Module defining `package`, searching parent layers too.
    pub fn module_for_package(&self, package: &str) -> Option<&Arc<Module>> {
        self.layer.package_owner(package)
    }

    /// Looks up a resource in this layer.
    ///
    /// Class and package resources are served only by the module owning the
    /// package, and only from files its membership accepts. Resources outside
    /// any package are searched in module order.
    pub fn find_resource(&self, path: &str) -> LaunchResult<Option<Resource>> {
        if is_directory(path) {
            return Ok(None);
        }

        let candidates: Vec<&Arc<Module>> = match package_of(path) {
            Some(package) => self
                .layer
                .configuration()
                .package_owner(&package)
                .into_iter()
                .collect(),
            None => self.layer.modules().iter().collect(),
        };

        for module in candidates {
            for root in module.paths() {
                let Some(archive) = self.archives.get(root) else {
                    continue;
                };
                if archive.contains(path) && module.membership().accepts(path, root) {
                    let bytes = archive.read(path)?;
                    return Ok(Some(Resource {
                        module: module.name().to_string(),
                        origin: root.clone(),
                        bytes,
                    }));
                }
            }
        }
        Ok(None)
    }

    /// Providers of `capability` declared by this layer's modules, in module order.
    pub fn providers(&self, capability: &str) -> Vec<Provider> {
        self.layer
            .modules()
            .iter()
            .flat_map(|module| {
                module.providers(capability).iter().map(move |name| Provider {
                    module: module.name().to_string(),
                    name: name.clone(),
                })
            })
            .collect()
    }

    /// Makes this the current context of the calling thread until the
    /// returned guard is dropped.
    pub fn install(self: &Arc<Self>) -> ContextGuard {
        let previous = CURRENT.with(|current| current.borrow_mut().replace(Arc::clone(self)));
        tracing::debug!(context = %self.name, "installed loading context");
        ContextGuard { previous }
    }

    /// The context installed on the calling thread, if any.
    pub fn current() -> Option<Arc<LoadingContext>> {
        CURRENT.with(|current| current.borrow().clone())
    }
}

/// Restores the previously installed context on drop.
#[must_use = "the context is uninstalled when the guard is dropped"]
pub struct ContextGuard {
    previous: Option<Arc<LoadingContext>>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|current| *current.borrow_mut() = previous);
    }
}
