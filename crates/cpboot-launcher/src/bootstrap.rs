//! The bootstrap sequence: classpath → modules → layer → context → hand-off.

use std::sync::Arc;

use cpboot_module::{Configuration, ModuleFinder, ModuleLayer};

use crate::classpath::join_classpath;
use crate::config::BootstrapConfig;
use crate::context::{LoadingContext, LEGACY_CLASSPATH_PROPERTY};
use crate::dispatch::Dispatcher;
use crate::error::LaunchResult;

pub struct Bootstrap {
    config: BootstrapConfig,
    boot: Arc<ModuleLayer>,
}

impl Bootstrap {
    pub fn new(config: BootstrapConfig) -> Self {
        Self {
            config,
            boot: ModuleLayer::empty(),
        }
    }

    /// Resolves on top of `boot` instead of an empty layer.
    pub fn with_boot_layer(mut self, boot: Arc<ModuleLayer>) -> Self {
        self.boot = boot;
        self
    }

    /// Plans, resolves and defines the launch layer, and wraps it in a context.
    pub fn build_context(&self) -> LaunchResult<Arc<LoadingContext>> {
        let classpath = &self.config.classpath;
        tracing::debug!(entries = classpath.len(), "planning modules");

        let plan = self.config.planner.plan(classpath)?;
        if !plan.ignored().is_empty() {
            tracing::debug!(count = plan.ignored().len(), "classpath entries ignored");
        }

        let finder = ModuleFinder::of(plan.into_modules())?;
        let roots = finder.names();
        let configuration = Configuration::resolve(&finder, &self.boot, &roots)?;
        let layer = ModuleLayer::define(configuration);
        let context = LoadingContext::new(self.config.context_name.clone(), layer)?
            .with_property(LEGACY_CLASSPATH_PROPERTY, join_classpath(classpath)?);

        Ok(Arc::new(context))
    }

    /// Builds the context and hands the trailing arguments to the entry point.
    pub fn launch(&self, dispatcher: &Dispatcher<'_>) -> LaunchResult<()> {
        let context = self.build_context()?;
        dispatcher.dispatch(&context, &self.config.args)
    }
}
