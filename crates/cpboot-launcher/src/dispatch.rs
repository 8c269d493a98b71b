//! Entry point registry and hand-off.
//!
//! Launch targets are linked into the final binary through a distributed
//! slice. A target is only eligible when some module of the launch layer also
//! declares it under `META-INF/services/<capability>`, so linking a target
//! without shipping its module on the classpath does nothing.

use std::fmt;
use std::sync::Arc;

use linkme::distributed_slice;

use crate::context::LoadingContext;
use crate::error::{BoxError, LaunchError, LaunchResult};

/// Capability every launch target is registered under.
pub const LAUNCH_CAPABILITY: &str = "launch";

/// Signature of a launch entry point. Receives the untouched trailing arguments.
pub type LaunchFn = fn(&[String]) -> Result<(), BoxError>;

/// A linked entry point.
#[derive(Clone, Copy)]
pub struct LaunchTarget {
    pub capability: &'static str,
    /// Must match a provider line in the module's service file.
    pub provider: &'static str,
    pub launch: LaunchFn,
}

impl fmt::Debug for LaunchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchTarget")
            .field("capability", &self.capability)
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

/// All launch targets linked into this binary.
#[distributed_slice]
pub static LAUNCH_TARGETS: [LaunchTarget];

/// Registers a launch target in [`LAUNCH_TARGETS`].
///
/// ```ignore
/// fn run(args: &[String]) -> Result<(), cpboot_launcher::BoxError> { Ok(()) }
///
/// cpboot_launcher::launch_target!(APP_MAIN, "app.Main", run);
/// ```
#[macro_export]
macro_rules! launch_target {
    ($ident:ident, $provider:expr, $launch:expr) => {
        #[$crate::__private::linkme::distributed_slice($crate::LAUNCH_TARGETS)]
        #[linkme(crate = $crate::__private::linkme)]
        static $ident: $crate::LaunchTarget = $crate::LaunchTarget {
            capability: $crate::LAUNCH_CAPABILITY,
            provider: $provider,
            launch: $launch,
        };
    };
}

/// Picks the single eligible target for a context and invokes it.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'r> {
    registry: &'r [LaunchTarget],
}

impl Dispatcher<'static> {
    /// Dispatcher over the targets linked into this binary.
    pub fn linked() -> Self {
        Self::new(&LAUNCH_TARGETS)
    }
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r [LaunchTarget]) -> Self {
        Self { registry }
    }

    /// Finds the one target both registered and declared in `context`.
    pub fn locate(&self, context: &LoadingContext) -> LaunchResult<&'r LaunchTarget> {
        let mut declared: Vec<String> = Vec::new();
        for provider in context.providers(LAUNCH_CAPABILITY) {
            if !declared.contains(&provider.name) {
                declared.push(provider.name);
            }
        }

        let found: Vec<&'r LaunchTarget> = declared
            .iter()
            .flat_map(|name| {
                self.registry
                    .iter()
                    .filter(move |t| t.capability == LAUNCH_CAPABILITY && t.provider == name.as_str())
            })
            .collect();

        match found.as_slice() {
            [] => Err(LaunchError::NoEntryPoint {
                capability: LAUNCH_CAPABILITY.to_string(),
                declared,
            }),
            [target] => Ok(*target),
            many => Err(LaunchError::AmbiguousEntryPoint {
                capability: LAUNCH_CAPABILITY.to_string(),
                providers: many.iter().map(|t| t.provider.to_string()).collect(),
            }),
        }
    }

    /// Installs `context` on this thread and runs the located target once.
    pub fn dispatch(&self, context: &Arc<LoadingContext>, args: &[String]) -> LaunchResult<()> {
        let target = self.locate(context)?;
        tracing::info!(
            provider = target.provider,
            context = context.name(),
            args = args.len(),
            "handing off to entry point"
        );

        let _guard = context.install();
        (target.launch)(args).map_err(|source| LaunchError::EntryPoint {
            provider: target.provider.to_string(),
            source,
        })
    }
}
