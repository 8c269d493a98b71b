//! cpboot launcher.
//!
//! Reads a legacy classpath, splits it into conflict-free modules, resolves
//! them into a layer and hands control to the one entry point the layer
//! declares.
//!
//! An application links its entry point with [`launch_target!`] and calls
//! [`run_main`] from its own `main`:
//!
//! ```ignore
//! fn start(args: &[String]) -> Result<(), cpboot_launcher::BoxError> {
//!     println!("{:?}", args);
//!     Ok(())
//! }
//!
//! cpboot_launcher::launch_target!(APP_MAIN, "app.Main", start);
//!
//! fn main() {
//!     cpboot_launcher::run_main();
//! }
//! ```

mod bootstrap;
mod classpath;
mod config;
mod context;
mod dispatch;
mod error;
mod logging;

#[cfg(test)]
mod testing;

use std::process;

use clap::Parser;

pub use bootstrap::Bootstrap;
pub use classpath::{join_classpath, load_legacy_classpath};
pub use config::{BootstrapArgs, BootstrapConfig, DEFAULT_IGNORE_LIST};
pub use context::{
    ContextGuard, LoadingContext, Provider, Resource, DEFAULT_CONTEXT_NAME,
    LEGACY_CLASSPATH_PROPERTY,
};
pub use dispatch::{Dispatcher, LaunchFn, LaunchTarget, LAUNCH_CAPABILITY, LAUNCH_TARGETS};
pub use error::{BoxError, LaunchError, LaunchResult};
pub use logging::init_logging;

#[doc(hidden)]
pub mod __private {
    pub use linkme;
}

/// Parses the process arguments and runs the bootstrap with the linked targets.
///
/// Exits the process with status 1 on failure.
pub fn run_main() {
    let args = BootstrapArgs::parse();
    init_logging(args.debug);

    let result = BootstrapConfig::from_args(args)
        .and_then(|config| Bootstrap::new(config).launch(&Dispatcher::linked()));

    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
