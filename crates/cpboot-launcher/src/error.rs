use std::path::PathBuf;

use cpboot_archive::ArchiveError;
use cpboot_module::ModuleError;

/// Error returned by a launch entry point.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type LaunchResult<T> = Result<T, LaunchError>;

/// Everything that can abort the bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// No classpath source could be resolved.
    #[error("missing classpath: set --classpath, --classpath-file or CLASSPATH")]
    MissingClasspath,

    #[error("failed to load the classpath from '{}': {source}", path.display())]
    ClasspathFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An entry contains the platform path separator and cannot be joined.
    #[error("classpath entry '{0}' contains a path separator")]
    InvalidClasspathEntry(String),

    #[error(transparent)]
    Module(#[from] ModuleError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("no entry point registered for capability '{capability}' (declared providers: {})", display_list(declared))]
    NoEntryPoint {
        capability: String,
        declared: Vec<String>,
    },

    #[error("expected one entry point for capability '{capability}', found {}: {}", providers.len(), providers.join(", "))]
    AmbiguousEntryPoint {
        capability: String,
        providers: Vec<String>,
    },

    /// The entry point itself reported a failure.
    #[error("entry point '{provider}' failed: {source}")]
    EntryPoint {
        provider: String,
        #[source]
        source: BoxError,
    },
}

fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
