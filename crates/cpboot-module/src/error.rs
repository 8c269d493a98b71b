//! Error types for module synthesis and resolution.

use std::path::PathBuf;

use cpboot_archive::ArchiveError;

/// Result type for module operations.
pub type ModuleResult<T> = Result<T, ModuleError>;

/// Errors that can occur while building or resolving modules.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    /// A backing path could not be read.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Synthesis was asked to build a module from nothing.
    #[error("a module needs at least one backing path")]
    NoBackingPaths,

    /// Neither the manifest nor the file name yields a usable name.
    #[error("cannot derive a module name from '{}'", .0.display())]
    UnnamedModule(PathBuf),

    /// A declared or derived module name is not a legal module name.
    #[error("invalid module name '{name}' for '{}'", path.display())]
    InvalidName { name: String, path: PathBuf },

    /// Raised by [`ConflictPolicy::RejectConflicts`](crate::ConflictPolicy).
    #[error("module '{module}' contains packages already owned by earlier modules: {}", packages.join(", "))]
    PackageConflict { module: String, packages: Vec<String> },

    /// Two modules share a name.
    #[error("module '{0}' is defined more than once")]
    DuplicateModule(String),

    /// A root module is not known to the finder.
    #[error("module '{0}' not found")]
    ModuleNotFound(String),

    /// Two modules of one configuration contain the same package.
    #[error("package '{package}' is contained in both '{first}' and '{second}'")]
    SplitPackage {
        package: String,
        first: String,
        second: String,
    },

    /// A module contains a package that a parent layer already provides.
    #[error("module '{module}' contains package '{package}', which is already provided by '{parent_module}' in a parent layer")]
    ParentPackage {
        package: String,
        module: String,
        parent_module: String,
    },
}
