use std::path::PathBuf;

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Errors raised while opening or reading an archive.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// The classpath entry does not exist.
    #[error("archive not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading from the filesystem failed.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a readable zip archive.
    #[error("invalid archive '{}': {source}", path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// The requested entry is not part of the archive.
    #[error("entry '{entry}' not found in '{}'", path.display())]
    MissingEntry { path: PathBuf, entry: String },

    /// An entry holds text that is not valid UTF-8.
    #[error("entry '{entry}' in '{}' is not valid UTF-8", path.display())]
    NotUtf8 { path: PathBuf, entry: String },
}

impl ArchiveError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ArchiveError::Io { path: path.into(), source }
    }

    pub(crate) fn zip(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        ArchiveError::Zip { path: path.into(), source }
    }
}
