//! Legacy classpath sources.
//!
//! The classpath comes from the first available of:
//! 1. an explicit override, split on the platform path separator
//! 2. a file listing one entry per line (only if it is a regular file)
//! 3. the ambient `CLASSPATH`

use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LaunchError, LaunchResult};

/// Resolves the ordered classpath from the configured sources.
pub fn load_legacy_classpath(
    override_value: Option<&str>,
    file: Option<&Path>,
    ambient: Option<&str>,
) -> LaunchResult<Vec<PathBuf>> {
    if let Some(value) = override_value.filter(|v| !v.trim().is_empty()) {
        tracing::debug!("classpath taken from explicit override");
        return Ok(split_classpath(value));
    }

    if let Some(path) = file {
        if path.is_file() {
            let content = fs::read_to_string(path).map_err(|source| LaunchError::ClasspathFile {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::debug!(file = %path.display(), "classpath taken from file");
            return Ok(content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(PathBuf::from)
                .collect());
        }
        tracing::debug!(file = %path.display(), "classpath file is not a regular file, skipping");
    }

    if let Some(value) = ambient.filter(|v| !v.trim().is_empty()) {
        tracing::debug!("classpath taken from CLASSPATH");
        return Ok(split_classpath(value));
    }

    Err(LaunchError::MissingClasspath)
}

fn split_classpath(value: &str) -> Vec<PathBuf> {
    env::split_paths(OsStr::new(value))
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}

/// Joins entries back with the platform path separator.
pub fn join_classpath(entries: &[PathBuf]) -> LaunchResult<String> {
    env::join_paths(entries)
        .map(|joined| joined.to_string_lossy().into_owned())
        .map_err(|_| {
            let bad = entries
                .iter()
                .find(|e| e.to_string_lossy().contains(SEPARATOR))
                .map(|e| e.display().to_string())
                .unwrap_or_default();
            LaunchError::InvalidClasspathEntry(bad)
        })
}

#[cfg(unix)]
const SEPARATOR: char = ':';
#[cfg(not(unix))]
const SEPARATOR: char = ';';
