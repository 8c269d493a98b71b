//! Automatic module naming.
//!
//! An archive without an `Automatic-Module-Name` gets a name derived from its
//! file name:
//!
//! 1. drop a `.jar` / `.zip` extension
//! 2. cut at the first `-<digits>` version suffix (`foo-bar-1.2` → `foo-bar`)
//! 3. replace every non-alphanumeric character with `.`
//! 4. collapse repeated dots and trim dots at both ends

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ModuleError, ModuleResult};

static VERSION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-(\d+(\.|$))").expect("version suffix pattern"));
static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]").expect("non-alphanumeric pattern"));
static REPEATED_DOTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{2,}").expect("repeated dots pattern"));

const ARCHIVE_EXTENSIONS: &[&str] = &[".jar", ".zip"];

/// Derives a module name from the file name of `path`.
pub fn automatic_module_name(path: &Path) -> ModuleResult<String> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ModuleError::UnnamedModule(path.to_path_buf()))?;

    let mut stem = file_name.as_str();
    for ext in ARCHIVE_EXTENSIONS {
        if let Some(stripped) = stem.strip_suffix(ext) {
            stem = stripped;
            break;
        }
    }

    if let Some(m) = VERSION_SUFFIX.find(stem) {
        stem = &stem[..m.start()];
    }

    let dotted = NON_ALPHANUMERIC.replace_all(stem, ".");
    let collapsed = REPEATED_DOTS.replace_all(&dotted, ".");
    let name = collapsed.trim_matches('.');

    if name.is_empty() {
        return Err(ModuleError::UnnamedModule(path.to_path_buf()));
    }
    check_module_name(name, path)?;
    Ok(name.to_string())
}

/// Whether `name` is a legal dot-separated module name.
pub fn is_valid_module_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        })
}

pub(crate) fn check_module_name(name: &str, path: &Path) -> ModuleResult<()> {
    if is_valid_module_name(name) {
        Ok(())
    } else {
        Err(ModuleError::InvalidName {
            name: name.to_string(),
            path: path.to_path_buf(),
        })
    }
}
