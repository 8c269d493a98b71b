//! Package derivation for archive entries.

/// Root of per-archive metadata. Never package-owning.
pub const META_INF: &str = "META-INF/";

/// Whether the entry lives under the `META-INF/` root.
pub fn is_metadata(entry: &str) -> bool {
    entry.starts_with(META_INF)
}

/// Whether the entry names a directory rather than a file.
pub fn is_directory(entry: &str) -> bool {
    entry.ends_with('/')
}

/// Package owning a file entry (`a/b/C.class` → `a.b`).
///
/// Returns `None` for files at the archive root, for directories and for
/// anything under `META-INF/`.
pub fn package_of(entry: &str) -> Option<String> {
    if is_metadata(entry) || is_directory(entry) {
        return None;
    }
    let idx = entry.rfind('/')?;
    Some(entry[..idx].replace('/', "."))
}
