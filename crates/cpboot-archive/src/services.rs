//! Service-provider listings (`META-INF/services/<capability>`).

/// Directory holding one provider listing per capability.
pub const SERVICES_DIR: &str = "META-INF/services/";

/// Capability named by a provider listing entry, if `entry` is one.
///
/// Only direct children of [`SERVICES_DIR`] count.
pub fn service_capability(entry: &str) -> Option<&str> {
    let name = entry.strip_prefix(SERVICES_DIR)?;
    if name.is_empty() || name.contains('/') {
        None
    } else {
        Some(name)
    }
}

/// Parse a provider listing: one provider per line, `#` starts a comment.
pub fn parse_providers(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| match line.find('#') {
            Some(idx) => &line[..idx],
            None => line,
        })
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
