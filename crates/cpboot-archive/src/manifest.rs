//! Parser for `META-INF/MANIFEST.MF` main sections.
//!
//! Format:
//! ```text
//! Manifest-Version: 1.0
//! Automatic-Module-Name: com.example.lib
//! Long-Attribute: first part
//!  continued on the next line
//!
//! Name: per/entry/section
//! ```
//!
//! Only the main section (everything up to the first blank line) is kept.

use std::collections::BTreeMap;

/// Location of the manifest inside an archive.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Attribute declaring the module name of an archive.
pub const AUTOMATIC_MODULE_NAME: &str = "Automatic-Module-Name";

/// Main attributes of a parsed manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    attributes: BTreeMap<String, String>,
}

impl Manifest {
    /// Parses manifest text. Malformed lines are skipped.
    pub fn parse(content: &str) -> Self {
        let mut attributes = BTreeMap::new();
        let mut current: Option<(String, String)> = None;

        for line in content.lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                break;
            }

            // Continuation lines start with a single space
            if let Some(rest) = line.strip_prefix(' ') {
                if let Some((_, value)) = current.as_mut() {
                    value.push_str(rest);
                }
                continue;
            }

            if let Some((key, value)) = current.take() {
                attributes.insert(key, value);
            }

            if let Some((key, value)) = line.split_once(':') {
                let key = key.trim();
                if !key.is_empty() {
                    current = Some((key.to_string(), value.trim_start().to_string()));
                }
            }
        }

        if let Some((key, value)) = current {
            attributes.insert(key, value);
        }

        Self { attributes }
    }

    /// Looks up a main attribute. Names are case-insensitive.
    pub fn main_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The declared module name, if any.
    pub fn automatic_module_name(&self) -> Option<&str> {
        self.main_attribute(AUTOMATIC_MODULE_NAME)
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}
