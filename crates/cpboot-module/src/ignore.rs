//! Classpath ignore rules.
//!
//! A rule is a plain substring. An entry is ignored when any rule occurs
//! anywhere in its full path; rules are tried in order and the first match
//! is reported.

use std::path::Path;

/// Ordered list of ignore rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreRules {
    rules: Vec<String>,
}

impl IgnoreRules {
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: rules
                .into_iter()
                .map(Into::into)
                .filter(|rule: &String| !rule.is_empty())
                .collect(),
        }
    }

    /// Parses a comma-separated list. Empty items are dropped.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(',').map(str::trim))
    }

    /// The first rule matching `entry`, if any.
    pub fn matching_rule(&self, entry: &Path) -> Option<&str> {
        let full = entry.to_string_lossy();
        self.rules
            .iter()
            .find(|rule| full.contains(rule.as_str()))
            .map(String::as_str)
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Whether `entry` matches any of `rules`.
pub fn should_ignore(entry: &Path, rules: &IgnoreRules) -> bool {
    match rules.matching_rule(entry) {
        Some(rule) => {
            tracing::debug!(entry = %entry.display(), rule, "ignoring classpath entry");
            true
        }
        None => false,
    }
}
