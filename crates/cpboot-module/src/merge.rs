//! Merge specifications.
//!
//! Format:
//! ```text
//! <name>=<source>,<source>;<name>=<source>,...
//! ```
//!
//! A source is a module name, a backing file name (`lib-a.jar`) or a full
//! backing path. Merging happens after synthesis: the constituents keep the
//! packages they were granted and their predicates are OR-ed together. A
//! group written without `<name>=` takes the name of its first constituent.

use std::str::FromStr;

use crate::module::Module;

/// One merge group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeGroup {
    pub name: Option<String>,
    pub sources: Vec<String>,
}

/// A parsed merge specification. Empty means identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSpec {
    groups: Vec<MergeGroup>,
}

impl MergeSpec {
    pub fn parse(spec: &str) -> Self {
        let groups = spec
            .split(';')
            .filter_map(|group| {
                let group = group.trim();
                let (name, sources) = match group.split_once('=') {
                    Some((name, sources)) => {
                        let name = name.trim();
                        ((!name.is_empty()).then(|| name.to_string()), sources)
                    }
                    None => (None, group),
                };
                let sources: Vec<String> = sources
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                (!sources.is_empty()).then_some(MergeGroup { name, sources })
            })
            .collect();
        Self { groups }
    }

    pub fn groups(&self) -> &[MergeGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Applies every group in order to the live module list.
    ///
    /// Matched modules are replaced by one merged module at the position of
    /// the first of them; constituents keep their classpath order. Sources
    /// that match nothing are skipped.
    pub fn apply(&self, mut modules: Vec<Module>) -> Vec<Module> {
        for (idx, group) in self.groups.iter().enumerate() {
            let mut matched = Vec::new();
            for source in &group.sources {
                let found: Vec<usize> = modules
                    .iter()
                    .enumerate()
                    .filter(|(_, m)| m.matches_source(source))
                    .map(|(i, _)| i)
                    .collect();
                if found.is_empty() {
                    tracing::debug!(group = idx, source = %source, "merge source matches no module, skipping");
                }
                matched.extend(found);
            }
            matched.sort_unstable();
            matched.dedup();

            let Some(&position) = matched.first() else {
                continue;
            };

            // Remove back to front so earlier indices stay valid
            let mut constituents: Vec<Module> = matched.iter().rev().map(|&i| modules.remove(i)).collect();
            constituents.reverse();

            let name = group
                .name
                .clone()
                .unwrap_or_else(|| constituents[0].name().to_string());

            tracing::debug!(
                group = idx,
                module = %name,
                constituents = ?constituents.iter().map(Module::name).collect::<Vec<_>>(),
                "merging modules"
            );

            let merged = Module::merged(name, constituents);
            tracing::debug!(module = merged.name(), packages = ?merged.packages(), "merged module packages");
            modules.insert(position, merged);
        }
        modules
    }
}

impl FromStr for MergeSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
