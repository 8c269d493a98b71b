//! Membership predicates.
//!
//! A predicate decides whether an entry path (relative to its containing
//! archive root) belongs to a module. The set of variants is closed so the
//! merge planner can compose them structurally.

use std::path::Path;

use crate::ownership::OwnershipFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership {
    /// Every path belongs to the module.
    AcceptAll,
    /// Paths whose package is already claimed are excluded.
    Owned(OwnershipFilter),
    /// A path belongs if any alternative accepts it.
    AnyOf(Vec<Membership>),
}

impl Membership {
    /// Tests `path`, found inside the archive rooted at `root`.
    pub fn accepts(&self, path: &str, root: &Path) -> bool {
        match self {
            Membership::AcceptAll => true,
            Membership::Owned(filter) => filter.accepts(path),
            Membership::AnyOf(alternatives) => alternatives.iter().any(|m| m.accepts(path, root)),
        }
    }

    /// Logical OR of two predicates.
    pub fn or(self, other: Membership) -> Membership {
        Membership::any_of([self, other])
    }

    /// Logical OR of many predicates, flattening nested alternatives.
    pub fn any_of<I: IntoIterator<Item = Membership>>(alternatives: I) -> Membership {
        let mut flat = Vec::new();
        for m in alternatives {
            match m {
                Membership::AnyOf(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            flat.pop().unwrap_or(Membership::AcceptAll)
        } else {
            Membership::AnyOf(flat)
        }
    }
}
