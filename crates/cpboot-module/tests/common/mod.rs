//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

#[path = "../../src/testing.rs"]
mod testing;

pub(crate) use testing::write_jar;

/// Writes a jar holding one class file per package, plus directory entries.
pub fn jar_with_packages(dir: &Path, name: &str, packages: &[&str]) -> PathBuf {
    let mut entries = Vec::new();
    for package in packages {
        let dir = package.replace('.', "/");
        entries.push((format!("{}/", dir), String::new()));
        entries.push((format!("{}/Cls.class", dir), format!("{} from {}", package, name)));
    }
    let borrowed: Vec<(&str, &str)> = entries.iter().map(|(e, c)| (e.as_str(), c.as_str())).collect();
    write_jar(dir, name, &borrowed)
}
