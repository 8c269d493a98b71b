//! Shared fixtures for launcher integration tests.

#![allow(dead_code)]

#[path = "../../src/testing.rs"]
mod testing;

pub(crate) use testing::{launcher_jar, write_jar};
