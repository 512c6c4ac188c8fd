// Shared helpers for integration tests. Each aggregated test module pulls
// this in with `#[path = "../common/mod.rs"]`, so not every item is used
// everywhere.
#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

pub use helpers::*;
