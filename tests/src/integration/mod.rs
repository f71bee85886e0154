//! Cross-subsystem integration tests.

pub mod fixtures;

mod flows;
mod properties;
