//! CLI command implementations.

pub mod common;
pub mod generate;
pub mod run;
pub mod variants;
pub mod version;
