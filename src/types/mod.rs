// Simplepin shared type definitions
// Each submodule defines types used across the crate.

pub mod account;
pub mod browser;
pub mod errors;
pub mod reader;
pub mod settings;
