//! CLI command handlers

pub mod commands;

pub use commands::{batch, convert, holidays, inspect};
