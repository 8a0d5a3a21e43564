//! CLI command implementations
//!
//! Each command returns `anyhow::Result<ExitCode>`; errors are printed by
//! `main` and exit with code 1.

pub mod assemble;
pub mod export;
pub mod measure;
pub mod new;
pub mod pose;
pub mod randomize;
pub mod store;
pub mod validate;

use anyhow::Result;
use serde::Serialize;

/// Prints a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
