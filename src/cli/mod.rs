//! Command-line interface module.

mod args;
pub mod describe;
pub mod filename;
pub mod resolve;

pub use args::{Cli, Commands};

use anyhow::Result;
use serde::Serialize;

/// Print a value as JSON on stdout.
fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let formatted = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{formatted}");
    Ok(())
}
