//! Build inputs shared by every command: the build mode and the
//! environment snapshot it is derived from.

mod env;
mod mode;

pub use env::Environment;
pub use mode::{BuildMode, MODE_VAR};
