//! Library half of the `lunar` command-line driver.
//!
//! The binary in `main.rs` only dispatches on the command name; option
//! parsing and the commands themselves live here so they can be tested.

pub mod commands;
mod tracing_setup;

pub use tracing_setup::init_tracing;
