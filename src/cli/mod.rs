//! Command-line interface
//!
//! Argument parsing for the block production demo.

pub mod commands;

pub use commands::Opt;
