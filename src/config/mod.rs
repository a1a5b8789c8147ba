//! Configuration management
//!
//! Ledger settings loaded from an optional TOML file and the environment.

pub mod settings;

pub use settings::{Config, GLOBAL_CONFIG};
