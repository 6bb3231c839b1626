//! Runtime configuration for SignalBot.
//!
//! Provides:
//! - Typed `Config` built once at startup and shared by reference
//! - Environment loading with a pluggable lookup (tests pass a map)
//! - Default values for every optional setting
//! - A redacted `Debug` so the bot token never reaches the logs

pub mod defaults;
pub mod env;
pub mod schema;

pub use env::{load_from_env, load_from_map};
pub use schema::{Config, StrategyKind};
