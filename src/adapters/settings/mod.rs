//! Settings Adapters
//!
//! Implements the SettingsStore port over a TOML file that can be edited
//! while the bot runs.

pub mod file_store;

pub use file_store::FileSettingsStore;
