//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the domain/usecases layer
//! requires from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `MatchFeed`: Current match and fighter history
//! - `BetExecution`: Balance reads and bet placement
//! - `SettingsStore`: User bet policy
//! - `DecisionJournal`: Decision persistence (JSONL-based)

pub mod execution;
pub mod journal;
pub mod match_feed;
pub mod settings_store;
