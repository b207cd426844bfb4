//! Persistence Adapters - JSONL-based File Storage
//!
//! Implements the DecisionJournal port using append-only JSONL files
//! plus an atomic JSON snapshot of the latest decision.
//! No database dependency.

pub mod decision_log;

pub use decision_log::DecisionLog;
