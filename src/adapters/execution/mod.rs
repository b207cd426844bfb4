//! Bet Execution Adapters
//!
//! Implements the BetExecution port. Only the paper (dry-run) wallet
//! ships for now.

pub mod paper;

pub use paper::PaperExecution;
