//! Salty Wager Bot - Library Root
//!
//! Strategy-driven bet decisions for SaltyBet matches. Re-exports all
//! modules for the binary, integration tests and benchmarks.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
