//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP clients, file I/O, in-memory wallets).
//! Each sub-module groups adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `api`: Match-data REST client and current match feed
//! - `execution`: Paper (dry-run) bet execution
//! - `metrics`: Prometheus metrics export and health checks
//! - `persistence`: JSONL decision logging and latest snapshot
//! - `settings`: TOML-backed bet settings store

pub mod api;
pub mod execution;
pub mod metrics;
pub mod persistence;
pub mod settings;
