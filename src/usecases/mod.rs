//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement
//! the bot's core workflows.
//!
//! Use cases:
//! - `DecisionEngine`: Strategy selection, upset inversion, wager sizing
//! - `WinningsTracker`: Balance-delta winnings accounting
//! - `BettingLoop`: Polling cycle driving one decision per match

pub mod betting_loop;
pub mod decision;
pub mod winnings;

pub use betting_loop::{BettingLoop, CycleOutcome};
pub use decision::{Decision, DecisionEngine, DecisionError};
pub use winnings::{Winnings, WinningsTracker};
