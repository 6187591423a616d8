//! The group-removal workflow: outcome accounting and the sequential runner

mod outcome;
mod runner;

pub use outcome::{outcome_from, FailedRemoval, RemovalOutcome, RunSummary};
pub use runner::{SweepConfig, Sweeper};
