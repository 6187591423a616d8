//! CLI surface for groupsweep
//!
//! One subcommand: `purge`, which removes a user from every group they
//! belong to.

pub mod purge;

use clap::{Parser, Subcommand};

/// groupsweep - remove a directory user from all of their groups
#[derive(Parser)]
#[command(name = "groupsweep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Remove the given user from every group they belong to
    Purge(purge::PurgeArgs),
}
