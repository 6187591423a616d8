//! Domain model for the sweep workflow

pub mod directory;
mod error;
pub mod retry;
pub mod sweep;

pub use directory::{Directory, GroupId, Membership, Principal, PrincipalName, RemovalStatus, UserId};
pub use error::DirectoryError;
pub use retry::RetryPolicy;
pub use sweep::{RunSummary, SweepConfig, Sweeper};
