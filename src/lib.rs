//! groupsweep
//!
//! Removes one directory user from every group they belong to, using
//! app-only credentials against the Graph API:
//! - authenticate (client-credentials grant)
//! - resolve the principal name to a stable id
//! - enumerate group memberships (non-group relations filtered out)
//! - remove each membership sequentially, with per-membership accounting

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
