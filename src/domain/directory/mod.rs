//! Directory model: entities and the provider seam

mod entity;
mod provider;

pub use entity::{GroupId, Membership, Principal, PrincipalName, UserId};
pub use provider::{Directory, RemovalStatus};

#[cfg(test)]
pub use provider::mock;
