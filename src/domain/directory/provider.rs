use std::fmt::Debug;

use async_trait::async_trait;

use super::{GroupId, Membership, Principal, PrincipalName, UserId};
use crate::domain::DirectoryError;

/// API-level result of a single removal request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalStatus {
    /// The directory confirmed the membership was deleted
    Removed,
    /// The directory reported the member was not in the group; another actor
    /// got there first, which is the desired end state either way
    AlreadyRemoved,
}

/// Trait for directory providers (Microsoft Graph, test doubles)
#[async_trait]
pub trait Directory: Send + Sync + Debug {
    /// Look up exactly one user by principal name
    async fn resolve_user(&self, principal: &PrincipalName) -> Result<Principal, DirectoryError>;

    /// List the group memberships of a user, non-group relations filtered out
    async fn list_group_memberships(
        &self,
        user: &UserId,
    ) -> Result<Vec<Membership>, DirectoryError>;

    /// Remove one user from one group
    async fn remove_member(
        &self,
        group: &GroupId,
        user: &UserId,
    ) -> Result<RemovalStatus, DirectoryError>;

    /// Tear down the session. Called once at the end of a run, including after
    /// fatal errors that occur past authentication.
    async fn close(&self) -> Result<(), DirectoryError>;
}
