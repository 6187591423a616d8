//! Directory entities: principals, groups and membership edges

use serde::{Deserialize, Serialize};

use crate::domain::DirectoryError;

/// Human-readable principal name, the lookup key for a user (e.g. `alice@example.com`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PrincipalName(String);

impl PrincipalName {
    /// Create a new PrincipalName after validation
    pub fn new(name: impl Into<String>) -> Result<Self, DirectoryError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(DirectoryError::configuration(
                "principal name must not be empty",
            ));
        }

        if !name.contains('@') {
            return Err(DirectoryError::configuration(format!(
                "'{}' is not a valid principal name",
                name
            )));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PrincipalName {
    type Error = DirectoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PrincipalName> for String {
    fn from(name: PrincipalName) -> Self {
        name.0
    }
}

impl std::fmt::Display for PrincipalName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable directory object id for a user, opaque and immutable once resolved
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable directory object id for a group
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The resolved target user. Never mutated after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    id: UserId,
    display_name: String,
    principal_name: PrincipalName,
}

impl Principal {
    pub fn new(
        id: UserId,
        display_name: impl Into<String>,
        principal_name: PrincipalName,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            principal_name,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn principal_name(&self) -> &PrincipalName {
        &self.principal_name
    }
}

/// One user-to-group edge as reported by the directory at enumeration time.
/// The directory may change afterwards; callers must tolerate the edge having
/// already been removed by another actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    group_id: GroupId,
    group_name: String,
}

impl Membership {
    pub fn new(group_id: GroupId, group_name: impl Into<String>) -> Self {
        Self {
            group_id,
            group_name: group_name.into(),
        }
    }

    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }
}
