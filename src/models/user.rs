use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of roles a caller or a user record may carry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Viewer,
}

impl Role {
    /// Textual name, as persisted and as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Viewer => "VIEWER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "VIEWER" => Ok(Role::Viewer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A persisted user record
///
/// Deliberately not `Serialize`: responses go through `UserResponse`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    /// Store-assigned identity
    pub id: u64,
    pub username: String,
    /// argon2 PHC string
    pub password_hash: String,
    pub role: Role,
}

/// A user record that has not been persisted yet
#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

impl NewUser {
    pub fn new(username: String, password_hash: String, role: Role) -> Self {
        Self {
            username,
            password_hash,
            role,
        }
    }

    /// Attach the identity assigned by the store
    pub fn with_id(self, id: u64) -> User {
        User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            role: self.role,
        }
    }
}
