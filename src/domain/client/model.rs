//! Client domain entity

use std::collections::BTreeSet;

/// Client role
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Some(Self::User),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Encode a role set as a comma separated column value
    pub fn join(roles: &BTreeSet<Role>) -> String {
        roles.iter().map(Role::as_str).collect::<Vec<_>>().join(",")
    }

    /// Decode a column value, ignoring unknown entries
    pub fn split(s: &str) -> BTreeSet<Role> {
        s.split(',').filter_map(Role::parse).collect()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Persisted client. The password is only ever held as a hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: i32,
    pub login: String,
    pub password_hash: String,
    pub name: String,
    pub roles: BTreeSet<Role>,
}

impl Client {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Registration input with the plaintext password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDraft {
    pub login: String,
    pub password: String,
    pub name: String,
}

/// Profile update. The password is re-hashed only when supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientUpdate {
    pub login: String,
    pub name: String,
    pub password: Option<String>,
}

/// Client ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    pub login: String,
    pub password_hash: String,
    pub name: String,
    pub roles: BTreeSet<Role>,
}
