//! The authenticated caller

use std::collections::BTreeSet;

use super::client::{Client, Role};

/// Identity on whose behalf a request runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub client_id: i32,
    pub login: String,
    pub roles: BTreeSet<Role>,
}

impl Actor {
    pub fn new(client_id: i32, login: impl Into<String>, roles: BTreeSet<Role>) -> Self {
        Self {
            client_id,
            login: login.into(),
            roles,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }

    /// Whether this actor may act on resources owned by `login`.
    pub fn may_act_for(&self, login: &str) -> bool {
        self.login == login || self.is_admin()
    }
}

impl From<&Client> for Actor {
    fn from(client: &Client) -> Self {
        Self::new(client.id, client.login.clone(), client.roles.clone())
    }
}
