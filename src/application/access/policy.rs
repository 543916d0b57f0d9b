//! Decides whether an actor may act on a target identity

use tracing::warn;

use crate::domain::{Actor, DomainError, DomainResult};
use crate::shared::i18n::SharedMessages;

pub struct AccessPolicy {
    messages: SharedMessages,
}

impl AccessPolicy {
    pub fn new(messages: SharedMessages) -> Self {
        Self { messages }
    }

    /// Passes when `login` is the actor's own login or the actor is an
    /// admin.
    pub fn check_possibility_action(&self, actor: &Actor, login: &str) -> DomainResult<()> {
        if actor.may_act_for(login) {
            return Ok(());
        }
        warn!(actor = %actor.login, target = %login, "Access denied");
        Err(self.denied())
    }

    /// Update variant: only the login the record currently has is checked,
    /// so a client may rename themselves.
    pub fn check_possibility_update(
        &self,
        actor: &Actor,
        new_login: &str,
        current_login: &str,
    ) -> DomainResult<()> {
        if actor.may_act_for(current_login) {
            return Ok(());
        }
        warn!(
            actor = %actor.login,
            target = %current_login,
            requested = %new_login,
            "Update denied"
        );
        Err(self.denied())
    }

    pub fn require_admin(&self, actor: &Actor) -> DomainResult<()> {
        if actor.is_admin() {
            return Ok(());
        }
        warn!(actor = %actor.login, "Admin role required");
        Err(self.denied())
    }

    fn denied(&self) -> DomainError {
        DomainError::InsufficientAccess(self.messages.message("access.denied"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::Role;
    use crate::shared::i18n::MessageCatalog;

    fn policy() -> AccessPolicy {
        AccessPolicy::new(Arc::new(MessageCatalog::embedded("en").unwrap()))
    }

    fn user(login: &str) -> Actor {
        Actor::new(1, login, [Role::User].into_iter().collect())
    }

    fn admin() -> Actor {
        Actor::new(2, "root", [Role::User, Role::Admin].into_iter().collect())
    }

    #[test]
    fn action_on_someone_else_is_denied() {
        let err = policy()
            .check_possibility_action(&user("anna"), "boris")
            .unwrap_err();
        assert!(matches!(err, DomainError::InsufficientAccess(_)));
    }

    #[test]
    fn action_on_self_or_as_admin_is_allowed() {
        let policy = policy();
        assert!(policy.check_possibility_action(&user("anna"), "anna").is_ok());
        assert!(policy.check_possibility_action(&admin(), "anna").is_ok());
    }

    #[test]
    fn update_only_checks_current_login() {
        let policy = policy();
        assert!(policy
            .check_possibility_update(&user("anna"), "boris", "anna")
            .is_ok());
        assert!(policy
            .check_possibility_update(&user("anna"), "anna", "boris")
            .is_err());
    }

    #[test]
    fn plain_user_is_not_admin() {
        let policy = policy();
        assert!(policy.require_admin(&user("anna")).is_err());
        assert!(policy.require_admin(&admin()).is_ok());
    }
}
