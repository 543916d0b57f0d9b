//! Client registration, profile and removal

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::info;

use crate::application::access::AccessPolicy;
use crate::application::ports::PasswordHasher;
use crate::application::validation::{FieldViolation, ValidationService};
use crate::domain::{
    Actor, Client, ClientDraft, ClientUpdate, DomainError, DomainResult, NewClient,
    RepositoryProvider, Role,
};
use crate::shared::i18n::SharedMessages;

pub struct ClientService {
    repos: Arc<dyn RepositoryProvider>,
    access: Arc<AccessPolicy>,
    validation: Arc<ValidationService>,
    hasher: Arc<dyn PasswordHasher>,
    messages: SharedMessages,
}

impl ClientService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        access: Arc<AccessPolicy>,
        validation: Arc<ValidationService>,
        hasher: Arc<dyn PasswordHasher>,
        messages: SharedMessages,
    ) -> Self {
        Self {
            repos,
            access,
            validation,
            hasher,
            messages,
        }
    }

    pub async fn get(&self, id: i32) -> DomainResult<Option<Client>> {
        self.repos.clients().find_by_id(id).await
    }

    pub async fn load(&self, id: i32) -> DomainResult<Client> {
        self.get(id).await?.ok_or_else(|| {
            DomainError::ClientNotFound(self.messages.message("client.not-found"))
        })
    }

    pub async fn find_all(&self, actor: &Actor) -> DomainResult<Vec<Client>> {
        self.access.require_admin(actor)?;
        self.repos.clients().find_all().await
    }

    /// Public sign-up. New clients always get the USER role.
    pub async fn register(&self, draft: ClientDraft) -> DomainResult<Client> {
        self.check_login(&draft.login, None).await?;

        let client = self
            .repos
            .clients()
            .insert(NewClient {
                login: draft.login,
                password_hash: self.hasher.hash(&draft.password)?,
                name: draft.name,
                roles: BTreeSet::from([Role::User]),
            })
            .await?;

        info!(client_id = client.id, login = %client.login, "Client registered");
        Ok(client)
    }

    /// Creates the bootstrap administrator when no client exists yet.
    pub async fn ensure_admin(
        &self,
        login: &str,
        name: &str,
        password: &str,
    ) -> DomainResult<Option<Client>> {
        if self.repos.clients().count().await? > 0 {
            return Ok(None);
        }

        let client = self
            .repos
            .clients()
            .insert(NewClient {
                login: login.to_string(),
                password_hash: self.hasher.hash(password)?,
                name: name.to_string(),
                roles: BTreeSet::from([Role::User, Role::Admin]),
            })
            .await?;

        info!(client_id = client.id, login = %client.login, "Default admin created");
        Ok(Some(client))
    }

    /// Self or admin. Roles are kept; the password is re-hashed only when
    /// a new one is supplied.
    pub async fn update(
        &self,
        actor: &Actor,
        id: i32,
        update: ClientUpdate,
    ) -> DomainResult<Client> {
        let mut client = self.load(id).await?;
        self.access
            .check_possibility_update(actor, &update.login, &client.login)?;
        self.check_login(&update.login, Some(client.id)).await?;

        if let Some(password) = update.password.as_deref() {
            client.password_hash = self.hasher.hash(password)?;
        }
        client.login = update.login;
        client.name = update.name;

        let client = self.repos.clients().update(client).await?;
        info!(client_id = client.id, "Client updated");
        Ok(client)
    }

    /// Self or admin; bookings and reviews of the client are removed too.
    pub async fn delete(&self, actor: &Actor, id: i32) -> DomainResult<()> {
        let client = self.load(id).await?;
        self.access.check_possibility_action(actor, &client.login)?;

        self.repos.clients().delete(client.id).await?;
        info!(client_id = client.id, login = %client.login, "Client deleted");
        Ok(())
    }

    async fn check_login(&self, login: &str, current: Option<i32>) -> DomainResult<()> {
        let mut violations = Vec::new();
        if let Some(other) = self.repos.clients().find_by_login(login).await? {
            if Some(other.id) != current {
                violations.push(FieldViolation::new("login", "login-taken"));
            }
        }
        self.validation.fail_if_any(violations)
    }
}
