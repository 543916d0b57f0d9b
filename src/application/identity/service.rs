//! Login orchestration
//!
//! HTTP handlers stay thin and delegate here.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::ports::PasswordHasher;
use crate::domain::{Client, DomainError, DomainResult, RepositoryProvider};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::shared::i18n::SharedMessages;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub client: Client,
}

pub struct IdentityService {
    repos: Arc<dyn RepositoryProvider>,
    hasher: Arc<dyn PasswordHasher>,
    jwt_config: JwtConfig,
    messages: SharedMessages,
}

impl IdentityService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        hasher: Arc<dyn PasswordHasher>,
        jwt_config: JwtConfig,
        messages: SharedMessages,
    ) -> Self {
        Self {
            repos,
            hasher,
            jwt_config,
            messages,
        }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    /// Check the credentials and sign a token for the client.
    pub async fn login(&self, login: &str, password: &str) -> DomainResult<AuthResult> {
        let client = self.repos.clients().find_by_login(login).await?;

        let Some(client) = client.filter(|c| self.hasher.verify(password, &c.password_hash))
        else {
            warn!(login, "Failed login attempt");
            return Err(DomainError::Unauthorized(
                self.messages.message("auth.invalid-credentials"),
            ));
        };

        let token = create_token(&client, &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("failed to sign token: {}", e)))?;

        info!(client_id = client.id, login = %client.login, "Client logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            client,
        })
    }
}
