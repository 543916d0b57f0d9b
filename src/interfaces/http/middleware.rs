//! Bearer-token authentication middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::domain::{Actor, DomainError, RepositoryProvider};
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig};
use crate::shared::i18n::SharedMessages;

/// Authentication state: JWT config, the store clients are resolved
/// against, and the message catalog
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
    pub repos: Arc<dyn RepositoryProvider>,
    pub messages: SharedMessages,
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolve the `Authorization` header to an [`Actor`].
///
/// Only the token subject is trusted. Login and roles are read from the
/// stored client, so a renamed client keeps its identity and a deleted
/// client's token stops working.
pub async fn authenticate(
    auth_header: Option<&str>,
    state: &AuthState,
) -> Result<Actor, DomainError> {
    let Some(auth_header) = auth_header else {
        return Err(DomainError::Unauthorized(
            state.messages.message("auth.token-required"),
        ));
    };

    let invalid = || DomainError::Unauthorized(state.messages.message("auth.invalid-token"));
    let token = extract_token(auth_header).ok_or_else(invalid)?;

    let claims = verify_token(token, &state.jwt_config).map_err(|e| {
        debug!(error = %e, "Token rejected");
        invalid()
    })?;
    let client_id = claims.client_id().ok_or_else(invalid)?;

    match state.repos.clients().find_by_id(client_id).await? {
        Some(client) => Ok(Actor::from(&client)),
        None => {
            debug!(client_id, "Token subject no longer exists");
            Err(invalid())
        }
    }
}

/// JWT authentication middleware.
///
/// On success the caller's [`Actor`] is inserted into request extensions,
/// where handlers pick it up with `Extension<Actor>`.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    match authenticate(auth_header.as_deref(), &auth_state).await {
        Ok(actor) => {
            request.extensions_mut().insert(actor);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}
