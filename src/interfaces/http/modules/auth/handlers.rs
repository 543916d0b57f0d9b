//! Authentication API handlers

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use super::dto::{LoginRequest, LoginResponse};
use crate::application::IdentityService;
use crate::interfaces::http::common::{ApiResult, ErrorResponse, ValidatedJson};

#[derive(Clone)]
pub struct AuthHandlerState {
    pub identity: Arc<IdentityService>,
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = LoginResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let auth = state.identity.login(&request.login, &request.password).await?;

    Ok(Json(LoginResponse {
        token: auth.token,
        token_type: auth.token_type,
        expires_in: auth.expires_in,
        client: (&auth.client).into(),
    }))
}
