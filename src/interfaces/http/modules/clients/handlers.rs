//! Client API handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::dto::{ClientDto, ClientUpdateRequest, RegistrationRequest};
use crate::application::ClientService;
use crate::domain::{Actor, DomainError};
use crate::interfaces::http::common::{ApiResult, ErrorResponse, ValidatedJson};

#[derive(Clone)]
pub struct ClientHandlerState {
    pub clients: Arc<ClientService>,
}

#[utoipa::path(
    post,
    path = "/clients/registration",
    tag = "Clients",
    request_body = RegistrationRequest,
    responses(
        (status = 200, description = "Client registered with the USER role", body = ClientDto),
        (status = 400, description = "Validation error or login taken", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<ClientHandlerState>,
    ValidatedJson(request): ValidatedJson<RegistrationRequest>,
) -> ApiResult<ClientDto> {
    let client = state.clients.register(request.into()).await?;
    Ok(Json(client.into()))
}

#[utoipa::path(
    get,
    path = "/clients",
    tag = "Clients",
    responses(
        (status = 200, description = "All clients", body = Vec<ClientDto>),
        (status = 400, description = "Not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_clients(
    State(state): State<ClientHandlerState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Vec<ClientDto>> {
    let clients = state.clients.find_all(&actor).await?;
    Ok(Json(clients.into_iter().map(ClientDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/clients/{id}",
    tag = "Clients",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "Client found", body = ClientDto),
        (status = 400, description = "Client not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_client(
    State(state): State<ClientHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<ClientDto> {
    Ok(Json(state.clients.load(id).await?.into()))
}

#[utoipa::path(
    patch,
    path = "/clients/{id}",
    tag = "Clients",
    params(("id" = i32, Path, description = "Client id")),
    request_body = ClientUpdateRequest,
    responses(
        (status = 200, description = "Client updated", body = ClientDto),
        (status = 400, description = "Not found, validation error or insufficient access", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_client(
    State(state): State<ClientHandlerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<ClientUpdateRequest>,
) -> ApiResult<ClientDto> {
    let client = state.clients.update(&actor, id, request.into()).await?;
    Ok(Json(client.into()))
}

#[utoipa::path(
    delete,
    path = "/clients/{id}",
    tag = "Clients",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "Client deleted with their bookings and reviews"),
        (status = 400, description = "Client not found or insufficient access", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_client(
    State(state): State<ClientHandlerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<StatusCode, DomainError> {
    state.clients.delete(&actor, id).await?;
    Ok(StatusCode::OK)
}
