//! Hotel API handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::dto::{HotelDto, HotelRequest};
use crate::application::HotelService;
use crate::domain::{Actor, DomainError};
use crate::interfaces::http::common::{ApiResult, ErrorResponse, ValidatedJson};

#[derive(Clone)]
pub struct HotelHandlerState {
    pub hotels: Arc<HotelService>,
}

#[utoipa::path(
    get,
    path = "/hotels",
    tag = "Hotels",
    responses((status = 200, description = "All hotels", body = Vec<HotelDto>)),
    security(("bearer_auth" = []))
)]
pub async fn list_hotels(State(state): State<HotelHandlerState>) -> ApiResult<Vec<HotelDto>> {
    let hotels = state.hotels.find_all().await?;
    Ok(Json(hotels.into_iter().map(HotelDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/hotels/{id}",
    tag = "Hotels",
    params(("id" = i32, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Hotel found", body = HotelDto),
        (status = 400, description = "Hotel not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_hotel(
    State(state): State<HotelHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<HotelDto> {
    Ok(Json(state.hotels.load(id).await?.into()))
}

#[utoipa::path(
    post,
    path = "/hotels/new",
    tag = "Hotels",
    request_body = HotelRequest,
    responses(
        (status = 200, description = "Hotel created", body = HotelDto),
        (status = 400, description = "Validation error or not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_hotel(
    State(state): State<HotelHandlerState>,
    Extension(actor): Extension<Actor>,
    ValidatedJson(request): ValidatedJson<HotelRequest>,
) -> ApiResult<HotelDto> {
    let hotel = state.hotels.save(&actor, request.into()).await?;
    Ok(Json(hotel.into()))
}

#[utoipa::path(
    patch,
    path = "/hotels/{id}",
    tag = "Hotels",
    params(("id" = i32, Path, description = "Hotel id")),
    request_body = HotelRequest,
    responses(
        (status = 200, description = "Hotel updated", body = HotelDto),
        (status = 400, description = "Hotel not found or validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_hotel(
    State(state): State<HotelHandlerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<HotelRequest>,
) -> ApiResult<HotelDto> {
    let hotel = state.hotels.update(&actor, id, request.into()).await?;
    Ok(Json(hotel.into()))
}

#[utoipa::path(
    delete,
    path = "/hotels/{id}",
    tag = "Hotels",
    params(("id" = i32, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Hotel deleted with its rooms"),
        (status = 400, description = "Hotel not found or has active bookings", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_hotel(
    State(state): State<HotelHandlerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<StatusCode, DomainError> {
    state.hotels.delete(&actor, id).await?;
    Ok(StatusCode::OK)
}
