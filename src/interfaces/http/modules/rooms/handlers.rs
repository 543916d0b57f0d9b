//! Room API handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::dto::{RoomDateQuery, RoomDto, RoomRequest};
use crate::application::{RoomService, ValidationService};
use crate::domain::{Actor, DateRange, DomainError, Room};
use crate::interfaces::http::common::{ApiResult, ErrorResponse, ValidatedJson};

#[derive(Clone)]
pub struct RoomHandlerState {
    pub rooms: Arc<RoomService>,
    pub validation: Arc<ValidationService>,
}

impl RoomHandlerState {
    fn query(&self, query: &RoomDateQuery) -> Result<(i32, DateRange), DomainError> {
        let range = self.validation.parse_range(&query.start, &query.end)?;
        // presence is enforced by `ValidatedJson`
        let hotel_id = query.hotel_id.unwrap_or_default();
        Ok((hotel_id, range))
    }
}

fn to_dtos(rooms: Vec<Room>) -> Json<Vec<RoomDto>> {
    Json(rooms.into_iter().map(RoomDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/rooms/{id}",
    tag = "Rooms",
    params(("id" = i32, Path, description = "Room id")),
    responses(
        (status = 200, description = "Room found", body = RoomDto),
        (status = 400, description = "Room not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_room(
    State(state): State<RoomHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<RoomDto> {
    Ok(Json(state.rooms.load(id).await?.into()))
}

#[utoipa::path(
    get,
    path = "/rooms/{id}/allRooms",
    tag = "Rooms",
    params(("id" = i32, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Rooms of the hotel ordered by number", body = Vec<RoomDto>),
        (status = 400, description = "Hotel not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_rooms(
    State(state): State<RoomHandlerState>,
    Path(hotel_id): Path<i32>,
) -> ApiResult<Vec<RoomDto>> {
    Ok(to_dtos(state.rooms.find_by_hotel(hotel_id).await?))
}

#[utoipa::path(
    put,
    path = "/rooms/allAvailableRoomsForGivenDate",
    tag = "Rooms",
    request_body = RoomDateQuery,
    responses(
        (status = 200, description = "Rooms free for the whole range", body = Vec<RoomDto>),
        (status = 400, description = "Bad dates or hotel not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn available_rooms(
    State(state): State<RoomHandlerState>,
    ValidatedJson(query): ValidatedJson<RoomDateQuery>,
) -> ApiResult<Vec<RoomDto>> {
    let (hotel_id, range) = state.query(&query)?;
    Ok(to_dtos(state.rooms.find_available(hotel_id, &range).await?))
}

#[utoipa::path(
    put,
    path = "/rooms/allBookedRoomsForGivenDate",
    tag = "Rooms",
    request_body = RoomDateQuery,
    responses(
        (status = 200, description = "Rooms with a booking overlapping the range", body = Vec<RoomDto>),
        (status = 400, description = "Bad dates or hotel not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn booked_rooms(
    State(state): State<RoomHandlerState>,
    ValidatedJson(query): ValidatedJson<RoomDateQuery>,
) -> ApiResult<Vec<RoomDto>> {
    let (hotel_id, range) = state.query(&query)?;
    Ok(to_dtos(state.rooms.find_booked(hotel_id, &range).await?))
}

#[utoipa::path(
    post,
    path = "/rooms/{id}/new",
    tag = "Rooms",
    params(("id" = i32, Path, description = "Hotel id")),
    request_body = RoomRequest,
    responses(
        (status = 200, description = "Room created", body = RoomDto),
        (status = 400, description = "Validation error or hotel not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_room(
    State(state): State<RoomHandlerState>,
    Extension(actor): Extension<Actor>,
    Path(hotel_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<RoomRequest>,
) -> ApiResult<RoomDto> {
    let room = state.rooms.save(&actor, hotel_id, request.into()).await?;
    Ok(Json(room.into()))
}

#[utoipa::path(
    patch,
    path = "/rooms/{id}",
    tag = "Rooms",
    params(("id" = i32, Path, description = "Room id")),
    request_body = RoomRequest,
    responses(
        (status = 200, description = "Room updated", body = RoomDto),
        (status = 400, description = "Room not found or validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_room(
    State(state): State<RoomHandlerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<RoomRequest>,
) -> ApiResult<RoomDto> {
    let room = state.rooms.update(&actor, id, request.into()).await?;
    Ok(Json(room.into()))
}

#[utoipa::path(
    delete,
    path = "/rooms/{id}",
    tag = "Rooms",
    params(("id" = i32, Path, description = "Room id")),
    responses(
        (status = 200, description = "Room deleted"),
        (status = 400, description = "Room not found or has active bookings", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_room(
    State(state): State<RoomHandlerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<StatusCode, DomainError> {
    state.rooms.delete(&actor, id).await?;
    Ok(StatusCode::OK)
}
