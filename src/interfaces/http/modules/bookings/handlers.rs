//! Booking API handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::dto::{BookingDto, BookingRequest, BookingUpdateRequest};
use crate::application::{BookingService, ValidationService};
use crate::domain::{Actor, Booking, DomainError};
use crate::interfaces::http::common::{ApiResult, ErrorResponse, ValidatedJson};

#[derive(Clone)]
pub struct BookingHandlerState {
    pub bookings: Arc<BookingService>,
    pub validation: Arc<ValidationService>,
}

fn to_dtos(bookings: Vec<Booking>) -> Json<Vec<BookingDto>> {
    Json(bookings.into_iter().map(BookingDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/bookings/my",
    tag = "Bookings",
    responses((status = 200, description = "Bookings of the caller", body = Vec<BookingDto>)),
    security(("bearer_auth" = []))
)]
pub async fn my_bookings(
    State(state): State<BookingHandlerState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Vec<BookingDto>> {
    Ok(to_dtos(state.bookings.find_mine(&actor).await?))
}

#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "Bookings",
    params(("id" = i32, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking found", body = BookingDto),
        (status = 400, description = "Booking not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_booking(
    State(state): State<BookingHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<BookingDto> {
    Ok(Json(state.bookings.load(id).await?.into()))
}

#[utoipa::path(
    get,
    path = "/bookings/room/{roomId}",
    tag = "Bookings",
    params(("roomId" = i32, Path, description = "Room id")),
    responses(
        (status = 200, description = "Bookings of the room ordered by start date", body = Vec<BookingDto>),
        (status = 400, description = "Room not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn room_bookings(
    State(state): State<BookingHandlerState>,
    Path(room_id): Path<i32>,
) -> ApiResult<Vec<BookingDto>> {
    Ok(to_dtos(state.bookings.find_by_room(room_id).await?))
}

#[utoipa::path(
    post,
    path = "/bookings/new",
    tag = "Bookings",
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Booking accepted", body = BookingDto),
        (status = 400, description = "Bad dates, room not found or room already booked", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_booking(
    State(state): State<BookingHandlerState>,
    Extension(actor): Extension<Actor>,
    ValidatedJson(request): ValidatedJson<BookingRequest>,
) -> ApiResult<BookingDto> {
    let range = state.validation.parse_range(&request.start, &request.end)?;
    // presence is enforced by `ValidatedJson`
    let room_id = request.room_id.unwrap_or_default();

    let booking = state
        .bookings
        .create(&actor, room_id, range.start(), range.end())
        .await?;
    metrics::counter!("bookings_created_total").increment(1);
    metrics::histogram!("booking_nights").record(range.nights() as f64);
    Ok(Json(booking.into()))
}

#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    tag = "Bookings",
    params(("id" = i32, Path, description = "Booking id")),
    request_body = BookingUpdateRequest,
    responses(
        (status = 200, description = "Booking rescheduled", body = BookingDto),
        (status = 400, description = "Not found, bad dates, overlap or insufficient access", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_booking(
    State(state): State<BookingHandlerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<BookingUpdateRequest>,
) -> ApiResult<BookingDto> {
    let range = state.validation.parse_range(&request.start, &request.end)?;
    let booking = state
        .bookings
        .update(&actor, id, range.start(), range.end())
        .await?;
    Ok(Json(booking.into()))
}

#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "Bookings",
    params(("id" = i32, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking cancelled"),
        (status = 400, description = "Booking not found or insufficient access", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_booking(
    State(state): State<BookingHandlerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<StatusCode, DomainError> {
    state.bookings.delete(&actor, id).await?;
    metrics::counter!("bookings_cancelled_total").increment(1);
    Ok(StatusCode::OK)
}
