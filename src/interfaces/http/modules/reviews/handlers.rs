//! Review API handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::dto::{ReviewDto, ReviewRequest};
use crate::application::ReviewService;
use crate::domain::{Actor, DomainError};
use crate::interfaces::http::common::{ApiResult, ErrorResponse, ValidatedJson};

#[derive(Clone)]
pub struct ReviewHandlerState {
    pub reviews: Arc<ReviewService>,
}

#[utoipa::path(
    get,
    path = "/reviews/{id}",
    tag = "Reviews",
    params(("id" = i32, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review found", body = ReviewDto),
        (status = 400, description = "Review not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_review(
    State(state): State<ReviewHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<ReviewDto> {
    Ok(Json(state.reviews.load(id).await?.into()))
}

#[utoipa::path(
    get,
    path = "/reviews/hotel/{hotelId}",
    tag = "Reviews",
    params(("hotelId" = i32, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Reviews of the hotel, newest first", body = Vec<ReviewDto>),
        (status = 400, description = "Hotel not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn hotel_reviews(
    State(state): State<ReviewHandlerState>,
    Path(hotel_id): Path<i32>,
) -> ApiResult<Vec<ReviewDto>> {
    let reviews = state.reviews.find_by_hotel(hotel_id).await?;
    Ok(Json(reviews.into_iter().map(ReviewDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/reviews/{id}/new",
    tag = "Reviews",
    params(("id" = i32, Path, description = "Hotel id")),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review posted", body = ReviewDto),
        (status = 400, description = "Validation error, hotel not found or already reviewed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_review(
    State(state): State<ReviewHandlerState>,
    Extension(actor): Extension<Actor>,
    Path(hotel_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<ReviewRequest>,
) -> ApiResult<ReviewDto> {
    let review = state.reviews.create(&actor, hotel_id, request.into()).await?;
    Ok(Json(review.into()))
}

#[utoipa::path(
    patch,
    path = "/reviews/{id}",
    tag = "Reviews",
    params(("id" = i32, Path, description = "Review id")),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ReviewDto),
        (status = 400, description = "Not found, validation error or insufficient access", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_review(
    State(state): State<ReviewHandlerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<ReviewRequest>,
) -> ApiResult<ReviewDto> {
    let review = state.reviews.update(&actor, id, request.into()).await?;
    Ok(Json(review.into()))
}

#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    tag = "Reviews",
    params(("id" = i32, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review deleted"),
        (status = 400, description = "Review not found or insufficient access", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_review(
    State(state): State<ReviewHandlerState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<StatusCode, DomainError> {
    state.reviews.delete(&actor, id).await?;
    Ok(StatusCode::OK)
}
