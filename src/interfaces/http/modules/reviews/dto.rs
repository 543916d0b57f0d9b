//! Review DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Review, ReviewDraft};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: i32,
    pub client_id: i32,
    pub hotel_id: i32,
    pub rating: i32,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewDto {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            client_id: r.client_id,
            hotel_id: r.hotel_id,
            rating: r.rating,
            text: r.text,
            created_at: r.created_at,
        }
    }
}

/// Rating bounds are enforced by the service.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    #[schema(minimum = 1, maximum = 5)]
    pub rating: i32,
    #[validate(length(min = 1, max = 2000, code = "length"))]
    pub text: String,
}

impl From<ReviewRequest> for ReviewDraft {
    fn from(r: ReviewRequest) -> Self {
        Self {
            rating: r.rating,
            text: r.text,
        }
    }
}
