//! Room DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Room, RoomDraft};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub id: i32,
    pub hotel_id: i32,
    pub number: i32,
    pub room_type: String,
    /// Price per night, as a decimal string
    pub price: Decimal,
}

impl From<Room> for RoomDto {
    fn from(r: Room) -> Self {
        Self {
            id: r.id,
            hotel_id: r.hotel_id,
            number: r.number,
            room_type: r.room_type,
            price: r.price,
        }
    }
}

/// Body of room create and update. Price positivity and number uniqueness
/// are checked by the service, against the store.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    #[validate(range(min = 1, max = 100000, code = "range"))]
    pub number: i32,
    #[validate(length(min = 1, max = 50, code = "length"))]
    pub room_type: String,
    #[schema(example = "120.50")]
    pub price: Decimal,
}

impl From<RoomRequest> for RoomDraft {
    fn from(r: RoomRequest) -> Self {
        Self {
            number: r.number,
            room_type: r.room_type,
            price: r.price,
        }
    }
}

/// Hotel and half-open date range `[start, end)`, dates as `YYYY-MM-DD`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomDateQuery {
    #[validate(required)]
    pub hotel_id: Option<i32>,
    #[schema(example = "2030-01-01")]
    pub start: String,
    #[schema(example = "2030-01-05")]
    pub end: String,
}
