//! Booking DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Booking;

/// A booking of `[startDate, endDate)`: the end date is the check-out day.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: i32,
    pub room_id: i32,
    pub client_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            room_id: b.room_id,
            client_id: b.client_id,
            start_date: b.start_date,
            end_date: b.end_date,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[validate(required)]
    pub room_id: Option<i32>,
    #[schema(example = "2030-01-01")]
    pub start: String,
    #[schema(example = "2030-01-05")]
    pub end: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdateRequest {
    #[schema(example = "2030-01-02")]
    pub start: String,
    #[schema(example = "2030-01-06")]
    pub end: String,
}
