//! Hotel DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Hotel, HotelDraft};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelDto {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
}

impl From<Hotel> for HotelDto {
    fn from(h: Hotel) -> Self {
        Self {
            id: h.id,
            name: h.name,
            address: h.address,
            description: h.description,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelRequest {
    #[validate(length(min = 1, max = 100, code = "length"))]
    pub name: String,
    #[validate(length(min = 1, max = 200, code = "length"))]
    pub address: String,
    #[validate(length(max = 2000, code = "length"))]
    pub description: Option<String>,
}

impl From<HotelRequest> for HotelDraft {
    fn from(r: HotelRequest) -> Self {
        Self {
            name: r.name,
            address: r.address,
            description: r.description,
        }
    }
}
