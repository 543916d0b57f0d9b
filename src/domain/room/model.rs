//! Room domain entity

use rust_decimal::Decimal;

/// Persisted room. `hotel_id` is a back-reference resolved by lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: i32,
    pub hotel_id: i32,
    /// Unique within the hotel
    pub number: i32,
    pub room_type: String,
    pub price: Decimal,
}

/// Caller-supplied room fields. The hotel comes from the route on create
/// and from the stored room on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDraft {
    pub number: i32,
    pub room_type: String,
    pub price: Decimal,
}

/// Room ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    pub hotel_id: i32,
    pub number: i32,
    pub room_type: String,
    pub price: Decimal,
}

impl NewRoom {
    pub fn new(hotel_id: i32, draft: RoomDraft) -> Self {
        Self {
            hotel_id,
            number: draft.number,
            room_type: draft.room_type,
            price: draft.price,
        }
    }
}

impl Room {
    /// Overwrite the mutable fields; id and hotel stay attached.
    pub fn apply(&mut self, draft: RoomDraft) {
        self.number = draft.number;
        self.room_type = draft.room_type;
        self.price = draft.price;
    }
}
