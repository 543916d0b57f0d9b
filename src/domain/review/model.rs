//! Review domain entity

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};

/// Accepted star ratings
pub const RATING_RANGE: RangeInclusive<i32> = 1..=5;

/// One client's opinion of one hotel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: i32,
    pub client_id: i32,
    pub hotel_id: i32,
    pub rating: i32,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn apply(&mut self, draft: ReviewDraft) {
        self.rating = draft.rating;
        self.text = draft.text;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub rating: i32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub client_id: i32,
    pub hotel_id: i32,
    pub rating: i32,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl NewReview {
    pub fn new(client_id: i32, hotel_id: i32, draft: ReviewDraft) -> Self {
        Self {
            client_id,
            hotel_id,
            rating: draft.rating,
            text: draft.text,
            created_at: Utc::now(),
        }
    }
}
