//! Review aggregate

pub mod model;
pub mod repository;

pub use model::{NewReview, Review, ReviewDraft, RATING_RANGE};
pub use repository::ReviewRepository;
