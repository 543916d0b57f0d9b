//! Room aggregate

pub mod model;
pub mod repository;

pub use model::{NewRoom, Room, RoomDraft};
pub use repository::RoomRepository;
