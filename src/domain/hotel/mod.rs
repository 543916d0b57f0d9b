//! Hotel aggregate
//!
//! A hotel owns its rooms; rooms point back at it by id.

pub mod model;
pub mod repository;

pub use model::{Hotel, HotelDraft};
pub use repository::HotelRepository;
