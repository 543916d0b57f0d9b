//! Database entities module

pub mod booking;
pub mod client;
pub mod hotel;
pub mod review;
pub mod room;

pub use booking::Entity as Booking;
pub use client::Entity as Client;
pub use hotel::Entity as Hotel;
pub use review::Entity as Review;
pub use room::Entity as Room;
