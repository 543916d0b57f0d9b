pub mod auth;
pub mod bookings;
pub mod clients;
pub mod health;
pub mod hotels;
pub mod metrics;
pub mod request_id;
pub mod reviews;
pub mod rooms;
