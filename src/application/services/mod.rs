//! Resource services
//!
//! Each service loads what it needs through the [`RepositoryProvider`],
//! runs access and availability checks, and only then mutates the store.

mod booking;
mod client;
mod hotel;
mod review;
mod room;

use std::sync::Arc;

pub use booking::BookingService;
pub use client::ClientService;
pub use hotel::HotelService;
pub use review::ReviewService;
pub use room::RoomService;

use crate::application::access::AccessPolicy;
use crate::application::availability::AvailabilityEngine;
use crate::application::identity::IdentityService;
use crate::application::ports::PasswordHasher;
use crate::application::validation::ValidationService;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::shared::i18n::SharedMessages;

/// Every application service, wired to one store.
#[derive(Clone)]
pub struct Services {
    pub repos: Arc<dyn RepositoryProvider>,
    pub validation: Arc<ValidationService>,
    pub hotels: Arc<HotelService>,
    pub rooms: Arc<RoomService>,
    pub clients: Arc<ClientService>,
    pub bookings: Arc<BookingService>,
    pub reviews: Arc<ReviewService>,
    pub identity: Arc<IdentityService>,
}

impl Services {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        messages: SharedMessages,
        hasher: Arc<dyn PasswordHasher>,
        jwt_config: JwtConfig,
    ) -> Self {
        let access = Arc::new(AccessPolicy::new(messages.clone()));
        let validation = Arc::new(ValidationService::new(messages.clone()));
        let availability = Arc::new(AvailabilityEngine::new(repos.clone(), messages.clone()));

        Self {
            hotels: Arc::new(HotelService::new(
                repos.clone(),
                access.clone(),
                messages.clone(),
            )),
            rooms: Arc::new(RoomService::new(
                repos.clone(),
                access.clone(),
                availability.clone(),
                validation.clone(),
                messages.clone(),
            )),
            clients: Arc::new(ClientService::new(
                repos.clone(),
                access.clone(),
                validation.clone(),
                hasher.clone(),
                messages.clone(),
            )),
            bookings: Arc::new(BookingService::new(
                repos.clone(),
                access.clone(),
                availability,
                messages.clone(),
            )),
            reviews: Arc::new(ReviewService::new(
                repos.clone(),
                access,
                validation.clone(),
                messages.clone(),
            )),
            identity: Arc::new(IdentityService::new(
                repos.clone(),
                hasher,
                jwt_config,
                messages,
            )),
            validation,
            repos,
        }
    }
}
