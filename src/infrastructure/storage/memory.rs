//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::domain::booking::{self, BookingRepository, BookingWrite};
use crate::domain::client::ClientRepository;
use crate::domain::hotel::HotelRepository;
use crate::domain::review::ReviewRepository;
use crate::domain::room::RoomRepository;
use crate::domain::{
    Booking, Client, DomainError, DomainResult, Hotel, HotelDraft, NewBooking, NewClient,
    NewReview, NewRoom, RepositoryProvider, Review, Room,
};

/// In-memory storage for development and testing
///
/// Implements every repository trait itself, so one instance doubles as
/// the [`RepositoryProvider`].
pub struct InMemoryStorage {
    hotels: DashMap<i32, Hotel>,
    rooms: DashMap<i32, Room>,
    clients: DashMap<i32, Client>,
    bookings: DashMap<i32, Booking>,
    reviews: DashMap<i32, Review>,
    counter: AtomicI32,
    /// Serializes booking check-and-write
    booking_lock: Mutex<()>,
    /// Serializes review insert against the (client, hotel) uniqueness rule
    review_lock: Mutex<()>,
    /// Serializes client and room writes against login and room-number
    /// uniqueness
    unique_lock: Mutex<()>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            hotels: DashMap::new(),
            rooms: DashMap::new(),
            clients: DashMap::new(),
            bookings: DashMap::new(),
            reviews: DashMap::new(),
            counter: AtomicI32::new(1),
            booking_lock: Mutex::new(()),
            review_lock: Mutex::new(()),
            unique_lock: Mutex::new(()),
        }
    }

    fn next_id(&self) -> i32 {
        self.counter.fetch_add(1, Ordering::SeqCst)
    }

    fn room_bookings(&self, room_id: i32) -> Vec<Booking> {
        let mut out: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.room_id == room_id)
            .map(|b| b.clone())
            .collect();
        out.sort_by_key(|b| (b.start_date, b.id));
        out
    }

    fn check_login_free(&self, login: &str, except: Option<i32>) -> DomainResult<()> {
        let taken = self
            .clients
            .iter()
            .any(|c| c.login == login && Some(c.id) != except);
        if taken {
            return Err(DomainError::Storage(format!("login {} already exists", login)));
        }
        Ok(())
    }

    fn check_number_free(&self, hotel_id: i32, number: i32, except: Option<i32>) -> DomainResult<()> {
        let taken = self
            .rooms
            .iter()
            .any(|r| r.hotel_id == hotel_id && r.number == number && Some(r.id) != except);
        if taken {
            return Err(DomainError::Storage(format!(
                "room {} already exists in hotel {}",
                number, hotel_id
            )));
        }
        Ok(())
    }

    fn remove_room_cascade(&self, room_id: i32) -> bool {
        self.bookings.retain(|_, b| b.room_id != room_id);
        self.rooms.remove(&room_id).is_some()
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn missing(entity: &str, id: i32) -> DomainError {
    DomainError::Storage(format!("{} {} does not exist", entity, id))
}

#[async_trait]
impl HotelRepository for InMemoryStorage {
    async fn insert(&self, draft: HotelDraft) -> DomainResult<Hotel> {
        let hotel = Hotel {
            id: self.next_id(),
            name: draft.name,
            address: draft.address,
            description: draft.description,
        };
        self.hotels.insert(hotel.id, hotel.clone());
        Ok(hotel)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Hotel>> {
        Ok(self.hotels.get(&id).map(|h| h.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Hotel>> {
        let mut hotels: Vec<Hotel> = self.hotels.iter().map(|h| h.value().clone()).collect();
        hotels.sort_by_key(|h| h.id);
        Ok(hotels)
    }

    async fn update(&self, hotel: Hotel) -> DomainResult<Hotel> {
        let mut slot = self.hotels.get_mut(&hotel.id).ok_or_else(|| missing("hotel", hotel.id))?;
        *slot = hotel.clone();
        Ok(hotel)
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let room_ids: Vec<i32> = self
            .rooms
            .iter()
            .filter(|r| r.hotel_id == id)
            .map(|r| r.id)
            .collect();
        for room_id in room_ids {
            self.remove_room_cascade(room_id);
        }
        self.reviews.retain(|_, r| r.hotel_id != id);
        Ok(self.hotels.remove(&id).is_some())
    }
}

#[async_trait]
impl RoomRepository for InMemoryStorage {
    async fn insert(&self, room: NewRoom) -> DomainResult<Room> {
        let _guard = self.unique_lock.lock().await;
        self.check_number_free(room.hotel_id, room.number, None)?;

        let room = Room {
            id: self.next_id(),
            hotel_id: room.hotel_id,
            number: room.number,
            room_type: room.room_type,
            price: room.price,
        };
        self.rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        Ok(self.rooms.get(&id).map(|r| r.clone()))
    }

    async fn find_by_hotel(&self, hotel_id: i32) -> DomainResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self
            .rooms
            .iter()
            .filter(|r| r.hotel_id == hotel_id)
            .map(|r| r.clone())
            .collect();
        rooms.sort_by_key(|r| r.number);
        Ok(rooms)
    }

    async fn find_by_hotel_and_number(
        &self,
        hotel_id: i32,
        number: i32,
    ) -> DomainResult<Option<Room>> {
        Ok(self
            .rooms
            .iter()
            .find(|r| r.hotel_id == hotel_id && r.number == number)
            .map(|r| r.clone()))
    }

    async fn update(&self, room: Room) -> DomainResult<Room> {
        let _guard = self.unique_lock.lock().await;
        self.check_number_free(room.hotel_id, room.number, Some(room.id))?;

        let mut slot = self.rooms.get_mut(&room.id).ok_or_else(|| missing("room", room.id))?;
        *slot = room.clone();
        Ok(room)
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        Ok(self.remove_room_cascade(id))
    }
}

#[async_trait]
impl ClientRepository for InMemoryStorage {
    async fn insert(&self, client: NewClient) -> DomainResult<Client> {
        let _guard = self.unique_lock.lock().await;
        self.check_login_free(&client.login, None)?;

        let client = Client {
            id: self.next_id(),
            login: client.login,
            password_hash: client.password_hash,
            name: client.name,
            roles: client.roles,
        };
        self.clients.insert(client.id, client.clone());
        Ok(client)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Client>> {
        Ok(self.clients.get(&id).map(|c| c.clone()))
    }

    async fn find_by_login(&self, login: &str) -> DomainResult<Option<Client>> {
        Ok(self
            .clients
            .iter()
            .find(|c| c.login == login)
            .map(|c| c.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Client>> {
        let mut clients: Vec<Client> = self.clients.iter().map(|c| c.value().clone()).collect();
        clients.sort_by_key(|c| c.id);
        Ok(clients)
    }

    async fn update(&self, client: Client) -> DomainResult<Client> {
        let _guard = self.unique_lock.lock().await;
        self.check_login_free(&client.login, Some(client.id))?;

        let mut slot = self
            .clients
            .get_mut(&client.id)
            .ok_or_else(|| missing("client", client.id))?;
        *slot = client.clone();
        Ok(client)
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        self.bookings.retain(|_, b| b.client_id != id);
        self.reviews.retain(|_, r| r.client_id != id);
        Ok(self.clients.remove(&id).is_some())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.clients.len() as u64)
    }
}

#[async_trait]
impl BookingRepository for InMemoryStorage {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(&id).map(|b| b.clone()))
    }

    async fn find_by_room(&self, room_id: i32) -> DomainResult<Vec<Booking>> {
        Ok(self.room_bookings(room_id))
    }

    async fn find_by_rooms(&self, room_ids: &[i32]) -> DomainResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| room_ids.contains(&b.room_id))
            .map(|b| b.clone())
            .collect())
    }

    async fn find_by_client(&self, client_id: i32) -> DomainResult<Vec<Booking>> {
        let mut out: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.client_id == client_id)
            .map(|b| b.clone())
            .collect();
        out.sort_by_key(|b| (b.start_date, b.id));
        Ok(out)
    }

    async fn count_active_for_rooms(
        &self,
        room_ids: &[i32],
        today: NaiveDate,
    ) -> DomainResult<u64> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| room_ids.contains(&b.room_id) && b.is_active(today))
            .count() as u64)
    }

    async fn insert_if_free(&self, new: NewBooking) -> DomainResult<BookingWrite> {
        let _guard = self.booking_lock.lock().await;

        let existing = self.room_bookings(new.room_id);
        if let Some(conflict) = booking::first_conflict(&existing, &new.range(), None) {
            return Ok(BookingWrite::Overlaps {
                existing_id: conflict.id,
            });
        }

        let stored = Booking {
            id: self.next_id(),
            room_id: new.room_id,
            client_id: new.client_id,
            start_date: new.start_date,
            end_date: new.end_date,
        };
        self.bookings.insert(stored.id, stored.clone());
        Ok(BookingWrite::Stored(stored))
    }

    async fn update_if_free(&self, updated: Booking) -> DomainResult<BookingWrite> {
        let _guard = self.booking_lock.lock().await;

        let existing = self.room_bookings(updated.room_id);
        if let Some(conflict) =
            booking::first_conflict(&existing, &updated.range(), Some(updated.id))
        {
            return Ok(BookingWrite::Overlaps {
                existing_id: conflict.id,
            });
        }

        let mut slot = self
            .bookings
            .get_mut(&updated.id)
            .ok_or_else(|| missing("booking", updated.id))?;
        *slot = updated.clone();
        Ok(BookingWrite::Stored(updated))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        Ok(self.bookings.remove(&id).is_some())
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStorage {
    async fn insert(&self, review: NewReview) -> DomainResult<Option<Review>> {
        let _guard = self.review_lock.lock().await;

        let taken = self
            .reviews
            .iter()
            .any(|r| r.client_id == review.client_id && r.hotel_id == review.hotel_id);
        if taken {
            return Ok(None);
        }

        let review = Review {
            id: self.next_id(),
            client_id: review.client_id,
            hotel_id: review.hotel_id,
            rating: review.rating,
            text: review.text,
            created_at: review.created_at,
        };
        self.reviews.insert(review.id, review.clone());
        Ok(Some(review))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Review>> {
        Ok(self.reviews.get(&id).map(|r| r.clone()))
    }

    async fn find_by_hotel(&self, hotel_id: i32) -> DomainResult<Vec<Review>> {
        let mut out: Vec<Review> = self
            .reviews
            .iter()
            .filter(|r| r.hotel_id == hotel_id)
            .map(|r| r.clone())
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(out)
    }

    async fn find_by_client_and_hotel(
        &self,
        client_id: i32,
        hotel_id: i32,
    ) -> DomainResult<Option<Review>> {
        Ok(self
            .reviews
            .iter()
            .find(|r| r.client_id == client_id && r.hotel_id == hotel_id)
            .map(|r| r.clone()))
    }

    async fn update(&self, review: Review) -> DomainResult<Review> {
        let mut slot = self
            .reviews
            .get_mut(&review.id)
            .ok_or_else(|| missing("review", review.id))?;
        *slot = review.clone();
        Ok(review)
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        Ok(self.reviews.remove(&id).is_some())
    }
}

#[async_trait]
impl RepositoryProvider for InMemoryStorage {
    fn hotels(&self) -> &dyn HotelRepository {
        self
    }

    fn rooms(&self) -> &dyn RoomRepository {
        self
    }

    fn clients(&self) -> &dyn ClientRepository {
        self
    }

    fn bookings(&self) -> &dyn BookingRepository {
        self
    }

    fn reviews(&self) -> &dyn ReviewRepository {
        self
    }

    async fn ping(&self) -> DomainResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::{DateRange, Role, RoomDraft};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2031, 5, day).unwrap()
    }

    async fn seeded() -> (InMemoryStorage, Hotel, Room, Client) {
        let store = InMemoryStorage::new();
        let hotel = store
            .hotels()
            .insert(HotelDraft {
                name: "Alpine".into(),
                address: "Ridge 4".into(),
                description: Some("Ski-in".into()),
            })
            .await
            .unwrap();
        let room = store
            .rooms()
            .insert(NewRoom::new(
                hotel.id,
                RoomDraft {
                    number: 7,
                    room_type: "single".into(),
                    price: Decimal::new(45, 0),
                },
            ))
            .await
            .unwrap();
        let client = store
            .clients()
            .insert(NewClient {
                login: "skier".into(),
                password_hash: "x".into(),
                name: "Skier".into(),
                roles: BTreeSet::from([Role::User]),
            })
            .await
            .unwrap();
        (store, hotel, room, client)
    }

    #[tokio::test]
    async fn guarded_insert_refuses_overlap() {
        let (store, _, room, client) = seeded().await;
        let first = NewBooking::new(room.id, client.id, DateRange::new(d(1), d(5)).unwrap());
        let clash = NewBooking::new(room.id, client.id, DateRange::new(d(4), d(6)).unwrap());

        let BookingWrite::Stored(stored) = store.bookings().insert_if_free(first).await.unwrap()
        else {
            panic!("first booking must be stored");
        };
        assert_eq!(
            store.bookings().insert_if_free(clash).await.unwrap(),
            BookingWrite::Overlaps {
                existing_id: stored.id
            }
        );
    }

    #[tokio::test]
    async fn parallel_inserts_store_exactly_one() {
        let (store, _, room, client) = seeded().await;
        let store = Arc::new(store);
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            let new = NewBooking::new(room.id, client.id, DateRange::new(d(10), d(12)).unwrap());
            handles.push(tokio::spawn(async move {
                store.bookings().insert_if_free(new).await.unwrap()
            }));
        }
        let mut stored = 0;
        for handle in handles {
            if matches!(handle.await.unwrap(), BookingWrite::Stored(_)) {
                stored += 1;
            }
        }
        assert_eq!(stored, 1);
    }

    #[tokio::test]
    async fn deleting_hotel_cascades() {
        let (store, hotel, room, client) = seeded().await;
        store
            .bookings()
            .insert_if_free(NewBooking::new(room.id, client.id, DateRange::new(d(1), d(2)).unwrap()))
            .await
            .unwrap();
        store
            .reviews()
            .insert(NewReview {
                client_id: client.id,
                hotel_id: hotel.id,
                rating: 4,
                text: "Good".into(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        assert!(store.hotels().delete(hotel.id).await.unwrap());
        assert!(store.rooms().find_by_id(room.id).await.unwrap().is_none());
        assert!(store.bookings().find_by_client(client.id).await.unwrap().is_empty());
        assert!(store.reviews().find_by_hotel(hotel.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_review_is_not_stored() {
        let (store, hotel, _, client) = seeded().await;
        let review = || NewReview {
            client_id: client.id,
            hotel_id: hotel.id,
            rating: 5,
            text: "Great".into(),
            created_at: Utc::now(),
        };
        assert!(store.reviews().insert(review()).await.unwrap().is_some());
        assert!(store.reviews().insert(review()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn parallel_registrations_keep_login_unique() {
        let store = Arc::new(InMemoryStorage::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .clients()
                    .insert(NewClient {
                        login: "twin".into(),
                        password_hash: "x".into(),
                        name: "Twin".into(),
                        roles: BTreeSet::from([Role::User]),
                    })
                    .await
            }));
        }
        let mut stored = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                stored += 1;
            }
        }
        assert_eq!(stored, 1);
        assert_eq!(store.clients().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn renaming_onto_taken_login_fails() {
        let (store, _, _, skier) = seeded().await;
        let other = store
            .clients()
            .insert(NewClient {
                login: "boarder".into(),
                password_hash: "x".into(),
                name: "Boarder".into(),
                roles: BTreeSet::from([Role::User]),
            })
            .await
            .unwrap();

        let mut renamed = other.clone();
        renamed.login = skier.login.clone();
        assert!(matches!(
            store.clients().update(renamed).await,
            Err(DomainError::Storage(_))
        ));

        // keeping its own login is fine
        assert!(store.clients().update(other).await.is_ok());
    }

    #[tokio::test]
    async fn room_number_stays_unique_per_hotel() {
        let (store, hotel, room, _) = seeded().await;
        let duplicate = NewRoom::new(
            hotel.id,
            RoomDraft {
                number: room.number,
                room_type: "double".into(),
                price: Decimal::new(60, 0),
            },
        );
        assert!(matches!(
            store.rooms().insert(duplicate).await,
            Err(DomainError::Storage(_))
        ));
        assert!(store.rooms().update(room).await.is_ok());
    }
}
