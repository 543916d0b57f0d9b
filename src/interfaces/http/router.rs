//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{Services, ValidationService};
use crate::interfaces::http::common::ErrorResponse;
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{
    auth, bookings, clients, health, hotels, reviews, rooms,
};

/// State shared by every route. Handlers extract their own slice of it
/// through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub auth: AuthState,
    pub metrics: MetricsState,
    pub started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(services: Services, metrics: MetricsState) -> Self {
        let auth = AuthState {
            jwt_config: services.identity.jwt_config().clone(),
            repos: Arc::clone(&services.repos),
            messages: services.validation.messages().clone(),
        };
        Self {
            services,
            auth,
            metrics,
            started_at: Arc::new(Instant::now()),
        }
    }
}

impl FromRef<AppState> for Arc<ValidationService> {
    fn from_ref(s: &AppState) -> Self {
        Arc::clone(&s.services.validation)
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        s.auth.clone()
    }
}

impl FromRef<AppState> for MetricsState {
    fn from_ref(s: &AppState) -> Self {
        s.metrics.clone()
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            repos: Arc::clone(&s.services.repos),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<AppState> for auth::AuthHandlerState {
    fn from_ref(s: &AppState) -> Self {
        auth::AuthHandlerState {
            identity: Arc::clone(&s.services.identity),
        }
    }
}

impl FromRef<AppState> for hotels::HotelHandlerState {
    fn from_ref(s: &AppState) -> Self {
        hotels::HotelHandlerState {
            hotels: Arc::clone(&s.services.hotels),
        }
    }
}

impl FromRef<AppState> for rooms::RoomHandlerState {
    fn from_ref(s: &AppState) -> Self {
        rooms::RoomHandlerState {
            rooms: Arc::clone(&s.services.rooms),
            validation: Arc::clone(&s.services.validation),
        }
    }
}

impl FromRef<AppState> for clients::ClientHandlerState {
    fn from_ref(s: &AppState) -> Self {
        clients::ClientHandlerState {
            clients: Arc::clone(&s.services.clients),
        }
    }
}

impl FromRef<AppState> for bookings::BookingHandlerState {
    fn from_ref(s: &AppState) -> Self {
        bookings::BookingHandlerState {
            bookings: Arc::clone(&s.services.bookings),
            validation: Arc::clone(&s.services.validation),
        }
    }
}

impl FromRef<AppState> for reviews::ReviewHandlerState {
    fn from_ref(s: &AppState) -> Self {
        reviews::ReviewHandlerState {
            reviews: Arc::clone(&s.services.reviews),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        hotels::list_hotels,
        hotels::get_hotel,
        hotels::create_hotel,
        hotels::update_hotel,
        hotels::delete_hotel,
        rooms::get_room,
        rooms::list_rooms,
        rooms::available_rooms,
        rooms::booked_rooms,
        rooms::create_room,
        rooms::update_room,
        rooms::delete_room,
        clients::register,
        clients::list_clients,
        clients::get_client,
        clients::update_client,
        clients::delete_client,
        bookings::my_bookings,
        bookings::get_booking,
        bookings::room_bookings,
        bookings::create_booking,
        bookings::update_booking,
        bookings::delete_booking,
        reviews::get_review,
        reviews::hotel_reviews,
        reviews::create_review,
        reviews::update_review,
        reviews::delete_review,
    ),
    components(
        schemas(
            ErrorResponse,
            health::HealthResponse,
            health::ComponentHealth,
            auth::LoginRequest,
            auth::LoginResponse,
            hotels::HotelDto,
            hotels::HotelRequest,
            rooms::RoomDto,
            rooms::RoomRequest,
            rooms::RoomDateQuery,
            clients::ClientDto,
            clients::RegistrationRequest,
            clients::ClientUpdateRequest,
            bookings::BookingDto,
            bookings::BookingRequest,
            bookings::BookingUpdateRequest,
            reviews::ReviewDto,
            reviews::ReviewRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service and store health"),
        (name = "Authentication", description = "Login and JWT issuance"),
        (name = "Hotels", description = "Hotel catalogue; changes require ADMIN"),
        (name = "Rooms", description = "Rooms and availability for a date range"),
        (name = "Clients", description = "Registration and client accounts"),
        (name = "Bookings", description = "Room bookings over half-open date ranges"),
        (name = "Reviews", description = "One review per client and hotel"),
    ),
    info(
        title = "Hotel Booking API",
        version = "1.0.0",
        description = "REST API for hotels, rooms, clients, bookings and reviews",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(prometheus_metrics))
        .route("/auth/login", post(auth::login))
        .route("/clients/registration", post(clients::register));

    // Paths sharing a segment position must share the parameter name, so
    // hotel-scoped room and review routes are keyed by `{id}` too.
    let protected_routes = Router::new()
        .route("/hotels", get(hotels::list_hotels))
        .route("/hotels/new", post(hotels::create_hotel))
        .route(
            "/hotels/{id}",
            get(hotels::get_hotel)
                .patch(hotels::update_hotel)
                .delete(hotels::delete_hotel),
        )
        .route(
            "/rooms/allAvailableRoomsForGivenDate",
            put(rooms::available_rooms),
        )
        .route("/rooms/allBookedRoomsForGivenDate", put(rooms::booked_rooms))
        .route(
            "/rooms/{id}",
            get(rooms::get_room)
                .patch(rooms::update_room)
                .delete(rooms::delete_room),
        )
        .route("/rooms/{id}/allRooms", get(rooms::list_rooms))
        .route("/rooms/{id}/new", post(rooms::create_room))
        .route("/clients", get(clients::list_clients))
        .route(
            "/clients/{id}",
            get(clients::get_client)
                .patch(clients::update_client)
                .delete(clients::delete_client),
        )
        .route("/bookings/my", get(bookings::my_bookings))
        .route("/bookings/new", post(bookings::create_booking))
        .route("/bookings/room/{roomId}", get(bookings::room_bookings))
        .route(
            "/bookings/{id}",
            get(bookings::get_booking)
                .patch(bookings::update_booking)
                .delete(bookings::delete_booking),
        )
        .route("/reviews/hotel/{hotelId}", get(reviews::hotel_reviews))
        .route(
            "/reviews/{id}",
            get(reviews::get_review)
                .patch(reviews::update_review)
                .delete(reviews::delete_review),
        )
        .route("/reviews/{id}/new", post(reviews::create_review))
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::application::services::fixtures::Fixture;

    struct TestApp {
        router: Router,
        fixture: Fixture,
    }

    impl TestApp {
        async fn new() -> Self {
            let fixture = Fixture::new();
            fixture
                .services
                .clients
                .ensure_admin("root", "Root", "rootpass")
                .await
                .unwrap();
            let state = AppState::new(fixture.services.clone(), MetricsState::detached());
            Self {
                router: create_api_router(state),
                fixture,
            }
        }

        async fn call(
            &self,
            method: &str,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut req = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                req = req.header("authorization", format!("Bearer {}", token));
            }
            let req = match body {
                Some(body) => req
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap())),
                None => req.body(Body::empty()),
            }
            .unwrap();

            let resp = self.router.clone().oneshot(req).await.unwrap();
            let status = resp.status();
            let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
                .await
                .unwrap();
            let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, json)
        }

        async fn login(&self, login: &str, password: &str) -> String {
            let (status, body) = self
                .call(
                    "POST",
                    "/auth/login",
                    None,
                    Some(json!({"login": login, "password": password})),
                )
                .await;
            assert_eq!(status, StatusCode::OK, "{}", body);
            body["token"].as_str().unwrap().to_string()
        }

        async fn register(&self, login: &str) -> String {
            let (status, _) = self
                .call(
                    "POST",
                    "/clients/registration",
                    None,
                    Some(json!({"login": login, "password": "secret1", "name": "Guest"})),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
            self.login(login, "secret1").await
        }

        /// Hotel with one room; returns (hotel id, room id).
        async fn seed(&self, admin: &str) -> (i64, i64) {
            let (_, hotel) = self
                .call(
                    "POST",
                    "/hotels/new",
                    Some(admin),
                    Some(json!({"name": "Harbour View", "address": "12 Harbour St"})),
                )
                .await;
            let hotel_id = hotel["id"].as_i64().unwrap();
            let (status, room) = self
                .call(
                    "POST",
                    &format!("/rooms/{}/new", hotel_id),
                    Some(admin),
                    Some(json!({"number": 101, "roomType": "double", "price": "99.90"})),
                )
                .await;
            assert_eq!(status, StatusCode::OK, "{}", room);
            (hotel_id, room["id"].as_i64().unwrap())
        }

        fn day(&self, offset: i64) -> String {
            self.fixture.future(offset).format("%Y-%m-%d").to_string()
        }
    }

    #[tokio::test]
    async fn health_and_docs_are_public() {
        let app = TestApp::new().await;

        let (status, body) = app.call("GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"]["status"], "ok");

        let (status, body) = app.call("GET", "/api-doc/openapi.json", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/rooms/allAvailableRoomsForGivenDate"].is_object());
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let app = TestApp::new().await;

        let (status, body) = app.call("GET", "/hotels", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Authentication required");
        assert!(body["timestamp"].is_i64());

        let (status, _) = app.call("GET", "/hotels", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let app = TestApp::new().await;
        let (status, body) = app
            .call(
                "POST",
                "/auth/login",
                None,
                Some(json!({"login": "root", "password": "nope"})),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid login or password");
    }

    #[tokio::test]
    async fn registered_client_sees_own_profile_in_camel_case() {
        let app = TestApp::new().await;
        let token = app.register("alice").await;

        let (status, body) = app.call("GET", "/bookings/my", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, body) = app
            .call(
                "POST",
                "/auth/login",
                None,
                Some(json!({"login": "alice", "password": "secret1"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tokenType"], "Bearer");
        assert_eq!(body["client"]["roles"], json!(["USER"]));
        assert!(body["client"].get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn booking_flow_over_http() {
        let app = TestApp::new().await;
        let admin = app.login("root", "rootpass").await;
        let guest = app.register("bob").await;
        let (hotel_id, room_id) = app.seed(&admin).await;

        let (status, booking) = app
            .call(
                "POST",
                "/bookings/new",
                Some(&guest),
                Some(json!({"roomId": room_id, "start": app.day(10), "end": app.day(15)})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", booking);
        assert_eq!(booking["roomId"], room_id);
        assert_eq!(booking["startDate"], app.day(10));

        // adjacent range is free
        let (status, _) = app
            .call(
                "POST",
                "/bookings/new",
                Some(&guest),
                Some(json!({"roomId": room_id, "start": app.day(15), "end": app.day(17)})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = app
            .call(
                "POST",
                "/bookings/new",
                Some(&admin),
                Some(json!({"roomId": room_id, "start": app.day(12), "end": app.day(13)})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Room is already booked for the given dates");

        let query = json!({"hotelId": hotel_id, "start": app.day(11), "end": app.day(12)});
        let (_, available) = app
            .call(
                "PUT",
                "/rooms/allAvailableRoomsForGivenDate",
                Some(&guest),
                Some(query.clone()),
            )
            .await;
        assert_eq!(available, json!([]));
        let (_, booked) = app
            .call("PUT", "/rooms/allBookedRoomsForGivenDate", Some(&guest), Some(query))
            .await;
        assert_eq!(booked[0]["id"], room_id);
        assert_eq!(booked[0]["roomType"], "double");

        let (status, body) = app
            .call("DELETE", &format!("/rooms/{}", room_id), Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Room has active bookings and cannot be deleted");
    }

    #[tokio::test]
    async fn bad_dates_are_rejected_before_booking() {
        let app = TestApp::new().await;
        let guest = app.register("carol").await;

        let (status, body) = app
            .call(
                "POST",
                "/bookings/new",
                Some(&guest),
                Some(json!({"roomId": 1, "start": app.day(5), "end": app.day(5)})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "start: start date must be before end date");

        let (status, body) = app
            .call(
                "POST",
                "/bookings/new",
                Some(&guest),
                Some(json!({"roomId": 1, "start": "2030-13-01", "end": "2030-12-05"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Invalid date, expected format YYYY-MM-DD: 2030-13-01"
        );

        let (status, body) = app
            .call(
                "PUT",
                "/rooms/allAvailableRoomsForGivenDate",
                Some(&guest),
                Some(json!({"start": app.day(1), "end": app.day(2)})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "hotelId: must not be empty");
    }

    #[tokio::test]
    async fn missing_resources_are_bad_requests() {
        let app = TestApp::new().await;
        let admin = app.login("root", "rootpass").await;

        let (status, body) = app.call("GET", "/rooms/4242", Some(&admin), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Room not found");

        let (status, body) = app
            .call("GET", "/rooms/4242/allRooms", Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Hotel not found");
    }

    #[tokio::test]
    async fn non_admin_cannot_create_hotels() {
        let app = TestApp::new().await;
        let guest = app.register("dave").await;

        let (status, body) = app
            .call(
                "POST",
                "/hotels/new",
                Some(&guest),
                Some(json!({"name": "Nope", "address": "Nowhere"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Insufficient access rights to perform this action"
        );
    }

    #[tokio::test]
    async fn one_review_per_client_and_hotel() {
        let app = TestApp::new().await;
        let admin = app.login("root", "rootpass").await;
        let guest = app.register("erin").await;
        let (hotel_id, _) = app.seed(&admin).await;
        let uri = format!("/reviews/{}/new", hotel_id);

        let (status, review) = app
            .call("POST", &uri, Some(&guest), Some(json!({"rating": 5, "text": "Lovely"})))
            .await;
        assert_eq!(status, StatusCode::OK, "{}", review);
        assert_eq!(review["hotelId"], hotel_id);

        let (status, body) = app
            .call("POST", &uri, Some(&guest), Some(json!({"rating": 4, "text": "Again"})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Client has already reviewed this hotel");

        let (_, listed) = app
            .call("GET", &format!("/reviews/hotel/{}", hotel_id), Some(&guest), None)
            .await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn renamed_client_keeps_identity_and_old_login_is_not_inherited() {
        let app = TestApp::new().await;
        let admin = app.login("root", "rootpass").await;
        let (_, room_id) = app.seed(&admin).await;
        let anna = app.register("anna").await;
        let (_, me) = app
            .call(
                "POST",
                "/auth/login",
                None,
                Some(json!({"login": "anna", "password": "secret1"})),
            )
            .await;
        let anna_id = me["client"]["id"].as_i64().unwrap();

        let (_, booking) = app
            .call(
                "POST",
                "/bookings/new",
                Some(&anna),
                Some(json!({"roomId": room_id, "start": app.day(3), "end": app.day(6)})),
            )
            .await;
        let (status, renamed) = app
            .call(
                "PATCH",
                &format!("/clients/{}", anna_id),
                Some(&anna),
                Some(json!({"login": "anna.k", "name": "Anna K"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", renamed);
        assert_eq!(renamed["login"], "anna.k");

        // the token issued before the rename still manages her booking
        let (status, body) = app
            .call(
                "DELETE",
                &format!("/bookings/{}", booking["id"]),
                Some(&anna),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);

        // someone else takes the freed login
        app.register("anna").await;
        let (_, newcomer) = app
            .call(
                "POST",
                "/auth/login",
                None,
                Some(json!({"login": "anna", "password": "secret1"})),
            )
            .await;
        let newcomer_id = newcomer["client"]["id"].as_i64().unwrap();
        assert_ne!(newcomer_id, anna_id);

        let (status, body) = app
            .call("DELETE", &format!("/clients/{}", newcomer_id), Some(&anna), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Insufficient access rights to perform this action"
        );
        let (status, _) = app
            .call("GET", &format!("/clients/{}", newcomer_id), Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn token_stops_working_once_its_client_is_deleted() {
        let app = TestApp::new().await;
        let admin = app.login("root", "rootpass").await;
        let (_, room_id) = app.seed(&admin).await;
        let token = app.register("frank").await;
        let (_, me) = app
            .call(
                "POST",
                "/auth/login",
                None,
                Some(json!({"login": "frank", "password": "secret1"})),
            )
            .await;
        let frank_id = me["client"]["id"].as_i64().unwrap();

        let (status, _) = app
            .call("DELETE", &format!("/clients/{}", frank_id), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = app
            .call(
                "POST",
                "/bookings/new",
                Some(&token),
                Some(json!({"roomId": room_id, "start": app.day(1), "end": app.day(30)})),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid or expired token");

        let (status, _) = app.call("GET", "/bookings/my", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // room carries no orphaned booking
        let (status, body) = app
            .call("DELETE", &format!("/rooms/{}", room_id), Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
    }
}
