//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` works like `axum::Json<T>`, but additionally runs
//! `validator::Validate::validate()` on the deserialized value. Both a body
//! that does not parse and one that fails its constraints are rejected with
//! a `DomainError::Validation`, rendered as the usual 400 error body.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::application::ValidationService;
use crate::domain::DomainError;

/// An extractor that deserializes JSON and validates it.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct HotelRequest {
///     #[validate(length(min = 1, max = 100, code = "length"))]
///     name: String,
/// }
///
/// async fn handler(ValidatedJson(body): ValidatedJson<HotelRequest>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    Arc<ValidationService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = DomainError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let validation = Arc::<ValidationService>::from_ref(state);

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| validation.malformed_body(&rejection.body_text()))?;

        validation.check(&value)?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    use crate::shared::i18n::MessageCatalog;

    #[derive(Debug, Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct TestBody {
        #[validate(length(min = 1, max = 10, code = "length"))]
        room_type: String,
        #[validate(range(min = 1, max = 5, code = "range"))]
        rating: i32,
    }

    async fn handler(ValidatedJson(_body): ValidatedJson<TestBody>) -> &'static str {
        "ok"
    }

    fn app() -> Router {
        let messages = Arc::new(MessageCatalog::embedded("en").unwrap());
        Router::new()
            .route("/test", post(handler))
            .with_state(Arc::new(ValidationService::new(messages)))
    }

    async fn send(body: impl Into<Body>) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap();

        let resp = app().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let body = serde_json::json!({"roomType": "suite", "rating": 4});
        let (status, _) = send(serde_json::to_vec(&body).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_400() {
        let (status, body) = send("not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Malformed request body: "));
    }

    #[tokio::test]
    async fn validation_failure_lists_every_field() {
        let body = serde_json::json!({"roomType": "", "rating": 9});
        let (status, body) = send(serde_json::to_vec(&body).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "rating: must be between 1 and 5; \
             roomType: length must be between 1 and 10 characters"
        );
        assert!(body["timestamp"].is_i64());
    }
}
