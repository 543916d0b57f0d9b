//! Shared HTTP plumbing: the error body and the validating JSON extractor

pub mod error;
pub mod validated_json;

pub use error::{status_for, ApiResult, ErrorResponse};
pub use validated_json::ValidatedJson;
