//! Success envelope for JSON endpoints.
//!
//! Successful responses carry their payload under a `data` key, mirroring
//! the `{ "error", "code" }` shape that [`crate::error::AppError`] produces
//! on failure. The storefront and dashboard clients branch on which key is
//! present, so handlers build their replies through [`DataResponse::json`]
//! rather than ad-hoc `json!` maps.

use axum::Json;
use serde::Serialize;

/// The `{ "data": T }` success envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    /// Wrap a payload ready to return from a handler.
    pub fn json(data: T) -> Json<Self> {
        Json(Self { data })
    }
}
