//! Standard response envelope helpers.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Data<T> {
    pub data: T,
}

/// Wrap a payload in the `{"data": ...}` envelope (HTTP 200).
pub fn data<T: Serialize>(data: T) -> Json<Data<T>> {
    Json(Data { data })
}
