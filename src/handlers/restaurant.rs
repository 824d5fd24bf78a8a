//! Restaurant CRUD handlers: create, read, update, delete, list.

use crate::error::AppError;
use crate::model::{NewRestaurant, Paging, RestaurantUpdate};
use crate::response::data;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    Json,
};

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|e: std::num::ParseIntError| AppError::BadRequest(e.to_string()))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<NewRestaurant>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(new) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let created = state.store.create(new).await?;
    Ok(data(created))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    // A missing row answers with the zero-valued entity: the wire contract
    // has no not-found signal on reads.
    let row = state.store.get(id).await?.unwrap_or_default();
    Ok(data(row))
}

pub async fn list(
    State(state): State<AppState>,
    paging: Result<Query<Paging>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(paging) = paging.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let rows = state.store.list(paging.limit(), paging.offset()).await?;
    Ok(data(rows))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<RestaurantUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let Json(patch) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    // Zero rows affected is accepted: patching an absent id is a no-op.
    state.store.update(id, &patch).await?;
    Ok(data(patch))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    // Rows affected is not inspected: delete is idempotent.
    state.store.delete(id).await?;
    Ok(data(1))
}

#[cfg(test)]
mod tests {
    use crate::routes::{common_routes, restaurant_routes};
    use crate::state::AppState;
    use crate::store::MemoryStore;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState::new(Arc::new(MemoryStore::new()));
        Router::new()
            .merge(common_routes())
            .nest("/v1", restaurant_routes(state))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let request = match body {
            Some(raw) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(raw.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn seed(app: &Router, name: &str, address: &str) -> i64 {
        let body = json!({"name": name, "address": address}).to_string();
        let (status, value) = send(app, "POST", "/v1/restaurants", Some(&body)).await;
        assert_eq!(status, StatusCode::OK);
        value["data"]["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn create_assigns_id_and_reads_back() {
        let app = app();
        let id = seed(&app, "A", "B").await;
        assert!(id > 0);

        let (status, value) = send(&app, "GET", &format!("/v1/restaurants/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["data"], json!({"id": id, "name": "A", "address": "B"}));
    }

    #[tokio::test]
    async fn create_with_malformed_body_is_bad_request() {
        let app = app();
        let (status, value) = send(&app, "POST", "/v1/restaurants", Some("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!value["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_with_missing_field_is_bad_request() {
        let app = app();
        let (status, value) =
            send(&app, "POST", "/v1/restaurants", Some(r#"{"name":"A"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!value["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn patch_overwrites_only_present_fields() {
        let app = app();
        let id = seed(&app, "A", "B").await;

        let (status, value) = send(
            &app,
            "PATCH",
            &format!("/v1/restaurants/{}", id),
            Some(r#"{"address":"C"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        // The response echoes the patch, not the row.
        assert_eq!(value["data"], json!({"address": "C"}));

        let (_, value) = send(&app, "GET", &format!("/v1/restaurants/{}", id), None).await;
        assert_eq!(value["data"]["name"], "A");
        assert_eq!(value["data"]["address"], "C");
    }

    #[tokio::test]
    async fn patch_sets_empty_string() {
        let app = app();
        let id = seed(&app, "A", "B").await;

        let (status, _) = send(
            &app,
            "PATCH",
            &format!("/v1/restaurants/{}", id),
            Some(r#"{"name":""}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, value) = send(&app, "GET", &format!("/v1/restaurants/{}", id), None).await;
        assert_eq!(value["data"]["name"], "");
        assert_eq!(value["data"]["address"], "B");
    }

    #[tokio::test]
    async fn patch_treats_null_field_as_absent() {
        let app = app();
        let id = seed(&app, "A", "B").await;

        let (status, _) = send(
            &app,
            "PATCH",
            &format!("/v1/restaurants/{}", id),
            Some(r#"{"name":null,"address":"C"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, value) = send(&app, "GET", &format!("/v1/restaurants/{}", id), None).await;
        assert_eq!(value["data"]["name"], "A");
        assert_eq!(value["data"]["address"], "C");
    }

    #[tokio::test]
    async fn patch_of_missing_id_echoes_payload() {
        let app = app();
        let (status, value) = send(
            &app,
            "PATCH",
            "/v1/restaurants/4242",
            Some(r#"{"name":"ghost"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["data"], json!({"name": "ghost"}));
    }

    #[tokio::test]
    async fn list_pages_newest_first() {
        let app = app();
        for i in 1..=3 {
            seed(&app, &format!("r{}", i), "addr").await;
        }

        let (status, value) = send(&app, "GET", "/v1/restaurants?page=1&limit=2", None).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = value["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![3, 2]);

        let (_, value) = send(&app, "GET", "/v1/restaurants?page=2&limit=2", None).await;
        let ids: Vec<i64> = value["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn list_page_zero_equals_page_one() {
        let app = app();
        for i in 1..=3 {
            seed(&app, &format!("r{}", i), "addr").await;
        }
        let (_, at_zero) = send(&app, "GET", "/v1/restaurants?page=0&limit=2", None).await;
        let (_, at_one) = send(&app, "GET", "/v1/restaurants?page=1&limit=2", None).await;
        assert_eq!(at_zero, at_one);
    }

    #[tokio::test]
    async fn list_without_params_returns_everything_up_to_default_limit() {
        let app = app();
        for i in 1..=3 {
            seed(&app, &format!("r{}", i), "addr").await;
        }
        let (status, value) = send(&app, "GET", "/v1/restaurants", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn list_with_unparseable_page_is_bad_request() {
        let app = app();
        let (status, value) = send(&app, "GET", "/v1/restaurants?page=abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!value["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_reports_success_for_any_id() {
        let app = app();
        let id = seed(&app, "A", "B").await;

        let (status, value) = send(&app, "DELETE", &format!("/v1/restaurants/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["data"], 1);

        // Same response for an id that no longer exists.
        let (status, value) = send(&app, "DELETE", &format!("/v1/restaurants/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["data"], 1);
    }

    #[tokio::test]
    async fn read_of_missing_id_returns_zero_entity() {
        let app = app();
        let (status, value) = send(&app, "GET", "/v1/restaurants/999", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["data"], json!({"id": 0, "name": "", "address": ""}));
    }

    #[tokio::test]
    async fn non_integer_id_is_bad_request_on_every_id_route() {
        let app = app();
        for (method, body) in [
            ("GET", None),
            ("PATCH", Some(r#"{"name":"x"}"#)),
            ("DELETE", None),
        ] {
            let (status, value) = send(&app, method, "/v1/restaurants/abc", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} /abc", method);
            assert!(!value["error"].as_str().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn ping_pongs() {
        let app = app();
        let (status, value) = send(&app, "GET", "/ping", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, json!({"message": "pong"}));
    }

    #[tokio::test]
    async fn health_and_version_respond() {
        let app = app();
        let (status, value) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["status"], "ok");

        let (status, value) = send(&app, "GET", "/version", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["name"], env!("CARGO_PKG_NAME"));
    }
}
