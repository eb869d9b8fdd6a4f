use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::application::{todo_service::TodoService, validation};
use crate::domain::todo_item::{TodoItemDto, TodoItemUpdateDto};
use crate::http::types::FieldErrors;

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/api/todoitems", get(list_todo_items::<S>).post(create_todo_item::<S>))
        .route(
            "/api/todoitems/:id",
            get(get_todo_item::<S>)
                .put(update_todo_item::<S>)
                .patch(patch_todo_item::<S>)
                .delete(delete_todo_item::<S>),
        )
        .with_state(state)
}

async fn list_todo_items<S: TodoService>(State(state): State<AppState<S>>) -> Result<Json<Vec<TodoItemDto>>, (StatusCode, String)> {
    let items = state.service.list().await.map_err(internal_error)?;
    Ok(Json(items))
}

async fn get_todo_item<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<i64>) -> Result<Json<TodoItemDto>, (StatusCode, String)> {
    match state.service.get(id).await.map_err(internal_error)? {
        Some(item) => Ok(Json(item)),
        None => Err((StatusCode::NOT_FOUND, String::new())),
    }
}

async fn create_todo_item<S: TodoService>(State(state): State<AppState<S>>, Json(payload): Json<TodoItemDto>) -> Result<Response, (StatusCode, String)> {
    let errors = validation::field_errors(&payload);
    if !errors.is_empty() {
        return Ok(FieldErrors(errors).into_response());
    }
    let Some(created) = state.service.create(payload).await.map_err(internal_error)? else {
        return Ok(StatusCode::BAD_REQUEST.into_response());
    };
    let location = format!("/api/todoitems/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)).into_response())
}

async fn update_todo_item<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<i64>, Json(payload): Json<TodoItemDto>) -> Result<StatusCode, (StatusCode, String)> {
    // Identity check happens before the service is consulted.
    if id != payload.id {
        return Err((StatusCode::BAD_REQUEST, String::new()));
    }
    let updated = state.service.update(id, payload).await.map_err(internal_error)?;
    if updated { Ok(StatusCode::NO_CONTENT) } else { Err((StatusCode::NOT_FOUND, String::new())) }
}

async fn patch_todo_item<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<i64>, Json(payload): Json<TodoItemUpdateDto>) -> Result<StatusCode, (StatusCode, String)> {
    if id != payload.id {
        return Err((StatusCode::BAD_REQUEST, String::new()));
    }
    let updated = state.service.partial_update(id, payload).await.map_err(internal_error)?;
    if updated { Ok(StatusCode::NO_CONTENT) } else { Err((StatusCode::NOT_FOUND, String::new())) }
}

async fn delete_todo_item<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<i64>) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = state.service.delete(id).await.map_err(internal_error)?;
    if deleted { Ok(StatusCode::NO_CONTENT) } else { Err((StatusCode::NOT_FOUND, String::new())) }
}

fn internal_error<E: std::fmt::Display>(e: E) -> (StatusCode, String) { (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", e)) }

#[cfg(test)]
mod tests {
    use super::{router, AppState};
    use crate::application::todo_service::TodoService;
    use crate::domain::todo_item::{TodoItemDto, TodoItemUpdateDto};
    use anyhow::Result;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    /// Fails the test if any operation is reached; proves a request was
    /// rejected before the service was consulted.
    #[derive(Clone)]
    struct UnreachableService;

    #[async_trait]
    impl TodoService for UnreachableService {
        async fn list(&self) -> Result<Vec<TodoItemDto>> { panic!("service must not be called") }
        async fn get(&self, _id: i64) -> Result<Option<TodoItemDto>> { panic!("service must not be called") }
        async fn create(&self, _dto: TodoItemDto) -> Result<Option<TodoItemDto>> { panic!("service must not be called") }
        async fn update(&self, _id: i64, _dto: TodoItemDto) -> Result<bool> { panic!("service must not be called") }
        async fn partial_update(&self, _id: i64, _patch: TodoItemUpdateDto) -> Result<bool> { panic!("service must not be called") }
        async fn delete(&self, _id: i64) -> Result<bool> { panic!("service must not be called") }
    }

    /// Reports absence from create; no other operation is reachable.
    #[derive(Clone)]
    struct AbsentCreateService;

    #[async_trait]
    impl TodoService for AbsentCreateService {
        async fn list(&self) -> Result<Vec<TodoItemDto>> { panic!("only create is expected") }
        async fn get(&self, _id: i64) -> Result<Option<TodoItemDto>> { panic!("only create is expected") }
        async fn create(&self, _dto: TodoItemDto) -> Result<Option<TodoItemDto>> { Ok(None) }
        async fn update(&self, _id: i64, _dto: TodoItemDto) -> Result<bool> { panic!("only create is expected") }
        async fn partial_update(&self, _id: i64, _patch: TodoItemUpdateDto) -> Result<bool> { panic!("only create is expected") }
        async fn delete(&self, _id: i64) -> Result<bool> { panic!("only create is expected") }
    }

    async fn send<S: TodoService + Clone + Send + Sync + 'static>(service: S, method: Method, path: &str, body: serde_json::Value) -> axum::http::Response<Body> {
        let app = router(AppState { service });
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        app.oneshot(req).await.unwrap()
    }

    #[tokio::test]
    async fn put_with_mismatched_ids_is_rejected_before_the_service() {
        let body = json!({ "id": 1, "name": "x", "isCompleted": false });
        let res = send(UnreachableService, Method::PUT, "/api/todoitems/100", body).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(to_bytes(res.into_body(), 1024).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn patch_with_mismatched_ids_is_rejected_before_the_service() {
        let body = json!({ "id": 1, "name": "x" });
        let res = send(UnreachableService, Method::PATCH, "/api/todoitems/100", body).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(to_bytes(res.into_body(), 1024).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn post_with_empty_name_returns_the_field_error_map() {
        let body = json!({ "id": 0, "name": "", "isCompleted": false });
        let res = send(UnreachableService, Method::POST, "/api/todoitems", body).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let errors: serde_json::Value = serde_json::from_slice(&to_bytes(res.into_body(), 1024).await.unwrap()).unwrap();
        assert_eq!(errors, json!({ "name": "Name field is required" }));
    }

    #[tokio::test]
    async fn post_maps_service_absence_to_bad_request() {
        let body = json!({ "id": 0, "name": "x", "isCompleted": false });
        let res = send(AbsentCreateService, Method::POST, "/api/todoitems", body).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(to_bytes(res.into_body(), 1024).await.unwrap().is_empty());
    }
}
