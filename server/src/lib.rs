//! HTTP service for recording workout exercises.
//!
//! # Overview
//! Five routes under `/exercises` map onto an injected `ExerciseStore`.
//! Create and update bodies go through the same field rules before any store
//! call is made, so an invalid update is rejected even when the id is unknown.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;
pub mod validation;

use std::{future::Future, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    middleware,
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;

pub use config::{ConfigError, ServerConfig};
pub use error::ServiceError;
pub use model::{Exercise, ExerciseFields, Unit};
pub use store::{ExerciseStore, MemoryStore, SqliteStore, StoreError, StoreUrl};

pub type Db = Arc<dyn ExerciseStore>;

pub fn app(db: Db) -> Router {
    Router::new()
        .route("/exercises", get(list_exercises).post(create_exercise))
        .route(
            "/exercises/{id}",
            get(get_exercise).put(update_exercise).delete(delete_exercise),
        )
        .layer(middleware::from_fn(logging::request_tracing))
        .with_state(db)
}

pub async fn run(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app(db)).await
}

/// Serve until `shutdown` resolves, letting in-flight requests finish.
pub async fn run_until<F>(listener: TcpListener, db: Db, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(db))
        .with_graceful_shutdown(shutdown)
        .await
}

fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
}

async fn list_exercises(State(db): State<Db>) -> Result<Json<Vec<Exercise>>, ServiceError> {
    Ok(Json(db.find_all().await?))
}

async fn create_exercise(
    State(db): State<Db>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Exercise>), ServiceError> {
    let fields = validation::validate_body(content_type(&headers), &body)?;
    let exercise = db.insert(fields).await?;
    tracing::info!(id = %exercise.id, "exercise created");
    Ok((StatusCode::CREATED, Json(exercise)))
}

async fn get_exercise(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Exercise>, ServiceError> {
    db.find_by_id(&id)
        .await?
        .map(Json)
        .ok_or(ServiceError::NotFound)
}

async fn update_exercise(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Exercise>, ServiceError> {
    let fields = validation::validate_body(content_type(&headers), &body)?;
    let exercise = db
        .replace_fields(&id, fields)
        .await?
        .ok_or(ServiceError::NotFound)?;
    tracing::info!(id = %exercise.id, "exercise updated");
    Ok(Json(exercise))
}

async fn delete_exercise(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    match db.delete_by_id(&id).await? {
        0 => Err(ServiceError::NotFound),
        _ => {
            tracing::info!(id = %id, "exercise deleted");
            Ok(StatusCode::NO_CONTENT)
        }
    }
}
