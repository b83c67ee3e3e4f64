use std::time::Instant;

use axum::Json;
use axum::extract::{DefaultBodyLimit, Path};
use axum::response::{IntoResponse, Response};
use axum::routing::put;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::db::repository;
use crate::dedup::Admission;
use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub const MSG_CREATED: &str = "Sala criada com sucesso";
pub const MSG_DUPLICATE: &str = "Sala já está sendo processada";
pub const MSG_UPDATED: &str = "Sala atualizada com sucesso";
pub const MSG_STATUS_UPDATED: &str = "Status atualizado com sucesso";
pub const MSG_DELETED: &str = "Sala excluída com sucesso";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/rooms", get(list_rooms).post(create_room))
        .route("/api/rooms/{id}", put(update_room).delete(delete_room))
        .route("/api/rooms/{id}/status", put(update_room_status))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<Room>>, AppError> {
    let rooms = repository::fetch_rooms(&state.db).await?;
    Ok(Json(rooms))
}

async fn create_room(
    State(state): State<AppState>,
    Json(req): Json<RoomPayload>,
) -> Result<Response, AppError> {
    let key = req
        .dedup_key()
        .map_err(|e| AppError::Internal(format!("failed to serialize request: {}", e)))?;

    if state.dedup.admit(&key, Instant::now()).await == Admission::Duplicate {
        info!("duplicate create ignored for room {:?}", req.sala_aula);
        return Ok((StatusCode::OK, Json(MessageResponse::new(MSG_DUPLICATE))).into_response());
    }

    let id = match repository::insert_room(&state.db, &req).await {
        Ok(id) => id,
        Err(e) => {
            state.dedup.release(&key).await;
            return Err(e.into());
        }
    };
    info!("created room {} ({:?})", id, req.sala_aula);

    let body = CreatedResponse {
        id,
        message: MSG_CREATED.to_string(),
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RoomPayload>,
) -> Result<Json<MessageResponse>, AppError> {
    let affected = repository::update_room(&state.db, id, &req).await?;
    debug!("update room {} touched {} row(s)", id, affected);
    Ok(Json(MessageResponse::new(MSG_UPDATED)))
}

async fn update_room_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<StatusPayload>,
) -> Result<Json<MessageResponse>, AppError> {
    let affected = repository::update_room_status(&state.db, id, req.status).await?;
    debug!("status of room {} set to {} ({} row(s))", id, req.status, affected);
    Ok(Json(MessageResponse::new(MSG_STATUS_UPDATED)))
}

async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let affected = repository::delete_room(&state.db, id).await?;
    debug!("delete room {} removed {} row(s)", id, affected);
    Ok(Json(MessageResponse::new(MSG_DELETED)))
}
