//! Film API routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::db;
use crate::domain::{CreateFilmRequest, Film, UpdateFilmRequest};

use super::{ApiResponse, AppError, AppState};

/// Create film routes
pub fn film_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_films))
        .route("/", post(create_film))
        .route("/:film_id", get(get_film))
        .route("/:film_id", patch(update_film))
        .route("/:film_id", delete(delete_film))
}

#[derive(Debug, Deserialize)]
pub struct ListFilmsQuery {
    pub title: Option<String>,
}

async fn list_films(
    State(state): State<AppState>,
    Query(query): Query<ListFilmsQuery>,
) -> Result<Json<ApiResponse<Vec<Film>>>, AppError> {
    let films = db::list_films(&state.pool, query.title.as_deref()).await?;
    Ok(Json(ApiResponse::new(films)))
}

async fn get_film(
    State(state): State<AppState>,
    Path(film_id): Path<i64>,
) -> Result<Json<ApiResponse<Film>>, AppError> {
    let film = db::get_film(&state.pool, film_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Film {} not found", film_id)))?;

    Ok(Json(ApiResponse::new(film)))
}

async fn create_film(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFilmRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Film>>), AppError> {
    auth.require_admin()?;
    validate_duration(Some(req.duration_min))?;

    let film = db::create_film(&state.pool, &req).await?;
    tracing::info!("Created film {} ({})", film.id, film.title);
    Ok((StatusCode::CREATED, Json(ApiResponse::new(film))))
}

async fn update_film(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(film_id): Path<i64>,
    Json(req): Json<UpdateFilmRequest>,
) -> Result<Json<ApiResponse<Film>>, AppError> {
    auth.require_admin()?;
    validate_duration(req.duration_min)?;

    let film = db::update_film(&state.pool, film_id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Film {} not found", film_id)))?;

    Ok(Json(ApiResponse::new(film)))
}

async fn delete_film(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(film_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    auth.require_admin()?;

    let deleted = db::delete_film(&state.pool, film_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Film {} not found", film_id)))
    }
}

fn validate_duration(duration_min: Option<i64>) -> Result<(), AppError> {
    if duration_min.is_some_and(|d| d <= 0) {
        return Err(AppError::BadRequest(
            "durationMin must be positive".to_string(),
        ));
    }
    Ok(())
}
