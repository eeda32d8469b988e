//! Hall API routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::db;
use crate::domain::{CreateHallRequest, GenerateSeatsRequest, Hall, UpdateHallRequest};

use super::{ApiResponse, AppError, AppState};

/// Create hall routes
pub fn hall_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_halls))
        .route("/", post(create_hall))
        .route("/:hall_id", get(get_hall))
        .route("/:hall_id", patch(update_hall))
        .route("/:hall_id", delete(delete_hall))
        .route("/:hall_id/seats/generate", post(generate_seats))
}

#[derive(Debug, Deserialize)]
pub struct ListHallsQuery {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

async fn list_halls(
    State(state): State<AppState>,
    Query(query): Query<ListHallsQuery>,
) -> Result<Json<ApiResponse<Vec<Hall>>>, AppError> {
    let halls = db::list_halls(&state.pool, query.name.as_deref(), query.is_active).await?;
    Ok(Json(ApiResponse::new(halls)))
}

async fn get_hall(
    State(state): State<AppState>,
    Path(hall_id): Path<i64>,
) -> Result<Json<ApiResponse<Hall>>, AppError> {
    let hall = db::get_hall(&state.pool, hall_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Hall {} not found", hall_id)))?;

    Ok(Json(ApiResponse::new(hall)))
}

async fn create_hall(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateHallRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Hall>>), AppError> {
    auth.require_admin()?;
    validate_hall_dimensions(Some(req.rows), Some(req.seats_per_row))?;
    if req.name.len() < 3 {
        return Err(AppError::BadRequest(
            "Hall name must be at least 3 characters".to_string(),
        ));
    }

    let hall = db::create_hall(&state.pool, &req).await?;
    tracing::info!("Created hall {} ({})", hall.id, hall.name);
    Ok((StatusCode::CREATED, Json(ApiResponse::new(hall))))
}

async fn update_hall(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(hall_id): Path<i64>,
    Json(req): Json<UpdateHallRequest>,
) -> Result<Json<ApiResponse<Hall>>, AppError> {
    auth.require_admin()?;
    validate_hall_dimensions(req.rows, req.seats_per_row)?;

    let hall = db::update_hall(&state.pool, hall_id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Hall {} not found", hall_id)))?;

    Ok(Json(ApiResponse::new(hall)))
}

async fn delete_hall(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(hall_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    auth.require_admin()?;

    let deleted = db::delete_hall(&state.pool, hall_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Hall {} not found", hall_id)))
    }
}

/// Populate the hall's seat grid from its declared dimensions
async fn generate_seats(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(hall_id): Path<i64>,
    Json(req): Json<GenerateSeatsRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    auth.require_admin()?;

    let hall = db::get_hall(&state.pool, hall_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Hall {} not found", hall_id)))?;

    let vip_back_rows = req.vip_back_rows.unwrap_or(0);
    if vip_back_rows < 0 || vip_back_rows > hall.rows {
        return Err(AppError::BadRequest(format!(
            "vipBackRows must be between 0 and {}",
            hall.rows
        )));
    }

    let inserted =
        db::regenerate_hall_seats(&state.pool, hall.id, hall.rows, hall.seats_per_row, vip_back_rows)
            .await?;
    tracing::info!("Regenerated {} seats for hall {}", inserted, hall.id);

    Ok(Json(ApiResponse::new(serde_json::json!({
        "hallId": hall.id,
        "seatsCreated": inserted,
    }))))
}

fn validate_hall_dimensions(rows: Option<i64>, seats_per_row: Option<i64>) -> Result<(), AppError> {
    if rows.is_some_and(|r| r <= 0) {
        return Err(AppError::BadRequest("rows must be positive".to_string()));
    }
    if seats_per_row.is_some_and(|s| s <= 0) {
        return Err(AppError::BadRequest(
            "seatsPerRow must be positive".to_string(),
        ));
    }
    Ok(())
}
