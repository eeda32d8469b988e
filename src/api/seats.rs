//! Seat API routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::db::{self, SeatFilter};
use crate::domain::{CreateSeatRequest, Seat, SeatType, UpdateSeatRequest};

use super::{ApiResponse, AppError, AppState};

/// Create seat routes
pub fn seat_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_seats))
        .route("/", post(create_seat))
        .route("/:seat_id", get(get_seat))
        .route("/:seat_id", patch(update_seat))
        .route("/:seat_id", delete(delete_seat))
}

#[derive(Debug, Deserialize)]
pub struct ListSeatsQuery {
    pub hall_id: Option<i64>,
    pub row_number: Option<i64>,
    pub seat_number: Option<i64>,
    pub seat_type: Option<SeatType>,
}

async fn list_seats(
    State(state): State<AppState>,
    Query(query): Query<ListSeatsQuery>,
) -> Result<Json<ApiResponse<Vec<Seat>>>, AppError> {
    let filter = SeatFilter {
        hall_id: query.hall_id,
        row_number: query.row_number,
        seat_number: query.seat_number,
        seat_type: query.seat_type,
    };

    let seats = db::list_seats(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::new(seats)))
}

async fn get_seat(
    State(state): State<AppState>,
    Path(seat_id): Path<i64>,
) -> Result<Json<ApiResponse<Seat>>, AppError> {
    let seat = db::get_seat(&state.pool, seat_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Seat {} not found", seat_id)))?;

    Ok(Json(ApiResponse::new(seat)))
}

async fn create_seat(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateSeatRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Seat>>), AppError> {
    auth.require_admin()?;

    // The hall must exist; foreign keys alone give an opaque 500
    db::get_hall(&state.pool, req.hall_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Hall {} not found", req.hall_id)))?;

    let seat = db::create_seat(&state.pool, &req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(seat))))
}

async fn update_seat(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(seat_id): Path<i64>,
    Json(req): Json<UpdateSeatRequest>,
) -> Result<Json<ApiResponse<Seat>>, AppError> {
    auth.require_admin()?;

    let seat = db::update_seat(&state.pool, seat_id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Seat {} not found", seat_id)))?;

    Ok(Json(ApiResponse::new(seat)))
}

async fn delete_seat(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(seat_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    auth.require_admin()?;

    let deleted = db::delete_seat(&state.pool, seat_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Seat {} not found", seat_id)))
    }
}
