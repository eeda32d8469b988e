//! Seance API routes, including the schedule-overlap guard and seat
//! availability endpoint

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::booking::{self, Showing};
use crate::db::{self, SeanceFilter};
use crate::domain::{CreateSeanceRequest, Seance, SeatAvailability, UpdateSeanceRequest};

use super::{ApiResponse, AppError, AppState};

/// Create seance routes
pub fn seance_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_seances))
        .route("/", post(create_seance))
        .route("/:seance_id", get(get_seance))
        .route("/:seance_id", patch(update_seance))
        .route("/:seance_id", delete(delete_seance))
        .route("/:seance_id/available-seats", get(available_seats))
}

#[derive(Debug, Deserialize)]
pub struct ListSeancesQuery {
    pub hall_id: Option<i64>,
    pub film_id: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
}

async fn list_seances(
    State(state): State<AppState>,
    Query(query): Query<ListSeancesQuery>,
) -> Result<Json<ApiResponse<Vec<Seance>>>, AppError> {
    let filter = SeanceFilter {
        hall_id: query.hall_id,
        film_id: query.film_id,
        start_time: query.start_time,
    };

    let seances = db::list_seances(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::new(seances)))
}

async fn get_seance(
    State(state): State<AppState>,
    Path(seance_id): Path<i64>,
) -> Result<Json<ApiResponse<Seance>>, AppError> {
    let seance = db::get_seance(&state.pool, seance_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Seance {} not found", seance_id)))?;

    Ok(Json(ApiResponse::new(seance)))
}

async fn create_seance(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateSeanceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Seance>>), AppError> {
    auth.require_admin()?;

    db::get_hall(&state.pool, req.hall_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Hall {} not found", req.hall_id)))?;
    let film = db::get_film(&state.pool, req.film_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Film {} not found", req.film_id)))?;

    // Candidate id 0 never matches an existing seance, so nothing is skipped
    let candidate = Showing::new(0, req.start_time, film.duration_min);
    check_schedule(&state, req.hall_id, &candidate).await?;

    let seance = db::create_seance(&state.pool, &req).await?;
    tracing::info!(
        "Scheduled seance {} in hall {} at {}",
        seance.id,
        seance.hall_id,
        seance.start_time
    );
    Ok((StatusCode::CREATED, Json(ApiResponse::new(seance))))
}

async fn update_seance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(seance_id): Path<i64>,
    Json(req): Json<UpdateSeanceRequest>,
) -> Result<Json<ApiResponse<Seance>>, AppError> {
    auth.require_admin()?;

    let current = db::get_seance(&state.pool, seance_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Seance {} not found", seance_id)))?;

    // Re-validate the schedule with the merged values when anything that
    // moves the showing changed
    if req.hall_id.is_some() || req.film_id.is_some() || req.start_time.is_some() {
        let hall_id = req.hall_id.unwrap_or(current.hall_id);
        let film_id = req.film_id.unwrap_or(current.film_id);
        let start_time = req.start_time.unwrap_or(current.start_time);

        db::get_hall(&state.pool, hall_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Hall {} not found", hall_id)))?;
        let film = db::get_film(&state.pool, film_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Film {} not found", film_id)))?;

        let candidate = Showing::new(seance_id, start_time, film.duration_min);
        check_schedule(&state, hall_id, &candidate).await?;
    }

    let seance = db::update_seance(&state.pool, seance_id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Seance {} not found", seance_id)))?;

    Ok(Json(ApiResponse::new(seance)))
}

async fn delete_seance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(seance_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    auth.require_admin()?;

    let deleted = db::delete_seance(&state.pool, seance_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Seance {} not found", seance_id)))
    }
}

/// Seats still free for this seance: the hall's grid minus booked tickets
async fn available_seats(
    State(state): State<AppState>,
    Path(seance_id): Path<i64>,
) -> Result<Json<ApiResponse<SeatAvailability>>, AppError> {
    let seance = db::get_seance(&state.pool, seance_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Seance {} not found", seance_id)))?;

    let all_seats = db::list_hall_seats(&state.pool, seance.hall_id).await?;
    let booked = db::booked_seat_ids(&state.pool, seance_id).await?;

    let availability = booking::compute_availability(seance_id, all_seats, &booked);
    Ok(Json(ApiResponse::new(availability)))
}

/// Reject the candidate showing if it overlaps anything else in the hall
async fn check_schedule(
    state: &AppState,
    hall_id: i64,
    candidate: &Showing,
) -> Result<(), AppError> {
    let existing = db::list_hall_showings(&state.pool, hall_id).await?;
    if let Some(conflict) = booking::find_conflict(candidate, &existing) {
        return Err(AppError::ScheduleConflict(format!(
            "Hall {} is occupied by seance {} from {} to {}",
            hall_id, conflict.seance_id, conflict.start, conflict.end
        )));
    }
    Ok(())
}
