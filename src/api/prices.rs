//! Price override API routes and the per-seat quote endpoint

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::db;
use crate::domain::{CreatePriceRequest, Price, PriceQuote, SeatType, UpdatePriceRequest};

use super::{ApiResponse, AppError, AppState};

/// Create price routes
pub fn price_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_prices))
        .route("/", post(create_price))
        .route("/quote", get(quote_price))
        .route("/:price_id", get(get_price))
        .route("/:price_id", patch(update_price))
        .route("/:price_id", delete(delete_price))
}

#[derive(Debug, Deserialize)]
pub struct ListPricesQuery {
    pub seat_type: Option<SeatType>,
}

async fn list_prices(
    State(state): State<AppState>,
    Query(query): Query<ListPricesQuery>,
) -> Result<Json<ApiResponse<Vec<Price>>>, AppError> {
    let prices = db::list_prices(&state.pool, query.seat_type).await?;
    Ok(Json(ApiResponse::new(prices)))
}

async fn get_price(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(price_id): Path<i64>,
) -> Result<Json<ApiResponse<Price>>, AppError> {
    auth.require_admin()?;

    let price = db::get_price(&state.pool, price_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Price {} not found", price_id)))?;

    Ok(Json(ApiResponse::new(price)))
}

async fn create_price(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreatePriceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Price>>), AppError> {
    auth.require_admin()?;
    validate_price(Some(req.price))?;

    let price = db::create_price(&state.pool, &req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(price))))
}

async fn update_price(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(price_id): Path<i64>,
    Json(req): Json<UpdatePriceRequest>,
) -> Result<Json<ApiResponse<Price>>, AppError> {
    auth.require_admin()?;
    validate_price(req.price)?;

    let price = db::update_price(&state.pool, price_id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Price {} not found", price_id)))?;

    Ok(Json(ApiResponse::new(price)))
}

async fn delete_price(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(price_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    auth.require_admin()?;

    let deleted = db::delete_price(&state.pool, price_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Price {} not found", price_id)))
    }
}

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub seance_id: i64,
    pub seat_id: i64,
}

/// Quote the price of one seat at one seance. A seat-type override beats the
/// seance's own price.
async fn quote_price(
    State(state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<ApiResponse<PriceQuote>>, AppError> {
    let seance = db::get_seance(&state.pool, query.seance_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Seance {} not found", query.seance_id)))?;
    let seat = db::get_seat(&state.pool, query.seat_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Seat {} not found", query.seat_id)))?;

    if seat.hall_id != seance.hall_id {
        return Err(AppError::BadRequest(format!(
            "Seat {} is not in hall {}",
            seat.id, seance.hall_id
        )));
    }

    let price = resolve_seat_price(&state, &seance, seat.seat_type).await?;

    Ok(Json(ApiResponse::new(PriceQuote {
        seance_id: seance.id,
        seat_id: seat.id,
        seat_type: seat.seat_type,
        price,
    })))
}

/// Price for a seat type at a seance, preferring the override table
async fn resolve_seat_price(
    state: &AppState,
    seance: &crate::domain::Seance,
    seat_type: SeatType,
) -> Result<f64, AppError> {
    if let Some(price) = db::get_price_for_seat_type(&state.pool, seat_type).await? {
        return Ok(price.price);
    }

    Ok(match seat_type {
        SeatType::Standard => seance.price_standard,
        SeatType::Vip => seance.price_vip,
    })
}

fn validate_price(price: Option<f64>) -> Result<(), AppError> {
    if price.is_some_and(|p| p < 0.0) {
        return Err(AppError::BadRequest(
            "price must not be negative".to_string(),
        ));
    }
    Ok(())
}
