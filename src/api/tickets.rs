//! Ticket API routes and the guest booking flow

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Deserialize;

use crate::auth::{self, AuthUser};
use crate::booking;
use crate::db::{self, NewBooking, TicketFilter};
use crate::domain::{
    BookingConfirmation, BookingRequest, CreateTicketRequest, SeatType, Ticket,
    UpdateTicketRequest,
};

use super::{ApiResponse, AppError, AppState};

/// Create ticket routes
pub fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tickets))
        .route("/", post(create_ticket))
        .route("/booking", post(book_seat))
        .route("/:ticket_id", get(get_ticket))
        .route("/:ticket_id", patch(update_ticket))
        .route("/:ticket_id", delete(delete_ticket))
}

#[derive(Debug, Deserialize)]
pub struct ListTicketsQuery {
    pub seance_id: Option<i64>,
    pub seat_id: Option<i64>,
    pub user_id: Option<i64>,
    pub user_email: Option<String>,
    pub booked: Option<bool>,
}

async fn list_tickets(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListTicketsQuery>,
) -> Result<Json<ApiResponse<Vec<Ticket>>>, AppError> {
    auth.require_admin()?;

    let filter = TicketFilter {
        seance_id: query.seance_id,
        seat_id: query.seat_id,
        user_id: query.user_id,
        user_email: query.user_email,
        booked: query.booked,
    };

    let tickets = db::list_tickets(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::new(tickets)))
}

async fn get_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> Result<Json<ApiResponse<Ticket>>, AppError> {
    let ticket = db::get_ticket(&state.pool, ticket_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", ticket_id)))?;

    Ok(Json(ApiResponse::new(ticket)))
}

/// Direct ticket creation for authenticated callers. The ticket is not
/// marked booked; use the booking endpoint to occupy a seat.
async fn create_ticket(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Ticket>>), AppError> {
    db::get_seance(&state.pool, req.seance_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Seance {} not found", req.seance_id)))?;
    db::get_seat(&state.pool, req.seat_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Seat {} not found", req.seat_id)))?;
    db::get_user(&state.pool, req.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", req.user_id)))?;

    let code = unique_booking_code(&state).await?;
    let qr_payload = qr_payload_for(&code);

    let ticket = db::create_ticket(&state.pool, &req, &code, &qr_payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(ticket))))
}

async fn update_ticket(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(ticket_id): Path<i64>,
    Json(req): Json<UpdateTicketRequest>,
) -> Result<Json<ApiResponse<Ticket>>, AppError> {
    let ticket = db::update_ticket(&state.pool, ticket_id, &req)
        .await
        .map_err(booking_unique_violation)?
        .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", ticket_id)))?;

    Ok(Json(ApiResponse::new(ticket)))
}

async fn delete_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(ticket_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    auth.require_admin()?;

    let deleted = db::delete_ticket(&state.pool, ticket_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Ticket {} not found", ticket_id)))
    }
}

/// Book a seat for a guest.
///
/// Looks up the seance and seat, quotes the price, finds or creates the
/// guest account, and inserts the booked ticket. The partial unique index on
/// booked tickets is the last line of defense: two concurrent bookings of
/// the same seat cannot both land.
async fn book_seat(
    State(state): State<AppState>,
    Json(req): Json<BookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingConfirmation>>), AppError> {
    let seance = db::get_seance(&state.pool, req.seance_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Seance {} not found", req.seance_id)))?;
    let seat = db::get_seat(&state.pool, req.seat_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Seat {} not found", req.seat_id)))?;

    if seat.hall_id != seance.hall_id {
        return Err(AppError::BadRequest(format!(
            "Seat {} is not in hall {}",
            seat.id, seance.hall_id
        )));
    }

    if db::has_booked_ticket(&state.pool, seance.id, seat.id).await? {
        return Err(AppError::SeatTaken(format!(
            "Seat {} is already booked for seance {}",
            seat.id, seance.id
        )));
    }

    // Bookings charge the seance's own prices; the override table only
    // feeds the quote endpoint
    let price = match seat.seat_type {
        SeatType::Vip => seance.price_vip,
        SeatType::Standard => seance.price_standard,
    };

    let code = unique_booking_code(&state).await?;
    let qr_payload = qr_payload_for(&code);

    // Guests authenticate later with their booking code, never a password
    let guest_hash = auth::hash_password(&booking::generate_code(32))?;
    let user_id = db::find_or_create_guest(
        &state.pool,
        &req.user_name,
        &req.user_phone,
        &req.user_email,
        &guest_hash,
    )
    .await?;

    let new_booking = NewBooking {
        seance_id: seance.id,
        seat_id: seat.id,
        user_id,
        user_name: &req.user_name,
        user_phone: &req.user_phone,
        user_email: &req.user_email,
        booking_code: &code,
        qr_payload: &qr_payload,
        price,
    };

    let ticket = db::insert_booking(&state.pool, &new_booking)
        .await
        .map_err(booking_unique_violation)?;

    tracing::info!(
        "Booked seat {} for seance {} (ticket {}, code {})",
        seat.id,
        seance.id,
        ticket.id,
        ticket.booking_code
    );

    let confirmation = BookingConfirmation {
        ticket_id: ticket.id,
        booking_code: ticket.booking_code,
        seat,
        seance,
        price,
        qr_payload: ticket.qr_payload,
    };

    Ok((StatusCode::CREATED, Json(ApiResponse::new(confirmation))))
}

/// Generate a booking code not already in use. A collision gets one retry
/// with a longer code; two collisions in a row is effectively impossible.
async fn unique_booking_code(state: &AppState) -> Result<String, AppError> {
    let code = booking::generate_code(state.config.booking.code_length);
    if !db::booking_code_exists(&state.pool, &code).await? {
        return Ok(code);
    }

    let extended = booking::extend_code(&code);
    if db::booking_code_exists(&state.pool, &extended).await? {
        return Err(AppError::InternalError(
            "Could not generate a unique booking code".to_string(),
        ));
    }
    Ok(extended)
}

fn qr_payload_for(code: &str) -> String {
    format!("booking_code={}", code)
}

/// A unique-constraint failure on the booked-seat index means the seat was
/// taken between our check and the insert.
fn booking_unique_violation(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.message().contains("UNIQUE constraint") => {
            AppError::SeatTaken("Seat is already booked for this seance".to_string())
        }
        _ => err.into(),
    }
}
