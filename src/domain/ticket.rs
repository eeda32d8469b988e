//! Ticket and booking domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Seance, Seat};

/// A ticket, either a live booking (booked = true) or a released one
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i64,
    pub seance_id: i64,
    pub seat_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub user_phone: String,
    pub user_email: String,
    pub booked: bool,
    pub booking_code: String,
    /// Textual payload encoded into the QR code by clients
    pub qr_payload: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

/// Request to create a ticket directly (authenticated flow)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    pub seance_id: i64,
    pub seat_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub user_phone: String,
    pub user_email: String,
    pub price: f64,
}

/// Request to update a ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketRequest {
    pub seance_id: Option<i64>,
    pub seat_id: Option<i64>,
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub user_phone: Option<String>,
    pub user_email: Option<String>,
    pub price: Option<f64>,
    pub booked: Option<bool>,
}

/// Guest booking request: no account needed, one is created from the email
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub seance_id: i64,
    pub seat_id: i64,
    pub user_name: String,
    pub user_phone: String,
    pub user_email: String,
}

/// Everything the client needs to render the confirmation page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub ticket_id: i64,
    pub booking_code: String,
    pub seat: Seat,
    pub seance: Seance,
    pub price: f64,
    pub qr_payload: String,
}
