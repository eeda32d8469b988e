//! Seance (screening) domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Seat;

/// A screening of a film in a hall at a given start time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seance {
    pub id: i64,
    pub hall_id: i64,
    pub film_id: i64,
    pub start_time: DateTime<Utc>,
    pub price_standard: f64,
    pub price_vip: f64,
}

/// Request to create a seance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSeanceRequest {
    pub hall_id: i64,
    pub film_id: i64,
    pub start_time: DateTime<Utc>,
    pub price_standard: f64,
    pub price_vip: f64,
}

/// Request to update a seance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSeanceRequest {
    pub hall_id: Option<i64>,
    pub film_id: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
    pub price_standard: Option<f64>,
    pub price_vip: Option<f64>,
}

/// Seat availability for a seance: all hall seats minus the booked set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAvailability {
    pub seance_id: i64,
    pub available_seats: Vec<Seat>,
    pub total_seats: i64,
    pub booked_seats: i64,
    pub available_count: i64,
}
