//! Hall domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cinema hall with a rectangular seat grid
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hall {
    pub id: i64,
    pub name: String,
    pub rows: i64,
    pub seats_per_row: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Request to create a new hall
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHallRequest {
    pub name: String,
    pub rows: i64,
    pub seats_per_row: i64,
    pub is_active: Option<bool>,
}

/// Request to update a hall
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHallRequest {
    pub name: Option<String>,
    pub rows: Option<i64>,
    pub seats_per_row: Option<i64>,
    pub is_active: Option<bool>,
}

/// Request to (re)generate the seat grid for a hall
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSeatsRequest {
    /// Number of back rows to mark as VIP (0 = all standard)
    pub vip_back_rows: Option<i64>,
}
