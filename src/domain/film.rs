//! Film domain model

use serde::{Deserialize, Serialize};

/// A film that can be scheduled in seances
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Running time in minutes, used for seance overlap detection
    pub duration_min: i64,
    pub poster_url: Option<String>,
}

/// Request to create a film
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFilmRequest {
    pub title: String,
    pub description: Option<String>,
    pub duration_min: i64,
    pub poster_url: Option<String>,
}

/// Request to update a film
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFilmRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_min: Option<i64>,
    pub poster_url: Option<String>,
}
