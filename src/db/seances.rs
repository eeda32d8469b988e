//! Seance database operations

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::booking::Showing;
use crate::domain::{CreateSeanceRequest, Seance, UpdateSeanceRequest};

/// Row type for the seances table
#[derive(Debug, sqlx::FromRow)]
pub struct SeanceRow {
    pub id: i64,
    pub hall_id: i64,
    pub film_id: i64,
    pub start_time: String,
    pub price_standard: f64,
    pub price_vip: f64,
}

impl SeanceRow {
    pub fn to_seance(&self) -> Seance {
        Seance {
            id: self.id,
            hall_id: self.hall_id,
            film_id: self.film_id,
            start_time: super::parse_timestamp(&self.start_time),
            price_standard: self.price_standard,
            price_vip: self.price_vip,
        }
    }
}

/// Get a seance by ID
pub async fn get_seance(pool: &SqlitePool, seance_id: i64) -> Result<Option<Seance>, sqlx::Error> {
    let row = sqlx::query_as::<_, SeanceRow>("SELECT * FROM seances WHERE id = ?")
        .bind(seance_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.to_seance()))
}

/// Filters for listing seances
#[derive(Debug, Default)]
pub struct SeanceFilter {
    pub hall_id: Option<i64>,
    pub film_id: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
}

/// List seances matching the filter
pub async fn list_seances(
    pool: &SqlitePool,
    filter: &SeanceFilter,
) -> Result<Vec<Seance>, sqlx::Error> {
    let mut sql = String::from("SELECT * FROM seances WHERE 1=1");
    let mut bindings: Vec<String> = Vec::new();

    if let Some(hall_id) = filter.hall_id {
        sql.push_str(" AND hall_id = ?");
        bindings.push(hall_id.to_string());
    }
    if let Some(film_id) = filter.film_id {
        sql.push_str(" AND film_id = ?");
        bindings.push(film_id.to_string());
    }
    if let Some(start_time) = filter.start_time {
        sql.push_str(" AND start_time = ?");
        bindings.push(start_time.to_rfc3339());
    }

    sql.push_str(" ORDER BY start_time");

    let mut q = sqlx::query_as::<_, SeanceRow>(&sql);
    for binding in &bindings {
        q = q.bind(binding);
    }

    let rows = q.fetch_all(pool).await?;
    Ok(rows.into_iter().map(|r| r.to_seance()).collect())
}

/// Create a new seance. Overlap validation happens in the API layer before
/// this insert.
pub async fn create_seance(
    pool: &SqlitePool,
    req: &CreateSeanceRequest,
) -> Result<Seance, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO seances (hall_id, film_id, start_time, price_standard, price_vip)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(req.hall_id)
    .bind(req.film_id)
    .bind(req.start_time.to_rfc3339())
    .bind(req.price_standard)
    .bind(req.price_vip)
    .execute(pool)
    .await?;

    get_seance(pool, result.last_insert_rowid())
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Update a seance
pub async fn update_seance(
    pool: &SqlitePool,
    seance_id: i64,
    req: &UpdateSeanceRequest,
) -> Result<Option<Seance>, sqlx::Error> {
    let mut updates = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(hall_id) = req.hall_id {
        updates.push("hall_id = ?");
        bindings.push(hall_id.to_string());
    }
    if let Some(film_id) = req.film_id {
        updates.push("film_id = ?");
        bindings.push(film_id.to_string());
    }
    if let Some(start_time) = req.start_time {
        updates.push("start_time = ?");
        bindings.push(start_time.to_rfc3339());
    }
    if let Some(price_standard) = req.price_standard {
        updates.push("price_standard = ?");
        bindings.push(price_standard.to_string());
    }
    if let Some(price_vip) = req.price_vip {
        updates.push("price_vip = ?");
        bindings.push(price_vip.to_string());
    }

    if updates.is_empty() {
        return get_seance(pool, seance_id).await;
    }

    let query = format!("UPDATE seances SET {} WHERE id = ?", updates.join(", "));

    let mut q = sqlx::query(&query);
    for binding in &bindings {
        q = q.bind(binding);
    }
    q = q.bind(seance_id);
    q.execute(pool).await?;

    get_seance(pool, seance_id).await
}

/// Delete a seance
pub async fn delete_seance(pool: &SqlitePool, seance_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM seances WHERE id = ?")
        .bind(seance_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Load the hall's schedule as showing intervals, joining each seance with
/// its film's running time
pub async fn list_hall_showings(
    pool: &SqlitePool,
    hall_id: i64,
) -> Result<Vec<Showing>, sqlx::Error> {
    #[derive(sqlx::FromRow)]
    struct ShowingRow {
        id: i64,
        start_time: String,
        duration_min: i64,
    }

    let rows = sqlx::query_as::<_, ShowingRow>(
        r#"
        SELECT s.id, s.start_time, f.duration_min
        FROM seances s
        JOIN films f ON f.id = s.film_id
        WHERE s.hall_id = ?
        "#,
    )
    .bind(hall_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| Showing::new(r.id, super::parse_timestamp(&r.start_time), r.duration_min))
        .collect())
}
