//! Seat database operations

use sqlx::SqlitePool;

use crate::domain::{CreateSeatRequest, Seat, SeatType, UpdateSeatRequest};

/// Row type for the seats table
#[derive(Debug, sqlx::FromRow)]
pub struct SeatRow {
    pub id: i64,
    pub hall_id: i64,
    pub row_number: i64,
    pub seat_number: i64,
    pub seat_type: String,
}

impl SeatRow {
    pub fn to_seat(&self) -> Seat {
        Seat {
            id: self.id,
            hall_id: self.hall_id,
            row_number: self.row_number,
            seat_number: self.seat_number,
            seat_type: self.seat_type.parse().unwrap_or(SeatType::Standard),
        }
    }
}

/// Get a seat by ID
pub async fn get_seat(pool: &SqlitePool, seat_id: i64) -> Result<Option<Seat>, sqlx::Error> {
    let row = sqlx::query_as::<_, SeatRow>("SELECT * FROM seats WHERE id = ?")
        .bind(seat_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.to_seat()))
}

/// Filters for listing seats
#[derive(Debug, Default)]
pub struct SeatFilter {
    pub hall_id: Option<i64>,
    pub row_number: Option<i64>,
    pub seat_number: Option<i64>,
    pub seat_type: Option<SeatType>,
}

/// List seats matching the filter
pub async fn list_seats(pool: &SqlitePool, filter: &SeatFilter) -> Result<Vec<Seat>, sqlx::Error> {
    let mut sql = String::from("SELECT * FROM seats WHERE 1=1");
    let mut bindings: Vec<String> = Vec::new();

    if let Some(hall_id) = filter.hall_id {
        sql.push_str(" AND hall_id = ?");
        bindings.push(hall_id.to_string());
    }
    if let Some(row_number) = filter.row_number {
        sql.push_str(" AND row_number = ?");
        bindings.push(row_number.to_string());
    }
    if let Some(seat_number) = filter.seat_number {
        sql.push_str(" AND seat_number = ?");
        bindings.push(seat_number.to_string());
    }
    if let Some(seat_type) = &filter.seat_type {
        sql.push_str(" AND seat_type = ?");
        bindings.push(seat_type.to_string());
    }

    sql.push_str(" ORDER BY row_number, seat_number");

    let mut q = sqlx::query_as::<_, SeatRow>(&sql);
    for binding in &bindings {
        q = q.bind(binding);
    }

    let rows = q.fetch_all(pool).await?;
    Ok(rows.into_iter().map(|r| r.to_seat()).collect())
}

/// Load every seat of a hall, for availability computation
pub async fn list_hall_seats(pool: &SqlitePool, hall_id: i64) -> Result<Vec<Seat>, sqlx::Error> {
    list_seats(
        pool,
        &SeatFilter {
            hall_id: Some(hall_id),
            ..Default::default()
        },
    )
    .await
}

/// Create a single seat
pub async fn create_seat(pool: &SqlitePool, req: &CreateSeatRequest) -> Result<Seat, sqlx::Error> {
    let seat_type = req.seat_type.unwrap_or(SeatType::Standard);

    let result = sqlx::query(
        "INSERT INTO seats (hall_id, row_number, seat_number, seat_type) VALUES (?, ?, ?, ?)",
    )
    .bind(req.hall_id)
    .bind(req.row_number)
    .bind(req.seat_number)
    .bind(seat_type.to_string())
    .execute(pool)
    .await?;

    get_seat(pool, result.last_insert_rowid())
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Update a seat
pub async fn update_seat(
    pool: &SqlitePool,
    seat_id: i64,
    req: &UpdateSeatRequest,
) -> Result<Option<Seat>, sqlx::Error> {
    let mut updates = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(hall_id) = req.hall_id {
        updates.push("hall_id = ?");
        bindings.push(hall_id.to_string());
    }
    if let Some(row_number) = req.row_number {
        updates.push("row_number = ?");
        bindings.push(row_number.to_string());
    }
    if let Some(seat_number) = req.seat_number {
        updates.push("seat_number = ?");
        bindings.push(seat_number.to_string());
    }
    if let Some(seat_type) = &req.seat_type {
        updates.push("seat_type = ?");
        bindings.push(seat_type.to_string());
    }

    if updates.is_empty() {
        return get_seat(pool, seat_id).await;
    }

    let query = format!("UPDATE seats SET {} WHERE id = ?", updates.join(", "));

    let mut q = sqlx::query(&query);
    for binding in &bindings {
        q = q.bind(binding);
    }
    q = q.bind(seat_id);
    q.execute(pool).await?;

    get_seat(pool, seat_id).await
}

/// Delete a seat
pub async fn delete_seat(pool: &SqlitePool, seat_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM seats WHERE id = ?")
        .bind(seat_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Replace a hall's seats with a fresh rows x seats_per_row grid. The last
/// `vip_back_rows` rows become VIP seats. Runs in one transaction so a failed
/// regeneration never leaves a half-empty hall.
pub async fn regenerate_hall_seats(
    pool: &SqlitePool,
    hall_id: i64,
    rows: i64,
    seats_per_row: i64,
    vip_back_rows: i64,
) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM seats WHERE hall_id = ?")
        .bind(hall_id)
        .execute(&mut *tx)
        .await?;

    let vip_from = rows - vip_back_rows + 1;
    let mut inserted = 0i64;
    for row in 1..=rows {
        let seat_type = if vip_back_rows > 0 && row >= vip_from {
            SeatType::Vip
        } else {
            SeatType::Standard
        };
        for seat in 1..=seats_per_row {
            sqlx::query(
                "INSERT INTO seats (hall_id, row_number, seat_number, seat_type) VALUES (?, ?, ?, ?)",
            )
            .bind(hall_id)
            .bind(row)
            .bind(seat)
            .bind(seat_type.to_string())
            .execute(&mut *tx)
            .await?;
            inserted += 1;
        }
    }

    tx.commit().await?;
    Ok(inserted)
}
