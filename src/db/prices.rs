//! Price override database operations

use sqlx::SqlitePool;

use crate::domain::{CreatePriceRequest, Price, SeatType, UpdatePriceRequest};

/// Row type for the prices table
#[derive(Debug, sqlx::FromRow)]
pub struct PriceRow {
    pub id: i64,
    pub seat_type: String,
    pub price: f64,
}

impl PriceRow {
    pub fn to_price(&self) -> Price {
        Price {
            id: self.id,
            seat_type: self.seat_type.parse().unwrap_or(SeatType::Standard),
            price: self.price,
        }
    }
}

/// Get a price override by ID
pub async fn get_price(pool: &SqlitePool, price_id: i64) -> Result<Option<Price>, sqlx::Error> {
    let row = sqlx::query_as::<_, PriceRow>("SELECT * FROM prices WHERE id = ?")
        .bind(price_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.to_price()))
}

/// Get the override for a seat type, if any
pub async fn get_price_for_seat_type(
    pool: &SqlitePool,
    seat_type: SeatType,
) -> Result<Option<Price>, sqlx::Error> {
    let row = sqlx::query_as::<_, PriceRow>("SELECT * FROM prices WHERE seat_type = ?")
        .bind(seat_type.to_string())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.to_price()))
}

/// List price overrides, optionally filtered by seat type
pub async fn list_prices(
    pool: &SqlitePool,
    seat_type: Option<SeatType>,
) -> Result<Vec<Price>, sqlx::Error> {
    let mut sql = String::from("SELECT * FROM prices WHERE 1=1");
    let mut bindings: Vec<String> = Vec::new();

    if let Some(seat_type) = seat_type {
        sql.push_str(" AND seat_type = ?");
        bindings.push(seat_type.to_string());
    }

    sql.push_str(" ORDER BY id");

    let mut q = sqlx::query_as::<_, PriceRow>(&sql);
    for binding in &bindings {
        q = q.bind(binding);
    }

    let rows = q.fetch_all(pool).await?;
    Ok(rows.into_iter().map(|r| r.to_price()).collect())
}

/// Create a price override
pub async fn create_price(
    pool: &SqlitePool,
    req: &CreatePriceRequest,
) -> Result<Price, sqlx::Error> {
    let result = sqlx::query("INSERT INTO prices (seat_type, price) VALUES (?, ?)")
        .bind(req.seat_type.to_string())
        .bind(req.price)
        .execute(pool)
        .await?;

    get_price(pool, result.last_insert_rowid())
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Update a price override
pub async fn update_price(
    pool: &SqlitePool,
    price_id: i64,
    req: &UpdatePriceRequest,
) -> Result<Option<Price>, sqlx::Error> {
    let mut updates = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(seat_type) = &req.seat_type {
        updates.push("seat_type = ?");
        bindings.push(seat_type.to_string());
    }
    if let Some(price) = req.price {
        updates.push("price = ?");
        bindings.push(price.to_string());
    }

    if updates.is_empty() {
        return get_price(pool, price_id).await;
    }

    let query = format!("UPDATE prices SET {} WHERE id = ?", updates.join(", "));

    let mut q = sqlx::query(&query);
    for binding in &bindings {
        q = q.bind(binding);
    }
    q = q.bind(price_id);
    q.execute(pool).await?;

    get_price(pool, price_id).await
}

/// Delete a price override
pub async fn delete_price(pool: &SqlitePool, price_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM prices WHERE id = ?")
        .bind(price_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
