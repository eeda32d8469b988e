//! Ticket database operations

use std::collections::HashSet;

use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::{CreateTicketRequest, Ticket, UpdateTicketRequest};

/// Row type for the tickets table
#[derive(Debug, sqlx::FromRow)]
pub struct TicketRow {
    pub id: i64,
    pub seance_id: i64,
    pub seat_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub user_phone: String,
    pub user_email: String,
    pub booked: i64,
    pub booking_code: String,
    pub qr_payload: String,
    pub price: f64,
    pub created_at: String,
}

impl TicketRow {
    pub fn to_ticket(&self) -> Ticket {
        Ticket {
            id: self.id,
            seance_id: self.seance_id,
            seat_id: self.seat_id,
            user_id: self.user_id,
            user_name: self.user_name.clone(),
            user_phone: self.user_phone.clone(),
            user_email: self.user_email.clone(),
            booked: self.booked != 0,
            booking_code: self.booking_code.clone(),
            qr_payload: self.qr_payload.clone(),
            price: self.price,
            created_at: super::parse_timestamp(&self.created_at),
        }
    }
}

/// Get a ticket by ID
pub async fn get_ticket(pool: &SqlitePool, ticket_id: i64) -> Result<Option<Ticket>, sqlx::Error> {
    let row = sqlx::query_as::<_, TicketRow>("SELECT * FROM tickets WHERE id = ?")
        .bind(ticket_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.to_ticket()))
}

/// Filters for listing tickets
#[derive(Debug, Default)]
pub struct TicketFilter {
    pub seance_id: Option<i64>,
    pub seat_id: Option<i64>,
    pub user_id: Option<i64>,
    pub user_email: Option<String>,
    pub booked: Option<bool>,
}

/// List tickets matching the filter
pub async fn list_tickets(
    pool: &SqlitePool,
    filter: &TicketFilter,
) -> Result<Vec<Ticket>, sqlx::Error> {
    let mut sql = String::from("SELECT * FROM tickets WHERE 1=1");
    let mut bindings: Vec<String> = Vec::new();

    if let Some(seance_id) = filter.seance_id {
        sql.push_str(" AND seance_id = ?");
        bindings.push(seance_id.to_string());
    }
    if let Some(seat_id) = filter.seat_id {
        sql.push_str(" AND seat_id = ?");
        bindings.push(seat_id.to_string());
    }
    if let Some(user_id) = filter.user_id {
        sql.push_str(" AND user_id = ?");
        bindings.push(user_id.to_string());
    }
    if let Some(user_email) = &filter.user_email {
        sql.push_str(" AND user_email = ?");
        bindings.push(user_email.clone());
    }
    if let Some(booked) = filter.booked {
        sql.push_str(" AND booked = ?");
        bindings.push(if booked { "1" } else { "0" }.to_string());
    }

    sql.push_str(" ORDER BY created_at DESC");

    let mut q = sqlx::query_as::<_, TicketRow>(&sql);
    for binding in &bindings {
        q = q.bind(binding);
    }

    let rows = q.fetch_all(pool).await?;
    Ok(rows.into_iter().map(|r| r.to_ticket()).collect())
}

/// Create a ticket through the direct (non-booking) flow. Not marked booked,
/// so it does not occupy the seat.
pub async fn create_ticket(
    pool: &SqlitePool,
    req: &CreateTicketRequest,
    booking_code: &str,
    qr_payload: &str,
) -> Result<Ticket, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO tickets
            (seance_id, seat_id, user_id, user_name, user_phone, user_email,
             booked, booking_code, qr_payload, price, created_at)
        VALUES (?, ?, ?, ?, ?, ?, 0, ?, ?, ?, ?)
        "#,
    )
    .bind(req.seance_id)
    .bind(req.seat_id)
    .bind(req.user_id)
    .bind(&req.user_name)
    .bind(&req.user_phone)
    .bind(&req.user_email)
    .bind(booking_code)
    .bind(qr_payload)
    .bind(req.price)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    get_ticket(pool, result.last_insert_rowid())
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// All fields of a confirmed booking insert
#[derive(Debug)]
pub struct NewBooking<'a> {
    pub seance_id: i64,
    pub seat_id: i64,
    pub user_id: i64,
    pub user_name: &'a str,
    pub user_phone: &'a str,
    pub user_email: &'a str,
    pub booking_code: &'a str,
    pub qr_payload: &'a str,
    pub price: f64,
}

/// Insert a live booking (booked = 1). A concurrent booking of the same
/// (seance, seat) loses the race on the partial unique index and surfaces as
/// a unique-constraint database error.
pub async fn insert_booking(
    pool: &SqlitePool,
    booking: &NewBooking<'_>,
) -> Result<Ticket, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO tickets
            (seance_id, seat_id, user_id, user_name, user_phone, user_email,
             booked, booking_code, qr_payload, price, created_at)
        VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?, ?, ?)
        "#,
    )
    .bind(booking.seance_id)
    .bind(booking.seat_id)
    .bind(booking.user_id)
    .bind(booking.user_name)
    .bind(booking.user_phone)
    .bind(booking.user_email)
    .bind(booking.booking_code)
    .bind(booking.qr_payload)
    .bind(booking.price)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    get_ticket(pool, result.last_insert_rowid())
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Update a ticket
pub async fn update_ticket(
    pool: &SqlitePool,
    ticket_id: i64,
    req: &UpdateTicketRequest,
) -> Result<Option<Ticket>, sqlx::Error> {
    let mut updates = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(seance_id) = req.seance_id {
        updates.push("seance_id = ?");
        bindings.push(seance_id.to_string());
    }
    if let Some(seat_id) = req.seat_id {
        updates.push("seat_id = ?");
        bindings.push(seat_id.to_string());
    }
    if let Some(user_id) = req.user_id {
        updates.push("user_id = ?");
        bindings.push(user_id.to_string());
    }
    if let Some(user_name) = &req.user_name {
        updates.push("user_name = ?");
        bindings.push(user_name.clone());
    }
    if let Some(user_phone) = &req.user_phone {
        updates.push("user_phone = ?");
        bindings.push(user_phone.clone());
    }
    if let Some(user_email) = &req.user_email {
        updates.push("user_email = ?");
        bindings.push(user_email.clone());
    }
    if let Some(price) = req.price {
        updates.push("price = ?");
        bindings.push(price.to_string());
    }
    if let Some(booked) = req.booked {
        updates.push("booked = ?");
        bindings.push(if booked { "1" } else { "0" }.to_string());
    }

    if updates.is_empty() {
        return get_ticket(pool, ticket_id).await;
    }

    let query = format!("UPDATE tickets SET {} WHERE id = ?", updates.join(", "));

    let mut q = sqlx::query(&query);
    for binding in &bindings {
        q = q.bind(binding);
    }
    q = q.bind(ticket_id);
    q.execute(pool).await?;

    get_ticket(pool, ticket_id).await
}

/// Delete a ticket
pub async fn delete_ticket(pool: &SqlitePool, ticket_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tickets WHERE id = ?")
        .bind(ticket_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Seat ids with a live booking for the seance
pub async fn booked_seat_ids(
    pool: &SqlitePool,
    seance_id: i64,
) -> Result<HashSet<i64>, sqlx::Error> {
    #[derive(sqlx::FromRow)]
    struct SeatIdRow {
        seat_id: i64,
    }

    let rows = sqlx::query_as::<_, SeatIdRow>(
        "SELECT DISTINCT seat_id FROM tickets WHERE seance_id = ? AND booked = 1",
    )
    .bind(seance_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.seat_id).collect())
}

/// Is there already a live booking for this seat at this seance?
pub async fn has_booked_ticket(
    pool: &SqlitePool,
    seance_id: i64,
    seat_id: i64,
) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as(
        "SELECT id FROM tickets WHERE seance_id = ? AND seat_id = ? AND booked = 1",
    )
    .bind(seance_id)
    .bind(seat_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.is_some())
}

/// Is a booking code already taken?
pub async fn booking_code_exists(pool: &SqlitePool, code: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM tickets WHERE booking_code = ?")
        .bind(code)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}
