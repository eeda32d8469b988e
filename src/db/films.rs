//! Film database operations

use sqlx::SqlitePool;

use crate::domain::{CreateFilmRequest, Film, UpdateFilmRequest};

/// Row type for the films table
#[derive(Debug, sqlx::FromRow)]
pub struct FilmRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub duration_min: i64,
    pub poster_url: Option<String>,
}

impl FilmRow {
    pub fn to_film(&self) -> Film {
        Film {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            duration_min: self.duration_min,
            poster_url: self.poster_url.clone(),
        }
    }
}

/// Get a film by ID
pub async fn get_film(pool: &SqlitePool, film_id: i64) -> Result<Option<Film>, sqlx::Error> {
    let row = sqlx::query_as::<_, FilmRow>("SELECT * FROM films WHERE id = ?")
        .bind(film_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.to_film()))
}

/// List films, optionally filtered by title substring
pub async fn list_films(pool: &SqlitePool, title: Option<&str>) -> Result<Vec<Film>, sqlx::Error> {
    let mut sql = String::from("SELECT * FROM films WHERE 1=1");
    let mut bindings: Vec<String> = Vec::new();

    if let Some(title) = title {
        sql.push_str(" AND title LIKE ?");
        bindings.push(format!("%{}%", title));
    }

    sql.push_str(" ORDER BY id");

    let mut q = sqlx::query_as::<_, FilmRow>(&sql);
    for binding in &bindings {
        q = q.bind(binding);
    }

    let rows = q.fetch_all(pool).await?;
    Ok(rows.into_iter().map(|r| r.to_film()).collect())
}

/// Create a new film
pub async fn create_film(pool: &SqlitePool, req: &CreateFilmRequest) -> Result<Film, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO films (title, description, duration_min, poster_url) VALUES (?, ?, ?, ?)",
    )
    .bind(&req.title)
    .bind(&req.description)
    .bind(req.duration_min)
    .bind(&req.poster_url)
    .execute(pool)
    .await?;

    get_film(pool, result.last_insert_rowid())
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Update a film
pub async fn update_film(
    pool: &SqlitePool,
    film_id: i64,
    req: &UpdateFilmRequest,
) -> Result<Option<Film>, sqlx::Error> {
    let mut updates = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(title) = &req.title {
        updates.push("title = ?");
        bindings.push(title.clone());
    }
    if let Some(description) = &req.description {
        updates.push("description = ?");
        bindings.push(description.clone());
    }
    if let Some(duration_min) = req.duration_min {
        updates.push("duration_min = ?");
        bindings.push(duration_min.to_string());
    }
    if let Some(poster_url) = &req.poster_url {
        updates.push("poster_url = ?");
        bindings.push(poster_url.clone());
    }

    if updates.is_empty() {
        return get_film(pool, film_id).await;
    }

    let query = format!("UPDATE films SET {} WHERE id = ?", updates.join(", "));

    let mut q = sqlx::query(&query);
    for binding in &bindings {
        q = q.bind(binding);
    }
    q = q.bind(film_id);
    q.execute(pool).await?;

    get_film(pool, film_id).await
}

/// Delete a film
pub async fn delete_film(pool: &SqlitePool, film_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM films WHERE id = ?")
        .bind(film_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
