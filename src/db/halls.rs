//! Hall database operations

use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::{CreateHallRequest, Hall, UpdateHallRequest};

/// Row type for the halls table
#[derive(Debug, sqlx::FromRow)]
pub struct HallRow {
    pub id: i64,
    pub name: String,
    pub rows: i64,
    pub seats_per_row: i64,
    pub is_active: i64,
    pub created_at: String,
}

impl HallRow {
    pub fn to_hall(&self) -> Hall {
        Hall {
            id: self.id,
            name: self.name.clone(),
            rows: self.rows,
            seats_per_row: self.seats_per_row,
            is_active: self.is_active != 0,
            created_at: super::parse_timestamp(&self.created_at),
        }
    }
}

/// Get a hall by ID
pub async fn get_hall(pool: &SqlitePool, hall_id: i64) -> Result<Option<Hall>, sqlx::Error> {
    let row = sqlx::query_as::<_, HallRow>("SELECT * FROM halls WHERE id = ?")
        .bind(hall_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.to_hall()))
}

/// List halls, optionally filtered by name substring and active flag
pub async fn list_halls(
    pool: &SqlitePool,
    name: Option<&str>,
    is_active: Option<bool>,
) -> Result<Vec<Hall>, sqlx::Error> {
    let mut sql = String::from("SELECT * FROM halls WHERE 1=1");
    let mut bindings: Vec<String> = Vec::new();

    if let Some(name) = name {
        sql.push_str(" AND name LIKE ?");
        bindings.push(format!("%{}%", name));
    }
    if let Some(is_active) = is_active {
        sql.push_str(" AND is_active = ?");
        bindings.push(if is_active { "1" } else { "0" }.to_string());
    }

    sql.push_str(" ORDER BY id");

    let mut q = sqlx::query_as::<_, HallRow>(&sql);
    for binding in &bindings {
        q = q.bind(binding);
    }

    let rows = q.fetch_all(pool).await?;
    Ok(rows.into_iter().map(|r| r.to_hall()).collect())
}

/// Create a new hall
pub async fn create_hall(pool: &SqlitePool, req: &CreateHallRequest) -> Result<Hall, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO halls (name, rows, seats_per_row, is_active, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&req.name)
    .bind(req.rows)
    .bind(req.seats_per_row)
    .bind(req.is_active.unwrap_or(false))
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    get_hall(pool, result.last_insert_rowid())
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Update a hall
pub async fn update_hall(
    pool: &SqlitePool,
    hall_id: i64,
    req: &UpdateHallRequest,
) -> Result<Option<Hall>, sqlx::Error> {
    let mut updates = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(name) = &req.name {
        updates.push("name = ?");
        bindings.push(name.clone());
    }
    if let Some(rows) = req.rows {
        updates.push("rows = ?");
        bindings.push(rows.to_string());
    }
    if let Some(seats_per_row) = req.seats_per_row {
        updates.push("seats_per_row = ?");
        bindings.push(seats_per_row.to_string());
    }
    if let Some(is_active) = req.is_active {
        updates.push("is_active = ?");
        bindings.push(if is_active { "1" } else { "0" }.to_string());
    }

    if updates.is_empty() {
        return get_hall(pool, hall_id).await;
    }

    let query = format!("UPDATE halls SET {} WHERE id = ?", updates.join(", "));

    let mut q = sqlx::query(&query);
    for binding in &bindings {
        q = q.bind(binding);
    }
    q = q.bind(hall_id);
    q.execute(pool).await?;

    get_hall(pool, hall_id).await
}

/// Delete a hall
pub async fn delete_hall(pool: &SqlitePool, hall_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM halls WHERE id = ?")
        .bind(hall_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;

    async fn setup_test_db() -> SqlitePool {
        init_database("sqlite::memory:").await.unwrap()
    }

    fn sample_request(name: &str) -> CreateHallRequest {
        CreateHallRequest {
            name: name.to_string(),
            rows: 10,
            seats_per_row: 12,
            is_active: None,
        }
    }

    #[tokio::test]
    async fn test_create_hall_defaults_inactive() {
        let pool = setup_test_db().await;

        let hall = create_hall(&pool, &sample_request("Red")).await.unwrap();

        assert_eq!(hall.name, "Red");
        assert_eq!(hall.rows, 10);
        assert!(!hall.is_active);
    }

    #[tokio::test]
    async fn test_duplicate_hall_name_rejected() {
        let pool = setup_test_db().await;

        create_hall(&pool, &sample_request("Red")).await.unwrap();
        let err = create_hall(&pool, &sample_request("Red")).await.unwrap_err();
        assert!(err.to_string().contains("UNIQUE"));
    }

    #[tokio::test]
    async fn test_list_halls_name_filter() {
        let pool = setup_test_db().await;

        create_hall(&pool, &sample_request("Red Hall")).await.unwrap();
        create_hall(&pool, &sample_request("Blue Hall")).await.unwrap();

        let halls = list_halls(&pool, Some("red"), None).await.unwrap();
        assert_eq!(halls.len(), 1);
        assert_eq!(halls[0].name, "Red Hall");
    }

    #[tokio::test]
    async fn test_list_halls_active_filter() {
        let pool = setup_test_db().await;

        create_hall(&pool, &sample_request("Closed")).await.unwrap();
        let mut active_req = sample_request("Open");
        active_req.is_active = Some(true);
        create_hall(&pool, &active_req).await.unwrap();

        let halls = list_halls(&pool, None, Some(true)).await.unwrap();
        assert_eq!(halls.len(), 1);
        assert_eq!(halls[0].name, "Open");
    }

    #[tokio::test]
    async fn test_update_hall_partial() {
        let pool = setup_test_db().await;

        let hall = create_hall(&pool, &sample_request("Old")).await.unwrap();

        let req = UpdateHallRequest {
            name: Some("New".to_string()),
            rows: None,
            seats_per_row: None,
            is_active: Some(true),
        };
        let updated = update_hall(&pool, hall.id, &req).await.unwrap().unwrap();

        assert_eq!(updated.name, "New");
        assert_eq!(updated.rows, 10);
        assert!(updated.is_active);
    }

    #[tokio::test]
    async fn test_delete_hall() {
        let pool = setup_test_db().await;

        let hall = create_hall(&pool, &sample_request("Gone")).await.unwrap();
        assert!(delete_hall(&pool, hall.id).await.unwrap());
        assert!(get_hall(&pool, hall.id).await.unwrap().is_none());
    }
}
