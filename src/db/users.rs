//! User database operations

use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::{CreateUserRequest, Role, UpdateUserRequest, User};

/// Row type for the users table, password hash included
#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: String,
}

impl UserRow {
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            role: self.role.parse().unwrap_or(Role::User),
            created_at: super::parse_timestamp(&self.created_at),
        }
    }
}

/// Get a user by ID
pub async fn get_user(pool: &SqlitePool, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.to_user()))
}

/// Get the full user row by email, for credential checks
pub async fn get_user_auth(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Filters for listing users
#[derive(Debug, Default)]
pub struct UserFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
}

/// List users matching the filter
pub async fn list_users(pool: &SqlitePool, filter: &UserFilter) -> Result<Vec<User>, sqlx::Error> {
    let mut sql = String::from("SELECT * FROM users WHERE 1=1");
    let mut bindings: Vec<String> = Vec::new();

    if let Some(name) = &filter.name {
        sql.push_str(" AND name LIKE ?");
        bindings.push(format!("%{}%", name));
    }
    if let Some(email) = &filter.email {
        sql.push_str(" AND email LIKE ?");
        bindings.push(format!("%{}%", email));
    }
    if let Some(phone) = &filter.phone {
        sql.push_str(" AND phone LIKE ?");
        bindings.push(format!("%{}%", phone));
    }
    if let Some(role) = &filter.role {
        sql.push_str(" AND role = ?");
        bindings.push(role.to_string());
    }

    sql.push_str(" ORDER BY id");

    let mut q = sqlx::query_as::<_, UserRow>(&sql);
    for binding in &bindings {
        q = q.bind(binding);
    }

    let rows = q.fetch_all(pool).await?;
    Ok(rows.into_iter().map(|r| r.to_user()).collect())
}

/// Create a new user with an already-hashed password
pub async fn create_user(
    pool: &SqlitePool,
    req: &CreateUserRequest,
    password_hash: &str,
    role: Role,
) -> Result<User, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (name, phone, email, password_hash, role, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&req.name)
    .bind(&req.phone)
    .bind(&req.email)
    .bind(password_hash)
    .bind(role.to_string())
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    get_user(pool, result.last_insert_rowid())
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Update a user; `password_hash` replaces the stored hash when set
pub async fn update_user(
    pool: &SqlitePool,
    user_id: i64,
    req: &UpdateUserRequest,
    password_hash: Option<String>,
) -> Result<Option<User>, sqlx::Error> {
    let mut updates = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(name) = &req.name {
        updates.push("name = ?");
        bindings.push(name.clone());
    }
    if let Some(phone) = &req.phone {
        updates.push("phone = ?");
        bindings.push(phone.clone());
    }
    if let Some(email) = &req.email {
        updates.push("email = ?");
        bindings.push(email.clone());
    }
    if let Some(hash) = &password_hash {
        updates.push("password_hash = ?");
        bindings.push(hash.clone());
    }
    if let Some(role) = &req.role {
        updates.push("role = ?");
        bindings.push(role.to_string());
    }

    if updates.is_empty() {
        return get_user(pool, user_id).await;
    }

    let query = format!("UPDATE users SET {} WHERE id = ?", updates.join(", "));

    let mut q = sqlx::query(&query);
    for binding in &bindings {
        q = q.bind(binding);
    }
    q = q.bind(user_id);
    q.execute(pool).await?;

    get_user(pool, user_id).await
}

/// Delete a user
pub async fn delete_user(pool: &SqlitePool, user_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Find a user by email or create a guest account for the booking flow
pub async fn find_or_create_guest(
    pool: &SqlitePool,
    name: &str,
    phone: &str,
    email: &str,
    password_hash: &str,
) -> Result<i64, sqlx::Error> {
    if let Some(existing) = get_user_auth(pool, email).await? {
        return Ok(existing.id);
    }

    let result = sqlx::query(
        r#"
        INSERT INTO users (name, phone, email, password_hash, role, created_at)
        VALUES (?, ?, ?, ?, 'user', ?)
        "#,
    )
    .bind(name)
    .bind(phone)
    .bind(email)
    .bind(password_hash)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}
