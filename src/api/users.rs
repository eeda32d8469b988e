//! User API routes: public registration and login, admin account management

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Deserialize;

use crate::auth::{self, AuthUser};
use crate::db::{self, UserFilter};
use crate::domain::{
    CreateUserRequest, LoginRequest, Role, SessionToken, UpdateUserRequest, User,
};

use super::{ApiResponse, AppError, AppState};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/", post(register_user))
        .route("/login", post(login))
        .route("/:user_id", get(get_user))
        .route("/:user_id", patch(update_user))
        .route("/:user_id", delete(delete_user))
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
}

async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ApiResponse<Vec<User>>>, AppError> {
    auth.require_admin()?;

    let filter = UserFilter {
        name: query.name,
        email: query.email,
        phone: query.phone,
        role: query.role,
    };

    let users = db::list_users(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::new(users)))
}

async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    auth.require_admin()?;

    let user = db::get_user(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    Ok(Json(ApiResponse::new(user)))
}

/// Open registration; everyone starts with the user role
async fn register_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    if !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    let hash = auth::hash_password(&req.password)?;
    let user = db::create_user(&state.pool, &req, &hash, Role::User).await?;
    tracing::info!("Registered user {} ({})", user.id, user.email);

    Ok((StatusCode::CREATED, Json(ApiResponse::new(user))))
}

/// Exchange credentials for a session token
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<SessionToken>>, AppError> {
    let row = db::get_user_auth(&state.pool, &req.email)
        .await?
        .filter(|row| auth::verify_password(&req.password, &row.password_hash))
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    // Opportunistic cleanup; expired tokens are also rejected at lookup
    let purged = db::purge_expired_tokens(&state.pool, state.config.auth.token_ttl_secs).await?;
    if purged > 0 {
        tracing::debug!("Purged {} expired tokens", purged);
    }

    let token = db::create_token(&state.pool, row.id).await?;
    tracing::info!("User {} logged in", row.id);

    Ok(Json(ApiResponse::new(token)))
}

async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    auth.require_admin()?;

    let password_hash = match &req.password {
        Some(password) => Some(auth::hash_password(password)?),
        None => None,
    };

    let user = db::update_user(&state.pool, user_id, &req, password_hash)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    Ok(Json(ApiResponse::new(user)))
}

async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    auth.require_admin()?;

    let deleted = db::delete_user(&state.pool, user_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("User {} not found", user_id)))
    }
}
