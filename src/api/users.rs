//! Handlers de Users
//!
//! Gestión de cuentas, solo admin. El password se hashea con bcrypt antes
//! de persistir y nunca aparece en una response; el admin no puede borrar
//! su propia cuenta.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use bcrypt::{hash, DEFAULT_COST};
use serde_json::json;
use validator::Validate;

use crate::{
    middleware::auth::AuthenticatedUser,
    models::user::{CreateUserRequest, PublicUser, UpdateUserRequest, UserStatus},
    policy::{self, Action},
    repositories::user_repository::UserRepository,
    state::AppState,
    utils::errors::{conflict_error, not_found_error, AppError, AppResult},
    utils::validation::parse_id,
};

pub async fn list_users(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PublicUser>>> {
    policy::authorize(user.role, Action::ManageUsers)?;

    let users = UserRepository::new(state.pool.clone()).list().await?;
    Ok(Json(users))
}

pub async fn get_user(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<PublicUser>> {
    policy::authorize(user.role, Action::ManageUsers)?;
    let id = parse_id(&id)?;

    let record = UserRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found_error("User"))?;

    Ok(Json(record))
}

pub async fn create_user(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    policy::authorize(user.role, Action::ManageUsers)?;
    payload.validate().map_err(AppError::Validation)?;

    let repository = UserRepository::new(state.pool.clone());

    // Unicidad por match exacto de username
    if repository.find_by_username(&payload.username).await?.is_some() {
        return Err(conflict_error("User", "username"));
    }

    let password_hash = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

    let record = repository
        .create(
            payload.username,
            password_hash,
            payload.full_name,
            payload.role.as_str().to_string(),
            payload.department,
            payload.position,
            payload.status.unwrap_or(UserStatus::Active).as_str().to_string(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_user(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<PublicUser>> {
    policy::authorize(user.role, Action::ManageUsers)?;
    let id = parse_id(&id)?;
    payload.validate().map_err(AppError::Validation)?;

    let repository = UserRepository::new(state.pool.clone());

    if let Some(ref username) = payload.username {
        if let Some(existing) = repository.find_by_username(username).await? {
            if existing.id != id {
                return Err(conflict_error("User", "username"));
            }
        }
    }

    let password_hash = match payload.password {
        Some(ref password) => Some(
            hash(password, DEFAULT_COST)
                .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?,
        ),
        None => None,
    };

    let record = repository
        .update(
            id,
            payload.username,
            password_hash,
            payload.full_name,
            payload.role.map(|r| r.as_str().to_string()),
            payload.department,
            payload.position,
            payload.status.map(|s| s.as_str().to_string()),
        )
        .await?;

    Ok(Json(record))
}

pub async fn delete_user(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    policy::authorize(user.role, Action::ManageUsers)?;
    let id = parse_id(&id)?;

    if id == user.id {
        return Err(AppError::Unprocessable("Cannot delete your own account".to_string()));
    }

    UserRepository::new(state.pool.clone()).delete(id).await?;
    Ok(Json(json!({ "message": "Deleted successfully" })))
}
