use axum::{extract::State, response::Json, Extension};
use serde_json::{json, Value};

use super::require_str;
use crate::database::models::User;
use crate::database::UserStore;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// POST /api/auth - Authenticate with email and password
///
/// Answers with a bearer token on success. An unknown email answers 401
/// and a wrong password 400, both with the same message so the response
/// does not reveal which part was wrong.
pub async fn login(State(state): State<AppState>, Json(payload): Json<Value>) -> ApiResult<Value> {
    let email = require_str(&payload, "email")?;
    let password = require_str(&payload, "password")?;

    let store = UserStore::new(state.pool().clone());
    let user = store
        .find_by_email(email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("invalid credentials"))?;

    if !bcrypt::verify(password, &user.password_hash)? {
        return Err(ApiError::bad_request("invalid credentials"));
    }

    let token = crate::auth::issue_token(user.id, &state.config().security.jwt_secret)?;

    Ok(ApiResponse::success(json!({ "token": token })))
}

/// GET /api/auth - Current authenticated user, password hash excluded
pub async fn current_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<User> {
    let store = UserStore::new(state.pool().clone());
    let user = store
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::bad_request("no user found"))?;

    Ok(ApiResponse::success(user))
}
