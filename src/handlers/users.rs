use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use super::require_str;
use crate::database::{StoreError, UserStore};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::avatar;
use crate::state::AppState;

/// POST /api/users - Register a new user account
///
/// Validates the payload, hashes the password, derives a gravatar-style
/// avatar from the email and answers with a signed bearer token. A second
/// registration with the same email answers 400.
///
/// Expected input:
/// ```json
/// { "name": "Ann", "email": "a@x.com", "password": "secret1" }
/// ```
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<Value> {
    let name = require_str(&payload, "name")?;
    let email = require_str(&payload, "email")?;
    let password = require_str(&payload, "password")?;

    if !email.contains('@') {
        return Err(ApiError::validation_error("please include a valid email"));
    }
    if password.len() < 6 {
        return Err(ApiError::validation_error(
            "please enter a password with 6 or more characters",
        ));
    }

    let avatar_url = avatar::gravatar_url(email);
    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;

    let store = UserStore::new(state.pool().clone());
    let user = match store
        .insert(name, email, &password_hash, Some(&avatar_url))
        .await
    {
        Ok(user) => user,
        Err(StoreError::Conflict(_)) => {
            return Err(ApiError::conflict("user already exists"));
        }
        Err(e) => return Err(e.into()),
    };

    let token = crate::auth::issue_token(user.id, &state.config().security.jwt_secret)?;

    Ok(ApiResponse::success(json!({ "token": token })))
}
