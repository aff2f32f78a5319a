use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from a verified bearer token
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Token authentication middleware. Reads the `x-auth-token` header,
/// verifies it against the configured secret, and injects [`AuthUser`]
/// into the request extensions for downstream handlers.
///
/// Failure answers 401 and is terminal for the request only.
pub async fn token_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("no token, authorization denied"))?;

    let user_id = auth::verify_token(&token, &state.config().security.jwt_secret)
        .map_err(|_| ApiError::unauthorized("token is not valid"))?;

    request.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(request).await)
}

fn extract_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("x-auth-token")?;
    let token = value.to_str().ok()?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
