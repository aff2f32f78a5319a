use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use serde_json::{json, Value};
use uuid::Uuid;

use super::require_str;
use crate::database::models::{OwnerSnapshot, Profile, ProfileView};
use crate::database::{PostStore, ProfileStore, UserStore};
use crate::domain::profile_ops::{self, EducationPayload, ExperiencePayload, ProfilePayload};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::github;
use crate::state::AppState;

async fn fetch_profile(state: &AppState, user_id: Uuid) -> Result<Profile, ApiError> {
    ProfileStore::new(state.pool().clone())
        .find_by_user(user_id)
        .await?
        .ok_or_else(|| ApiError::bad_request("there is no profile for this user"))
}

async fn attach_owner(state: &AppState, profile: Profile) -> Result<ProfileView, ApiError> {
    let owner = UserStore::new(state.pool().clone())
        .find_by_id(profile.user_id)
        .await?
        .ok_or_else(|| ApiError::bad_request("no profile found"))?;

    Ok(ProfileView {
        profile,
        user: OwnerSnapshot::from(&owner),
    })
}

/// GET /api/profile/me - Current user's profile
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<ProfileView> {
    let profile = fetch_profile(&state, auth.user_id).await?;
    let view = attach_owner(&state, profile).await?;
    Ok(ApiResponse::success(view))
}

/// POST /api/profile - Create or update the current user's profile
///
/// `status` and `skills` are required. Recognized scalar fields are
/// last-write-wins per key; the social block is rewritten wholesale;
/// experience and education are untouched (they have their own routes).
pub async fn upsert(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> ApiResult<Profile> {
    require_str(&payload, "status")?;
    require_str(&payload, "skills")?;

    let payload: ProfilePayload = serde_json::from_value(payload)
        .map_err(|_| ApiError::validation_error("invalid profile payload"))?;

    let store = ProfileStore::new(state.pool().clone());
    let existing = store.find_by_user(auth.user_id).await?;
    let profile = profile_ops::apply_profile_fields(existing, &payload, auth.user_id);
    store.upsert(&profile).await?;

    Ok(ApiResponse::success(profile))
}

/// GET /api/profile - All profiles with their owners' public identity
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ProfileView>> {
    let profiles = ProfileStore::new(state.pool().clone()).find_all().await?;

    let owner_ids: Vec<Uuid> = profiles.iter().map(|p| p.user_id).collect();
    let owners = UserStore::new(state.pool().clone())
        .find_by_ids(&owner_ids)
        .await?;

    let views = profiles
        .into_iter()
        .filter_map(|profile| {
            owners
                .iter()
                .find(|user| user.id == profile.user_id)
                .map(|owner| ProfileView {
                    profile,
                    user: OwnerSnapshot::from(owner),
                })
        })
        .collect();

    Ok(ApiResponse::success(views))
}

/// GET /api/profile/user/:user_id - A profile by its owner's id
pub async fn by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<ProfileView> {
    let user_id = Uuid::parse_str(&user_id).map_err(|_| ApiError::bad_request("no profile found"))?;

    let profile = ProfileStore::new(state.pool().clone())
        .find_by_user(user_id)
        .await?
        .ok_or_else(|| ApiError::bad_request("no profile found"))?;

    let view = attach_owner(&state, profile).await?;
    Ok(ApiResponse::success(view))
}

/// DELETE /api/profile - Delete the current user's posts, profile and account
///
/// The three deletes run sequentially with no surrounding transaction; a
/// failure partway leaves the earlier deletes in place.
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Value> {
    PostStore::new(state.pool().clone())
        .delete_by_user(auth.user_id)
        .await?;
    ProfileStore::new(state.pool().clone())
        .delete_by_user(auth.user_id)
        .await?;
    UserStore::new(state.pool().clone())
        .delete(auth.user_id)
        .await?;

    Ok(ApiResponse::success(json!({ "msg": "profile deleted" })))
}

/// PUT /api/profile/experience - Append an experience entry
pub async fn add_experience(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> ApiResult<Profile> {
    require_str(&payload, "title")?;
    require_str(&payload, "company")?;
    require_str(&payload, "from")?;

    let payload: ExperiencePayload = serde_json::from_value(payload)
        .map_err(|_| ApiError::validation_error("invalid experience payload"))?;

    let mut profile = fetch_profile(&state, auth.user_id).await?;
    profile_ops::add_experience(&mut profile.experience.0, payload);

    ProfileStore::new(state.pool().clone())
        .replace_experience(auth.user_id, &profile.experience.0)
        .await?;

    Ok(ApiResponse::success(profile))
}

/// DELETE /api/profile/experience/:id - Remove an experience entry
///
/// Removing an id that is not present leaves the profile unchanged.
pub async fn remove_experience(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(entry_id): Path<String>,
) -> ApiResult<Profile> {
    let entry_id =
        Uuid::parse_str(&entry_id).map_err(|_| ApiError::bad_request("invalid entry id"))?;

    let mut profile = fetch_profile(&state, auth.user_id).await?;
    profile_ops::remove_experience(&mut profile.experience.0, entry_id);

    ProfileStore::new(state.pool().clone())
        .replace_experience(auth.user_id, &profile.experience.0)
        .await?;

    Ok(ApiResponse::success(profile))
}

/// PUT /api/profile/education - Append an education entry
pub async fn add_education(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> ApiResult<Profile> {
    require_str(&payload, "school")?;
    require_str(&payload, "degree")?;
    require_str(&payload, "field_of_study")?;
    require_str(&payload, "from")?;

    let payload: EducationPayload = serde_json::from_value(payload)
        .map_err(|_| ApiError::validation_error("invalid education payload"))?;

    let mut profile = fetch_profile(&state, auth.user_id).await?;
    profile_ops::add_education(&mut profile.education.0, payload);

    ProfileStore::new(state.pool().clone())
        .replace_education(auth.user_id, &profile.education.0)
        .await?;

    Ok(ApiResponse::success(profile))
}

/// DELETE /api/profile/education/:id - Remove an education entry
pub async fn remove_education(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(entry_id): Path<String>,
) -> ApiResult<Profile> {
    let entry_id =
        Uuid::parse_str(&entry_id).map_err(|_| ApiError::bad_request("invalid entry id"))?;

    let mut profile = fetch_profile(&state, auth.user_id).await?;
    profile_ops::remove_education(&mut profile.education.0, entry_id);

    ProfileStore::new(state.pool().clone())
        .replace_education(auth.user_id, &profile.education.0)
        .await?;

    Ok(ApiResponse::success(profile))
}

/// GET /api/profile/github/:username - The user's five most recent repos
pub async fn github_repos(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Value> {
    let repos = github::list_repos(&username, &state.config().github).await?;
    Ok(ApiResponse::success(repos))
}
