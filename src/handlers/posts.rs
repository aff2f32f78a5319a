use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use serde_json::{json, Value};
use uuid::Uuid;

use super::require_str;
use crate::database::models::{Comment, Like, Post, User};
use crate::database::{PostStore, UserStore};
use crate::domain::post_ops;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// Path ids arrive as strings; a malformed id answers the same 400 the
/// original service produced for an invalid object id.
fn parse_post_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request("no post found"))
}

async fn fetch_post(store: &PostStore, id: Uuid) -> Result<Post, ApiError> {
    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::bad_request("no post found"))
}

async fn fetch_author(state: &AppState, user_id: Uuid) -> Result<User, ApiError> {
    UserStore::new(state.pool().clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::bad_request("no user found"))
}

/// POST /api/posts - Create a post
///
/// Snapshots the author's name and avatar into the post so responses do
/// not need a join back to the users collection.
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> ApiResult<Post> {
    let text = require_str(&payload, "text")?;
    let author = fetch_author(&state, auth.user_id).await?;

    let store = PostStore::new(state.pool().clone());
    let post = store
        .insert(author.id, &author.name, author.avatar_url.as_deref(), text)
        .await?;

    Ok(ApiResponse::success(post))
}

/// GET /api/posts - All posts, newest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Post>> {
    let posts = PostStore::new(state.pool().clone()).find_all().await?;
    Ok(ApiResponse::success(posts))
}

/// GET /api/posts/:id - A single post
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> ApiResult<Post> {
    let post_id = parse_post_id(&post_id)?;
    let store = PostStore::new(state.pool().clone());
    let post = fetch_post(&store, post_id).await?;
    Ok(ApiResponse::success(post))
}

/// DELETE /api/posts/:id - Delete a post; only its author may
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(post_id): Path<String>,
) -> ApiResult<Value> {
    let post_id = parse_post_id(&post_id)?;
    let store = PostStore::new(state.pool().clone());
    let post = fetch_post(&store, post_id).await?;

    if post.user_id != auth.user_id {
        return Err(ApiError::forbidden("user is not authorized"));
    }

    store.delete(post.id).await?;
    Ok(ApiResponse::success(json!({ "msg": "post deleted" })))
}

/// PUT /api/posts/like/:id - Like a post
///
/// A second like from the same user answers 404. Returns the likes list.
pub async fn like(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(post_id): Path<String>,
) -> ApiResult<Vec<Like>> {
    let post_id = parse_post_id(&post_id)?;
    let store = PostStore::new(state.pool().clone());
    let post = fetch_post(&store, post_id).await?;

    let mut likes = post.likes.0;
    post_ops::add_like(&mut likes, auth.user_id)?;
    store.replace_likes(post.id, &likes).await?;

    Ok(ApiResponse::success(likes))
}

/// PUT /api/posts/unlike/:id - Remove a like; 400 when not liked
pub async fn unlike(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(post_id): Path<String>,
) -> ApiResult<Vec<Like>> {
    let post_id = parse_post_id(&post_id)?;
    let store = PostStore::new(state.pool().clone());
    let post = fetch_post(&store, post_id).await?;

    let mut likes = post.likes.0;
    post_ops::remove_like(&mut likes, auth.user_id)?;
    store.replace_likes(post.id, &likes).await?;

    Ok(ApiResponse::success(likes))
}

/// PUT /api/posts/comments/:id - Add a comment
///
/// The new comment is prepended; the returned list is newest first.
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(post_id): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Vec<Comment>> {
    let text = require_str(&payload, "text")?;
    let post_id = parse_post_id(&post_id)?;

    let author = fetch_author(&state, auth.user_id).await?;
    let store = PostStore::new(state.pool().clone());
    let post = fetch_post(&store, post_id).await?;

    let mut comments = post.comments.0;
    post_ops::add_comment(
        &mut comments,
        author.id,
        &author.name,
        author.avatar_url.as_deref(),
        text,
    )?;
    store.replace_comments(post.id, &comments).await?;

    Ok(ApiResponse::success(comments))
}

/// DELETE /api/posts/comments/:id/:cid - Remove a comment
///
/// Only the comment's author or the post's author may; anyone else
/// answers 401. Returns the remaining comments.
pub async fn remove_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> ApiResult<Vec<Comment>> {
    let post_id = parse_post_id(&post_id)?;
    let comment_id =
        Uuid::parse_str(&comment_id).map_err(|_| ApiError::bad_request("no comment found"))?;

    let store = PostStore::new(state.pool().clone());
    let post = fetch_post(&store, post_id).await?;

    let mut comments = post.comments.0;
    post_ops::remove_comment(&mut comments, comment_id, auth.user_id, post.user_id)?;
    store.replace_comments(post.id, &comments).await?;

    Ok(ApiResponse::success(comments))
}
