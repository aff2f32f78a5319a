use chrono::Utc;
use uuid::Uuid;

use super::MutateError;
use crate::database::models::{Comment, Like};

/// Add a like for `user_id`. Set semantics keyed by user: a second like
/// from the same user is rejected. Insertion order is preserved.
pub fn add_like(likes: &mut Vec<Like>, user_id: Uuid) -> Result<(), MutateError> {
    if likes.iter().any(|like| like.user == user_id) {
        return Err(MutateError::AlreadyLiked);
    }
    likes.push(Like { user: user_id });
    Ok(())
}

/// Remove `user_id`'s like, preserving the relative order of the rest.
pub fn remove_like(likes: &mut Vec<Like>, user_id: Uuid) -> Result<(), MutateError> {
    let index = likes
        .iter()
        .position(|like| like.user == user_id)
        .ok_or(MutateError::NotLiked)?;
    likes.remove(index);
    Ok(())
}

/// Prepend a comment; most-recent-first ordering is the exposed contract.
/// The author's name and avatar are snapshotted into the comment.
pub fn add_comment(
    comments: &mut Vec<Comment>,
    author_id: Uuid,
    author_name: &str,
    author_avatar: Option<&str>,
    text: &str,
) -> Result<(), MutateError> {
    if text.trim().is_empty() {
        return Err(MutateError::EmptyText);
    }

    comments.insert(
        0,
        Comment {
            id: Uuid::new_v4(),
            user: author_id,
            text: text.to_string(),
            name: author_name.to_string(),
            avatar: author_avatar.map(str::to_string),
            created_at: Utc::now(),
        },
    );
    Ok(())
}

/// Remove the comment with `comment_id`. Only the comment's author or the
/// post's author may remove it; everyone else gets `Forbidden`.
pub fn remove_comment(
    comments: &mut Vec<Comment>,
    comment_id: Uuid,
    requester_id: Uuid,
    post_author_id: Uuid,
) -> Result<(), MutateError> {
    let index = comments
        .iter()
        .position(|comment| comment.id == comment_id)
        .ok_or(MutateError::NotFound)?;

    let comment = &comments[index];
    if comment.user != requester_id && post_author_id != requester_id {
        return Err(MutateError::Forbidden);
    }

    comments.remove(index);
    Ok(())
}
