use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Comment, Like, Post};
use super::StoreError;

/// Store client for the posts collection. Like and comment lists are
/// replaced as whole JSONB columns, so each mutation is one atomic
/// per-document write (the `$push`/`$pull` equivalent).
pub struct PostStore {
    pool: PgPool,
}

impl PostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        user_id: Uuid,
        name: &str,
        avatar: Option<&str>,
        text: &str,
    ) -> Result<Post, StoreError> {
        let post = Post {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            avatar: avatar.map(str::to_string),
            text: text.to_string(),
            likes: Json(vec![]),
            comments: Json(vec![]),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO posts (id, user_id, name, avatar, text, likes, comments, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(post.id)
        .bind(post.user_id)
        .bind(&post.name)
        .bind(&post.avatar)
        .bind(&post.text)
        .bind(&post.likes)
        .bind(&post.comments)
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;

        Ok(post)
    }

    /// All posts, newest first
    pub async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
        let posts = sqlx::query_as::<_, Post>("SELECT * FROM posts ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn delete_by_user(&self, user_id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM posts WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn replace_likes(&self, post_id: Uuid, likes: &[Like]) -> Result<(), StoreError> {
        sqlx::query("UPDATE posts SET likes = $1 WHERE id = $2")
            .bind(Json(likes))
            .bind(post_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn replace_comments(
        &self,
        post_id: Uuid,
        comments: &[Comment],
    ) -> Result<(), StoreError> {
        sqlx::query("UPDATE posts SET comments = $1 WHERE id = $2")
            .bind(Json(comments))
            .bind(post_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
