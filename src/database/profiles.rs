use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Education, Experience, Profile};
use super::StoreError;

/// Store client for the profiles collection, keyed one-to-one by owner.
pub struct ProfileStore {
    pool: PgPool,
}

impl ProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a profile, create-if-absent keyed by owner. The whole
    /// document is written in one atomic statement.
    pub async fn upsert(&self, profile: &Profile) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO profiles
                (id, user_id, company, location, website, status, skills, bio,
                 github_username, experience, education, social, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (user_id) DO UPDATE SET
                company = EXCLUDED.company,
                location = EXCLUDED.location,
                website = EXCLUDED.website,
                status = EXCLUDED.status,
                skills = EXCLUDED.skills,
                bio = EXCLUDED.bio,
                github_username = EXCLUDED.github_username,
                social = EXCLUDED.social
            "#,
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.company)
        .bind(&profile.location)
        .bind(&profile.website)
        .bind(&profile.status)
        .bind(&profile.skills)
        .bind(&profile.bio)
        .bind(&profile.github_username)
        .bind(&profile.experience)
        .bind(&profile.education)
        .bind(&profile.social)
        .bind(profile.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    pub async fn find_all(&self) -> Result<Vec<Profile>, StoreError> {
        let profiles =
            sqlx::query_as::<_, Profile>("SELECT * FROM profiles ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(profiles)
    }

    pub async fn delete_by_user(&self, user_id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn replace_experience(
        &self,
        user_id: Uuid,
        experience: &[Experience],
    ) -> Result<(), StoreError> {
        sqlx::query("UPDATE profiles SET experience = $1 WHERE user_id = $2")
            .bind(Json(experience))
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn replace_education(
        &self,
        user_id: Uuid,
        education: &[Education],
    ) -> Result<(), StoreError> {
        sqlx::query("UPDATE profiles SET education = $1 WHERE user_id = $2")
            .bind(Json(education))
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
