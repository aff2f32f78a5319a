use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use sqlx::types::Json;
use uuid::Uuid;

use crate::database::models::{Education, Experience, Profile, SocialLinks};

/// Profile upsert payload: an explicit set of recognized fields rather than
/// a copy-everything map, so unknown keys are dropped instead of written
/// through to the document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePayload {
    pub status: Option<String>,
    /// Comma-separated list, required
    pub skills: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub youtube: Option<String>,
    pub instagram: Option<String>,
}

/// Split a raw skills string on commas, trimming each element. Empty
/// elements from leading/trailing/double commas are kept as-is; the
/// original service does not filter them and callers rely on that shape.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',').map(|skill| skill.trim().to_string()).collect()
}

/// Apply an upsert payload to a user's profile, creating one if absent.
///
/// Scalar fields are last-write-wins per key: a key absent from the payload
/// keeps its previous value. The social block is the exception and is
/// always rewritten wholesale, clearing links the payload omits. `skills`
/// is required and always replaced. Experience and education lists are
/// untouched; they have their own operations.
pub fn apply_profile_fields(
    existing: Option<Profile>,
    payload: &ProfilePayload,
    user_id: Uuid,
) -> Profile {
    let mut profile = existing.unwrap_or_else(|| Profile {
        id: Uuid::new_v4(),
        user_id,
        company: None,
        location: None,
        website: None,
        status: String::new(),
        skills: vec![],
        bio: None,
        github_username: None,
        experience: Json(vec![]),
        education: Json(vec![]),
        social: Json(SocialLinks::default()),
        created_at: Utc::now(),
    });

    if let Some(status) = &payload.status {
        profile.status = status.clone();
    }
    if let Some(company) = &payload.company {
        profile.company = Some(company.clone());
    }
    if let Some(location) = &payload.location {
        profile.location = Some(location.clone());
    }
    if let Some(website) = &payload.website {
        profile.website = Some(website.clone());
    }
    if let Some(bio) = &payload.bio {
        profile.bio = Some(bio.clone());
    }
    if let Some(github_username) = &payload.github_username {
        profile.github_username = Some(github_username.clone());
    }

    if let Some(skills) = &payload.skills {
        profile.skills = split_skills(skills);
    }

    profile.social = Json(SocialLinks {
        twitter: payload.twitter.clone(),
        facebook: payload.facebook.clone(),
        linkedin: payload.linkedin.clone(),
        youtube: payload.youtube.clone(),
        instagram: payload.instagram.clone(),
    });

    profile
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExperiencePayload {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EducationPayload {
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

/// Append an experience entry, assigning its id.
pub fn add_experience(experience: &mut Vec<Experience>, payload: ExperiencePayload) {
    experience.push(Experience {
        id: Uuid::new_v4(),
        title: payload.title,
        company: payload.company,
        location: payload.location,
        from: payload.from,
        to: payload.to,
        current: payload.current,
        description: payload.description,
    });
}

/// Remove the experience entry with the given id; no-op when absent.
pub fn remove_experience(experience: &mut Vec<Experience>, entry_id: Uuid) {
    experience.retain(|entry| entry.id != entry_id);
}

/// Append an education entry, assigning its id.
pub fn add_education(education: &mut Vec<Education>, payload: EducationPayload) {
    education.push(Education {
        id: Uuid::new_v4(),
        school: payload.school,
        degree: payload.degree,
        field_of_study: payload.field_of_study,
        from: payload.from,
        to: payload.to,
        current: payload.current,
        description: payload.description,
    });
}

/// Remove the education entry with the given id; no-op when absent.
pub fn remove_education(education: &mut Vec<Education>, entry_id: Uuid) {
    education.retain(|entry| entry.id != entry_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_with_skills(skills: &str) -> ProfilePayload {
        ProfilePayload {
            status: Some("developer".to_string()),
            skills: Some(skills.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn skills_are_split_and_trimmed() {
        assert_eq!(
            split_skills("rust, postgres ,  axum"),
            vec!["rust", "postgres", "axum"]
        );
    }

    #[test]
    fn empty_skill_elements_are_kept() {
        // Trailing and doubled commas produce empty entries; the original
        // service keeps them, so we do too.
        assert_eq!(split_skills("rust,,sql,"), vec!["rust", "", "sql", ""]);
    }

    #[test]
    fn creates_profile_when_absent() {
        let user_id = Uuid::new_v4();
        let profile = apply_profile_fields(None, &payload_with_skills("rust"), user_id);

        assert_eq!(profile.user_id, user_id);
        assert_eq!(profile.status, "developer");
        assert_eq!(profile.skills, vec!["rust"]);
        assert!(profile.experience.0.is_empty());
        assert!(profile.education.0.is_empty());
    }

    #[test]
    fn second_upsert_replaces_skills_wholesale() {
        let user_id = Uuid::new_v4();
        let first = apply_profile_fields(None, &payload_with_skills("rust, sql"), user_id);
        let second =
            apply_profile_fields(Some(first), &payload_with_skills(" go ,tokio"), user_id);

        assert_eq!(second.skills, vec!["go", "tokio"]);
        assert_eq!(second.user_id, user_id);
    }

    #[test]
    fn absent_scalar_keys_keep_previous_values() {
        let user_id = Uuid::new_v4();
        let mut payload = payload_with_skills("rust");
        payload.company = Some("acme".to_string());
        payload.bio = Some("hello".to_string());
        let first = apply_profile_fields(None, &payload, user_id);

        // Second payload omits company and bio entirely
        let second = apply_profile_fields(Some(first), &payload_with_skills("rust"), user_id);

        assert_eq!(second.company.as_deref(), Some("acme"));
        assert_eq!(second.bio.as_deref(), Some("hello"));
    }

    #[test]
    fn social_block_is_rewritten_wholesale() {
        let user_id = Uuid::new_v4();
        let mut payload = payload_with_skills("rust");
        payload.twitter = Some("@ann".to_string());
        payload.youtube = Some("ann-tube".to_string());
        let first = apply_profile_fields(None, &payload, user_id);
        assert_eq!(first.social.0.twitter.as_deref(), Some("@ann"));

        // Omitting the social keys clears the previous block
        let second = apply_profile_fields(Some(first), &payload_with_skills("rust"), user_id);
        assert_eq!(second.social.0, SocialLinks::default());
    }

    #[test]
    fn experience_appends_and_removes_by_id() {
        let mut experience = vec![];
        add_experience(
            &mut experience,
            ExperiencePayload {
                title: "engineer".to_string(),
                company: "acme".to_string(),
                location: None,
                from: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                to: None,
                current: true,
                description: None,
            },
        );
        add_experience(
            &mut experience,
            ExperiencePayload {
                title: "intern".to_string(),
                company: "globex".to_string(),
                location: None,
                from: NaiveDate::from_ymd_opt(2018, 6, 1).unwrap(),
                to: NaiveDate::from_ymd_opt(2019, 6, 1),
                current: false,
                description: None,
            },
        );
        assert_eq!(experience.len(), 2);

        let first_id = experience[0].id;
        remove_experience(&mut experience, first_id);
        assert_eq!(experience.len(), 1);
        assert_eq!(experience[0].title, "intern");

        // Unknown id is a no-op
        remove_experience(&mut experience, Uuid::new_v4());
        assert_eq!(experience.len(), 1);
    }

    #[test]
    fn education_appends_and_removes_by_id() {
        let mut education = vec![];
        add_education(
            &mut education,
            EducationPayload {
                school: "state u".to_string(),
                degree: "bsc".to_string(),
                field_of_study: "cs".to_string(),
                from: NaiveDate::from_ymd_opt(2014, 9, 1).unwrap(),
                to: NaiveDate::from_ymd_opt(2018, 6, 1),
                current: false,
                description: None,
            },
        );
        let id = education[0].id;

        remove_education(&mut education, Uuid::new_v4());
        assert_eq!(education.len(), 1);

        remove_education(&mut education, id);
        assert!(education.is_empty());
    }
}
