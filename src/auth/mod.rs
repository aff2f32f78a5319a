use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in a bearer token. Tokens carry only the user identity
/// and are non-expiring: `verify_token` disables expiry validation, matching
/// the contract that a token stays valid until the secret rotates.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub iat: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token is not valid")]
    Invalid,

    #[error("token generation failed: {0}")]
    Generation(String),
}

/// Sign a bearer token for the given user.
pub fn issue_token(user_id: Uuid, secret: &str) -> Result<String, TokenError> {
    let claims = Claims {
        user_id,
        iat: Utc::now().timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Generation(e.to_string()))
}

/// Verify a bearer token and extract the user identity it carries.
/// Fails on a bad signature or malformed payload.
pub fn verify_token(token: &str, secret: &str) -> Result<Uuid, TokenError> {
    let mut validation = Validation::default();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| TokenError::Invalid)?;

    Ok(data.claims.user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issued_token_round_trips() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, SECRET).unwrap();
        assert_eq!(verify_token(&token, SECRET).unwrap(), user_id);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = issue_token(Uuid::new_v4(), SECRET).unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(matches!(
            verify_token(&tampered, SECRET),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(Uuid::new_v4(), SECRET).unwrap();
        assert!(matches!(
            verify_token(&token, "other-secret"),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            verify_token("not-a-token", SECRET),
            Err(TokenError::Invalid)
        ));
    }
}
