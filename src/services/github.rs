use serde_json::Value;

use crate::config::GithubConfig;
use crate::error::ApiError;

/// Fetch a user's five most recent public repositories from GitHub.
///
/// Any non-200 upstream answer (unknown user, rate limit) is reported to
/// the client as a 404, matching the original service's behavior.
pub async fn list_repos(username: &str, config: &GithubConfig) -> Result<Value, ApiError> {
    let mut url = format!(
        "https://api.github.com/users/{}/repos?per_page=5&sort=created:asc",
        username
    );
    // GitHub grants a higher rate limit when client credentials are sent
    if let (Some(id), Some(secret)) = (&config.client_id, &config.client_secret) {
        url.push_str(&format!("&client_id={}&client_secret={}", id, secret));
    }

    let client = reqwest::Client::new();
    let response = client
        .get(&url)
        .header("User-Agent", "devconnect-api")
        .send()
        .await
        .map_err(|e| {
            tracing::error!("github request failed: {}", e);
            ApiError::internal_server_error("server error")
        })?;

    if !response.status().is_success() {
        return Err(ApiError::not_found("no github profile found"));
    }

    response.json::<Value>().await.map_err(|e| {
        tracing::error!("github response was not valid json: {}", e);
        ApiError::internal_server_error("server error")
    })
}
