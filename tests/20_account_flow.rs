mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

/// End-to-end pass through registration, posting, liking and commenting.
/// Runs against a live database; skipped when the environment is not
/// configured.
#[tokio::test]
async fn register_post_like_unlike_flow() -> Result<()> {
    if common::env_missing() {
        eprintln!("skipping: DATABASE_URL / JWT_SECRET not configured");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let base = &server.base_url;

    // Unique email per run so reruns do not collide
    let email = format!("ann+{}@example.com", unique_suffix());

    // Register
    let res = client
        .post(format!("{}/api/users", base))
        .json(&json!({ "name": "Ann", "email": email, "password": "secret1" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    let token = body["data"]["token"].as_str().expect("token").to_string();

    // Duplicate registration is rejected
    let res = client
        .post(format!("{}/api/users", base))
        .json(&json!({ "name": "Ann", "email": email, "password": "secret1" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Create a post; it starts with no likes or comments
    let res = client
        .post(format!("{}/api/posts", base))
        .header("x-auth-token", &token)
        .json(&json!({ "text": "hello" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    let post_id = body["data"]["id"].as_str().expect("post id").to_string();
    assert_eq!(body["data"]["likes"], json!([]));
    assert_eq!(body["data"]["comments"], json!([]));

    // Like once, then a second like is rejected with 404
    let res = client
        .put(format!("{}/api/posts/like/{}", base, post_id))
        .header("x-auth-token", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let res = client
        .put(format!("{}/api/posts/like/{}", base, post_id))
        .header("x-auth-token", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Unlike restores the empty list; a second unlike is rejected with 400
    let res = client
        .put(format!("{}/api/posts/unlike/{}", base, post_id))
        .header("x-auth-token", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"], json!([]));

    let res = client
        .put(format!("{}/api/posts/unlike/{}", base, post_id))
        .header("x-auth-token", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Comments come back newest first
    for text in ["c1", "c2"] {
        let res = client
            .put(format!("{}/api/posts/comments/{}", base, post_id))
            .header("x-auth-token", &token)
            .json(&json!({ "text": text }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
    }
    let res = client
        .get(format!("{}/api/posts/{}", base, post_id))
        .header("x-auth-token", &token)
        .send()
        .await?;
    let body: Value = res.json().await?;
    let texts: Vec<&str> = body["data"]["comments"]
        .as_array()
        .expect("comments")
        .iter()
        .map(|c| c["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["c2", "c1"]);

    // Requests without a token are rejected
    let res = client.get(format!("{}/api/posts", base)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Pid + clock nanos, unique enough to keep rerun emails from colliding
fn unique_suffix() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    format!("{}-{}", std::process::id(), nanos)
}
