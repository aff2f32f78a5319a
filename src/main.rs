use axum::{
    extract::State,
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod auth;
mod config;
mod database;
mod domain;
mod error;
mod handlers;
mod middleware;
mod services;
mod state;

use middleware::token_auth_middleware;
use state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // A database connection failure at startup is fatal for the process
    let pool = match database::connect(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = database::bootstrap(&pool).await {
        eprintln!("failed to prepare database schema: {}", e);
        std::process::exit(1);
    }

    let port = config.server.port;
    let state = AppState::new(config, pool);
    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("devconnect API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    let guard = axum::middleware::from_fn_with_state(state.clone(), token_auth_middleware);

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/users", post(handlers::users::register))
        .route("/api/auth", post(handlers::auth::login))
        .route("/api/profile", get(handlers::profile::list))
        .route("/api/profile/user/:user_id", get(handlers::profile::by_user))
        .route(
            "/api/profile/github/:username",
            get(handlers::profile::github_repos),
        )
        // Protected; same paths may carry public methods registered above,
        // so the guard is attached per method router, not to the whole stack
        .route(
            "/api/auth",
            get(handlers::auth::current_user).route_layer(guard.clone()),
        )
        .route(
            "/api/posts",
            post(handlers::posts::create)
                .get(handlers::posts::list)
                .route_layer(guard.clone()),
        )
        .route(
            "/api/posts/:id",
            get(handlers::posts::get_by_id)
                .delete(handlers::posts::delete)
                .route_layer(guard.clone()),
        )
        .route(
            "/api/posts/like/:id",
            put(handlers::posts::like).route_layer(guard.clone()),
        )
        .route(
            "/api/posts/unlike/:id",
            put(handlers::posts::unlike).route_layer(guard.clone()),
        )
        .route(
            "/api/posts/comments/:id",
            put(handlers::posts::add_comment).route_layer(guard.clone()),
        )
        .route(
            "/api/posts/comments/:id/:cid",
            delete(handlers::posts::remove_comment).route_layer(guard.clone()),
        )
        .route(
            "/api/profile",
            post(handlers::profile::upsert)
                .delete(handlers::profile::delete_account)
                .route_layer(guard.clone()),
        )
        .route(
            "/api/profile/me",
            get(handlers::profile::me).route_layer(guard.clone()),
        )
        .route(
            "/api/profile/experience",
            put(handlers::profile::add_experience).route_layer(guard.clone()),
        )
        .route(
            "/api/profile/experience/:id",
            delete(handlers::profile::remove_experience).route_layer(guard.clone()),
        )
        .route(
            "/api/profile/education",
            put(handlers::profile::add_education).route_layer(guard.clone()),
        )
        .route(
            "/api/profile/education/:id",
            delete(handlers::profile::remove_education).route_layer(guard),
        )
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "devconnect API",
            "version": version,
            "description": "Social-profile REST API built with Rust (Axum)",
            "endpoints": {
                "users": "POST /api/users (public - registration)",
                "auth": "POST /api/auth (public - login), GET /api/auth (token)",
                "profile": "/api/profile[/me|/user/:id|/experience|/education|/github/:username]",
                "posts": "/api/posts[/:id|/like/:id|/unlike/:id|/comments/:id[/:cid]] (token)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(state.pool()).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
