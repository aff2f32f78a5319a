use serde::{Deserialize, Serialize};
use std::env;

/// Process-wide configuration, built once at startup and injected into
/// components through `AppState`. Nothing reads the environment after this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub github: GithubConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Secret used to sign and verify bearer tokens. Must be non-empty.
    pub jwt_secret: String,
}

/// Optional credentials forwarded on the outbound GitHub repos lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GithubConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("PORT") {
            Ok(v) => v
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid("PORT", v))?,
            Err(_) => 5000,
        };

        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(v) => v
                .parse::<u32>()
                .map_err(|_| ConfigError::Invalid("DATABASE_MAX_CONNECTIONS", v))?,
            Err(_) => 10,
        };

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET", "empty".to_string()));
        }

        let github = GithubConfig {
            client_id: env::var("GITHUB_CLIENT_ID").ok(),
            client_secret: env::var("GITHUB_CLIENT_SECRET").ok(),
        };

        Ok(Self {
            server: ServerConfig { port },
            database: DatabaseConfig {
                url,
                max_connections,
            },
            security: SecurityConfig { jwt_secret },
            github,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn clear_env() {
        for var in [
            "PORT",
            "DATABASE_URL",
            "DATABASE_MAX_CONNECTIONS",
            "JWT_SECRET",
            "GITHUB_CLIENT_ID",
            "GITHUB_CLIENT_SECRET",
        ] {
            env::remove_var(var);
        }
    }

    fn set_required() {
        env::set_var("DATABASE_URL", "postgres://localhost/devconnect");
        env::set_var("JWT_SECRET", "s3cret");
    }

    #[test]
    fn defaults_apply_when_optional_vars_absent() {
        let _guard = env_guard();
        clear_env();
        set_required();

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.security.jwt_secret, "s3cret");
        assert_eq!(config.github.client_id, None);
        assert_eq!(config.github.client_secret, None);
    }

    #[test]
    fn env_values_override_defaults() {
        let _guard = env_guard();
        clear_env();
        set_required();
        env::set_var("PORT", "8080");
        env::set_var("DATABASE_MAX_CONNECTIONS", "25");
        env::set_var("GITHUB_CLIENT_ID", "id123");
        env::set_var("GITHUB_CLIENT_SECRET", "sec456");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 25);
        assert_eq!(config.github.client_id.as_deref(), Some("id123"));
        assert_eq!(config.github.client_secret.as_deref(), Some("sec456"));
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let _guard = env_guard();
        clear_env();
        env::set_var("JWT_SECRET", "s3cret");

        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn missing_jwt_secret_is_an_error() {
        let _guard = env_guard();
        clear_env();
        env::set_var("DATABASE_URL", "postgres://localhost/devconnect");

        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn empty_jwt_secret_is_rejected() {
        let _guard = env_guard();
        clear_env();
        env::set_var("DATABASE_URL", "postgres://localhost/devconnect");
        env::set_var("JWT_SECRET", "");

        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("JWT_SECRET", _)));
    }

    #[test]
    fn unparsable_port_is_rejected() {
        let _guard = env_guard();
        clear_env();
        set_required();
        env::set_var("PORT", "not-a-port");

        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("PORT", _)));
    }
}
