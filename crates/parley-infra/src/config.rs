//! Environment-driven configuration loader for Parley.
//!
//! Reads the variables the deployment environment provides (PORT,
//! DB_PATH, AI_API_KEY, AI_API_URL, AI_MODEL, ENVIRONMENT, LOG_LEVEL)
//! into an [`AppConfig`] constructed once at startup and passed by
//! reference into constructors. Unset or unparsable values fall back
//! to the defaults; this runs before tracing is initialized, so it
//! stays silent about them.

use secrecy::SecretString;

use parley_types::config::{AppConfig, CompletionConfig};

/// Load configuration from environment variables, falling back to
/// [`AppConfig::default`] per field.
pub fn load_config() -> AppConfig {
    let defaults = AppConfig::default();

    AppConfig {
        port: env_var("PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port),
        database_path: env_var("DB_PATH").unwrap_or(defaults.database_path),
        completion: CompletionConfig {
            api_key: env_var("AI_API_KEY").map(SecretString::from),
            api_url: env_var("AI_API_URL").unwrap_or(defaults.completion.api_url),
            model: env_var("AI_MODEL").unwrap_or(defaults.completion.model),
        },
        environment: env_var("ENVIRONMENT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.environment),
        log_level: env_var("LOG_LEVEL").unwrap_or(defaults.log_level),
    }
}

/// Read an environment variable, treating empty values as unset.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
