//! Application configuration types.
//!
//! The configuration is constructed once at startup (see
//! `parley_infra::config::load_config`) and passed by reference into
//! constructors. There is no ambient global configuration state.

use secrecy::SecretString;

use std::fmt;
use std::str::FromStr;

/// Deployment environment tag. Selects logging verbosity defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Environment::Development
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
            Environment::Test => write!(f, "test"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            other => Err(format!("invalid environment: '{other}'")),
        }
    }
}

/// Completion provider configuration.
///
/// The API key is wrapped in [`SecretString`] so it never appears in
/// Debug output or logs. A missing key selects the mock backend.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_key: Option<SecretString>,
    pub api_url: String,
    pub model: String,
}

/// Application configuration, constructed once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_path: String,
    pub completion: CompletionConfig,
    pub environment: Environment,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            database_path: "parley.db".to_string(),
            completion: CompletionConfig {
                api_key: None,
                api_url: "https://api.openai.com/v1/chat/completions".to_string(),
                model: "gpt-3.5-turbo".to_string(),
            },
            environment: Environment::Development,
            log_level: "info".to_string(),
        }
    }
}
