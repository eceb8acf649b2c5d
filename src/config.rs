use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::{error, info};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Environment (dev, staging, prod)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// CORS allowed origins
    pub cors_origins: Option<String>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Service identifier used in logs
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// JWT signing secret
    #[serde(default = "default_jwt_secret_key")]
    pub jwt_secret_key: String,

    /// Database URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Directory for uploaded files
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    /// Language-model API base URL
    #[serde(default = "default_openai_api_base")]
    pub openai_api_base: String,

    /// Language-model API key
    pub openai_api_key: Option<String>,

    /// Model used for chat completions and command analysis
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Speech API base URL
    pub speech_api_url: Option<String>,

    /// Speech API key
    pub speech_api_key: Option<String>,
}

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Install the loaded configuration.
/// Should be called once at startup.
pub fn init_config(config: Config) {
    if CONFIG.set(config).is_err() {
        error!("Configuration already initialized");
    }
}

/// Get the global configuration instance.
pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration not initialized. Call init_config() first.")
}

impl Config {
    /// Load configuration from environment variables or app.env file
    pub fn load() -> Result<Self, ConfigError> {
        // Try to load from app.env file first
        if std::path::Path::new("app.env").exists() {
            dotenvy::from_filename("app.env").ok();
        } else {
            // Fallback to .env file
            dotenvy::dotenv().ok();
        }

        // Load from environment variables using envy
        match envy::from_env::<Config>() {
            Ok(config) => {
                info!("✅ Configuration loaded successfully");
                Ok(config)
            }
            Err(e) => {
                error!("❌ Failed to load configuration: {}", e);
                Err(ConfigError::EnvError(e))
            }
        }
    }

    /// Get the full server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode
    pub fn is_development(&self) -> bool {
        self.environment.to_lowercase() == "dev" || self.environment.to_lowercase() == "development"
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "prod" || self.environment.to_lowercase() == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            cors_origins: None,
            log_level: default_log_level(),
            service_name: default_service_name(),
            jwt_secret_key: default_jwt_secret_key(),
            database_url: default_database_url(),
            upload_dir: default_upload_dir(),
            openai_api_base: default_openai_api_base(),
            openai_api_key: None,
            openai_model: default_openai_model(),
            speech_api_url: None,
            speech_api_key: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EnvError(envy::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EnvError(e) => write!(f, "Environment variable error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "smartassist-backend".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_jwt_secret_key() -> String {
    "your-secret-key".to_string()
}

fn default_database_url() -> String {
    "sqlite://smartassistant.db?mode=rwc".to_string()
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_openai_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4".to_string()
}
