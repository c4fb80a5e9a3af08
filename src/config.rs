// Configuration management

use crate::core::errors::ServerError;
use serde::{Deserialize, Serialize};
use std::env;

/// Placeholder value shipped in deployment templates; refusing it forces
/// operators to provision a real key.
const FLOW_ID_KEY_PLACEHOLDER: &str = "YOU MUST CHANGE ME";

/// Minimum length of the flow id signing key, in bytes.
const FLOW_ID_KEY_MIN_LEN: usize = 32;

/// Application configuration loaded from environment variables
///
/// All configuration is validated on load with clear error messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server configuration
    pub bind_address: String,
    pub port: u16,

    // Flow metrics configuration
    pub flow_id_key: String,
    pub flow_id_expiry_ms: i64,

    // Settings flow configuration
    pub min_password_length: usize,

    // Auth server configuration
    pub auth_server_url: String,
    pub auth_server_timeout_secs: u64,

    // Middleware configuration
    pub request_timeout_secs: u64,
    pub body_size_limit_bytes: usize,

    // Logging configuration
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Supports `.env` file loading in development (via dotenv crate).
    /// Validates all required fields.
    pub fn from_env() -> Result<Self, ServerError> {
        // Load .env file if present (development). Skip in tests to avoid
        // interfering with test environment variables.
        #[cfg(not(test))]
        {
            dotenv::dotenv().ok();
        }

        let config = Self {
            bind_address: Self::get_env_or_default("BIND_ADDRESS", "0.0.0.0"),
            port: Self::parse_port()?,
            flow_id_key: Self::get_required_env("FLOW_ID_KEY")?,
            flow_id_expiry_ms: Self::parse_i64_or_default("FLOW_ID_EXPIRY_MS", 7_200_000)?,
            min_password_length: Self::parse_usize_or_default("MIN_PASSWORD_LENGTH", 8)?,
            auth_server_url: Self::get_env_or_default(
                "AUTH_SERVER_URL",
                "http://localhost:9000",
            ),
            auth_server_timeout_secs: Self::parse_u64_or_default("AUTH_SERVER_TIMEOUT_SECS", 30)?,
            request_timeout_secs: Self::parse_u64_or_default("REQUEST_TIMEOUT_SECS", 30)?,
            body_size_limit_bytes: Self::parse_usize_or_default(
                "BODY_SIZE_LIMIT_BYTES",
                1024 * 1024,
            )?,
            log_level: Self::get_env_or_default("LOG_LEVEL", "info"),
            log_format: Self::get_env_or_default("LOG_FORMAT", "json"),
        };

        // Post-load validation
        config.validate()?;

        Ok(config)
    }

    /// Get environment variable or return default value
    fn get_env_or_default(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Get required environment variable
    fn get_required_env(key: &str) -> Result<String, ServerError> {
        let value = env::var(key)
            .map_err(|_| ServerError::ConfigurationError(format!("{} not set", key)))?;

        if value.is_empty() {
            return Err(ServerError::ConfigurationError(format!("{} is empty", key)));
        }

        Ok(value)
    }

    /// Parse port from PORT environment variable
    fn parse_port() -> Result<u16, ServerError> {
        let port_str = env::var("PORT").unwrap_or_else(|_| "3030".to_string());
        let port = port_str.parse::<u16>().map_err(|e| {
            ServerError::ConfigurationError(format!("Invalid PORT value '{}': {}", port_str, e))
        })?;

        if port == 0 {
            return Err(ServerError::ConfigurationError(
                "PORT must be between 1 and 65535".to_string(),
            ));
        }

        Ok(port)
    }

    /// Parse u64 from environment variable or return default
    fn parse_u64_or_default(key: &str, default: u64) -> Result<u64, ServerError> {
        match env::var(key) {
            Ok(value) => {
                let parsed = value.parse::<u64>().map_err(|e| {
                    ServerError::ConfigurationError(format!(
                        "Invalid {} value '{}': {}",
                        key, value, e
                    ))
                })?;

                if parsed == 0 {
                    return Err(ServerError::ConfigurationError(format!(
                        "{} must be greater than 0",
                        key
                    )));
                }

                Ok(parsed)
            }
            _ => Ok(default),
        }
    }

    /// Parse i64 from environment variable or return default
    fn parse_i64_or_default(key: &str, default: i64) -> Result<i64, ServerError> {
        match env::var(key) {
            Ok(value) => {
                let parsed = value.parse::<i64>().map_err(|e| {
                    ServerError::ConfigurationError(format!(
                        "Invalid {} value '{}': {}",
                        key, value, e
                    ))
                })?;

                if parsed <= 0 {
                    return Err(ServerError::ConfigurationError(format!(
                        "{} must be greater than 0",
                        key
                    )));
                }

                Ok(parsed)
            }
            _ => Ok(default),
        }
    }

    /// Parse usize from environment variable or return default
    fn parse_usize_or_default(key: &str, default: usize) -> Result<usize, ServerError> {
        match env::var(key) {
            Ok(value) => {
                let parsed = value.parse::<usize>().map_err(|e| {
                    ServerError::ConfigurationError(format!(
                        "Invalid {} value '{}': {}",
                        key, value, e
                    ))
                })?;

                if parsed == 0 {
                    return Err(ServerError::ConfigurationError(format!(
                        "{} must be greater than 0",
                        key
                    )));
                }

                Ok(parsed)
            }
            _ => Ok(default),
        }
    }

    /// Validate all configuration values
    fn validate(&self) -> Result<(), ServerError> {
        if self.port == 0 {
            return Err(ServerError::ConfigurationError(format!(
                "Invalid PORT value '{}': must be between 1 and 65535",
                self.port
            )));
        }

        Self::validate_flow_id_key(&self.flow_id_key)?;
        Self::validate_url(&self.auth_server_url, "Auth server")?;
        Self::validate_log_level(&self.log_level)?;
        Self::validate_log_format(&self.log_format)?;

        Ok(())
    }

    /// Validate the flow id signing key
    fn validate_flow_id_key(key: &str) -> Result<(), ServerError> {
        if key == FLOW_ID_KEY_PLACEHOLDER {
            return Err(ServerError::ConfigurationError(
                "FLOW_ID_KEY is still the placeholder value".to_string(),
            ));
        }

        if key.len() < FLOW_ID_KEY_MIN_LEN {
            return Err(ServerError::ConfigurationError(format!(
                "FLOW_ID_KEY must be at least {} characters",
                FLOW_ID_KEY_MIN_LEN
            )));
        }

        Ok(())
    }

    /// Validate URL format
    fn validate_url(url: &str, description: &str) -> Result<(), ServerError> {
        url::Url::parse(url).map_err(|e| {
            ServerError::ConfigurationError(format!(
                "Invalid {} URL '{}': {}",
                description, url, e
            ))
        })?;
        Ok(())
    }

    /// Validate log level
    fn validate_log_level(level: &str) -> Result<(), ServerError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&level.to_lowercase().as_str()) {
            return Err(ServerError::ConfigurationError(format!(
                "Invalid LOG_LEVEL '{}': must be one of {}",
                level,
                valid_levels.join(", ")
            )));
        }
        Ok(())
    }

    /// Validate log format
    fn validate_log_format(format: &str) -> Result<(), ServerError> {
        if format != "json" && format != "text" {
            return Err(ServerError::ConfigurationError(format!(
                "Invalid LOG_FORMAT '{}': must be 'json' or 'text'",
                format
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Create a test configuration for unit tests
    ///
    /// This bypasses environment variable loading for tests that don't need
    /// real configuration.
    pub fn test_config() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3030,
            flow_id_key: "0123456789abcdef0123456789abcdef".to_string(),
            flow_id_expiry_ms: 7_200_000,
            min_password_length: 8,
            auth_server_url: "http://localhost:9000".to_string(),
            auth_server_timeout_secs: 30,
            request_timeout_secs: 30,
            body_size_limit_bytes: 1024 * 1024,
            log_level: "info".to_string(),
            log_format: "json".to_string(),
        }
    }
}
