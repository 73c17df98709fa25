//! Server Configuration
//!
//! Resolution order: defaults < JSON config file < environment < CLI flags.
//!
//! ```json
//! {
//!   "host": "0.0.0.0",
//!   "port": 7500,
//!   "data_file": "./data/books.json",
//!   "environment": "development",
//!   "log_level": "info",
//!   "cors_origins": []
//! }
//! ```

use std::path::PathBuf;

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};

use crate::observability::Severity;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 7500)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Backing document (default: "./data/books.json")
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Free-form deployment label, logged at startup
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Minimum log severity (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// CORS allowed origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    7500
}

fn default_data_file() -> PathBuf {
    PathBuf::from("./data/books.json")
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: default_data_file(),
            environment: default_environment(),
            log_level: default_log_level(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Parse a JSON config document; missing keys take their defaults
    pub fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| format!("Invalid config JSON: {}", e))
    }

    /// Apply `HOST`, `PORT`, `BOOKS_FILE`, `ENVIRONMENT` and `LOG_LEVEL`
    /// from the process environment
    pub fn apply_env(&mut self) -> Result<(), String> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| format!("Invalid PORT: '{}'", port))?;
        }
        if let Some(data_file) = lookup("BOOKS_FILE") {
            self.data_file = PathBuf::from(data_file);
        }
        if let Some(environment) = lookup("ENVIRONMENT") {
            self.environment = environment;
        }
        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.log_level = log_level;
        }
        Ok(())
    }

    /// Reject configurations the server cannot start with
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("port must be > 0".to_string());
        }
        if self.host.trim().is_empty() {
            return Err("host must not be empty".to_string());
        }
        if self.data_file.as_os_str().is_empty() {
            return Err("data_file must not be empty".to_string());
        }
        self.severity()?;
        for origin in &self.cors_origins {
            parse_cors_origin(origin)?;
        }
        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> Result<Severity, String> {
        self.log_level.parse()
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse one `cors_origins` entry as a `scheme://host[:port]` origin.
///
/// `*` is refused; an empty list already means any origin.
pub fn parse_cors_origin(origin: &str) -> Result<HeaderValue, String> {
    let invalid = || format!("Invalid CORS origin: '{}'", origin);

    let has_scheme = origin.starts_with("http://") || origin.starts_with("https://");
    if !has_scheme || origin.ends_with('/') {
        return Err(invalid());
    }
    HeaderValue::from_str(origin).map_err(|_| invalid())
}
