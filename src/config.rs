//! Configuration module for Orchard.

use serde::Deserialize;
use std::path::Path;

use crate::{OrchardError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/orchard.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Secret used to sign session cookies (must be set).
    #[serde(default)]
    pub secret: String,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Session lifetime in seconds, counted from the last write.
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
    /// Interval between expired-session sweeps, in seconds.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
    /// Mark the cookie `Secure` (HTTPS only).
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_cookie_name() -> String {
    "orchard.sid".to_string()
}

/// Longest accepted session lifetime (ten years).
pub const MAX_SESSION_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

fn default_session_ttl() -> u64 {
    24 * 60 * 60
}

fn default_cleanup_interval() -> u64 {
    3600
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            cookie_name: default_cookie_name(),
            ttl_secs: default_session_ttl(),
            cleanup_interval_secs: default_cleanup_interval(),
            secure_cookie: false,
        }
    }
}

/// Password hashing cost parameters (Argon2id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PasswordConfig {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    /// Number of iterations.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Degree of parallelism.
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

fn default_memory_kib() -> u32 {
    19 * 1024
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/orchard.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Password hashing configuration.
    #[serde(default)]
    pub password: PasswordConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(OrchardError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| OrchardError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `ORCHARD_SESSION_SECRET`: session cookie signing secret
    /// - `ORCHARD_DATABASE_PATH`: SQLite database path
    pub fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var("ORCHARD_SESSION_SECRET") {
            if !secret.is_empty() {
                self.session.secret = secret;
            }
        }
        if let Ok(path) = std::env::var("ORCHARD_DATABASE_PATH") {
            if !path.is_empty() {
                self.database.path = path;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the session secret is empty or the session
    /// lifetime is zero or longer than [`MAX_SESSION_TTL_SECS`].
    pub fn validate(&self) -> Result<()> {
        if self.session.secret.is_empty() {
            return Err(OrchardError::Config(
                "session secret is not set. \
                 Set it in config.toml or via ORCHARD_SESSION_SECRET environment variable."
                    .to_string(),
            ));
        }
        if self.session.ttl_secs == 0 {
            return Err(OrchardError::Config(
                "session ttl_secs must be greater than zero".to_string(),
            ));
        }
        if self.session.ttl_secs > MAX_SESSION_TTL_SECS {
            return Err(OrchardError::Config(format!(
                "session ttl_secs must not exceed {MAX_SESSION_TTL_SECS}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.path, "data/orchard.db");
        assert!(config.session.secret.is_empty());
        assert_eq!(config.session.cookie_name, "orchard.sid");
        assert_eq!(config.session.ttl_secs, 86400);
        assert_eq!(config.session.cleanup_interval_secs, 3600);
        assert!(!config.session.secure_cookie);
        assert_eq!(config.password.memory_kib, 19456);
        assert_eq!(config.password.iterations, 2);
        assert_eq!(config.password.parallelism, 1);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/orchard.log");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080

[database]
path = "custom/orchard.sqlite"

[session]
secret = "a-very-secret-value"
cookie_name = "sid"
ttl_secs = 600
cleanup_interval_secs = 60
secure_cookie = true

[password]
memory_kib = 4096
iterations = 3
parallelism = 2

[logging]
level = "debug"
file = "custom/logs/app.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "custom/orchard.sqlite");
        assert_eq!(config.session.secret, "a-very-secret-value");
        assert_eq!(config.session.cookie_name, "sid");
        assert_eq!(config.session.ttl_secs, 600);
        assert_eq!(config.session.cleanup_interval_secs, 60);
        assert!(config.session.secure_cookie);
        assert_eq!(
            config.password,
            PasswordConfig {
                memory_kib: 4096,
                iterations: 3,
                parallelism: 2
            }
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 4000

[session]
secret = "s3cret"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.session.secret, "s3cret");

        // Defaults
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.session.ttl_secs, 86400);
        assert_eq!(config.database.path, "data/orchard.db");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");
        match result {
            Err(OrchardError::Config(msg)) => assert!(msg.contains("config parse error")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(OrchardError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 5000\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_apply_env_overrides() {
        let original_secret = std::env::var("ORCHARD_SESSION_SECRET").ok();
        let original_path = std::env::var("ORCHARD_DATABASE_PATH").ok();

        std::env::set_var("ORCHARD_SESSION_SECRET", "env-secret");
        std::env::set_var("ORCHARD_DATABASE_PATH", "env/orchard.db");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.session.secret, "env-secret");
        assert_eq!(config.database.path, "env/orchard.db");

        match original_secret {
            Some(val) => std::env::set_var("ORCHARD_SESSION_SECRET", val),
            None => std::env::remove_var("ORCHARD_SESSION_SECRET"),
        }
        match original_path {
            Some(val) => std::env::set_var("ORCHARD_DATABASE_PATH", val),
            None => std::env::remove_var("ORCHARD_DATABASE_PATH"),
        }
    }

    #[test]
    fn test_validate_requires_secret() {
        let config = Config::default();
        assert!(matches!(config.validate(), Err(OrchardError::Config(_))));

        let mut config = Config::default();
        config.session.secret = "secret".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let mut config = Config::default();
        config.session.secret = "secret".to_string();
        config.session.ttl_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_excessive_ttl() {
        let mut config = Config::default();
        config.session.secret = "secret".to_string();

        config.session.ttl_secs = MAX_SESSION_TTL_SECS;
        assert!(config.validate().is_ok());

        config.session.ttl_secs = MAX_SESSION_TTL_SECS + 1;
        assert!(matches!(config.validate(), Err(OrchardError::Config(_))));

        config.session.ttl_secs = 100_000_000_000_000;
        assert!(config.validate().is_err());
    }
}
