use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// PostgreSQL settings. Without a `url` the service keeps accounts in memory.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_validity_seconds")]
    pub validity_seconds: i64,
}

fn default_validity_seconds() -> i64 {
    86_400
}

impl JwtConfig {
    /// Ten years.
    pub const MAX_VALIDITY_SECONDS: i64 = 315_360_000;

    /// Token lifetime, clamped to `1..=MAX_VALIDITY_SECONDS`.
    pub fn validity(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.validity_seconds.clamp(1, Self::MAX_VALIDITY_SECONDS))
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".to_string()));
        }
        if !(1..=JwtConfig::MAX_VALIDITY_SECONDS).contains(&self.jwt.validity_seconds) {
            return Err(ConfigError::Message(format!(
                "jwt.validity_seconds must be between 1 and {}, got {}",
                JwtConfig::MAX_VALIDITY_SECONDS,
                self.jwt.validity_seconds
            )));
        }
        if self.database.url.is_some() && self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(source: &str) -> Config {
        ConfigBuilder::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_select_in_memory_store() {
        let config = from_toml(
            r#"
            [server]
            http_port = 8080

            [jwt]
            secret = "s3cret"
            "#,
        );

        assert!(config.database.url.is_none());
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.jwt.validity(), chrono::Duration::hours(24));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unusable_jwt_settings() {
        let mut config = from_toml(
            r#"
            [server]
            http_port = 8080

            [database]
            url = "postgresql://localhost/accounts"

            [jwt]
            secret = ""
            validity_seconds = 60
            "#,
        );
        assert!(config.validate().is_err());

        config.jwt.secret = "s3cret".to_string();
        config.jwt.validity_seconds = 0;
        assert!(config.validate().is_err());

        config.jwt.validity_seconds = 60;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_validity() {
        let mut config = from_toml(
            r#"
            [server]
            http_port = 8080

            [jwt]
            secret = "s3cret"
            validity_seconds = 9000000000000
            "#,
        );
        assert!(config.validate().is_err());
        assert_eq!(
            config.jwt.validity(),
            chrono::Duration::seconds(JwtConfig::MAX_VALIDITY_SECONDS)
        );

        config.jwt.validity_seconds = JwtConfig::MAX_VALIDITY_SECONDS;
        assert!(config.validate().is_ok());

        let handler = auth::JwtHandler::new(b"s3cret", config.jwt.validity());
        assert!(handler.issue_now("a@x.com").is_ok());

        config.jwt.validity_seconds = i64::MAX;
        assert!(config.validate().is_err());
        assert_eq!(
            config.jwt.validity(),
            chrono::Duration::seconds(JwtConfig::MAX_VALIDITY_SECONDS)
        );
    }
}
