use std::env;

use auth::SigningKey;
use axum::http::HeaderName;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::inbound::http::middleware::BearerSettings;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
    #[serde(default = "default_header_name")]
    pub header_name: String,
    #[serde(default = "default_scheme_prefix")]
    pub scheme_prefix: String,
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_hours() -> i64 {
    24
}

fn default_header_name() -> String {
    "Authorization".to_string()
}

fn default_scheme_prefix() -> String {
    "Bearer ".to_string()
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Environment::default())
    }

    /// Same layering as [`Config::load`] with an explicit environment source.
    fn load_with(environment: Environment) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // No prefix: JWT__SECRET=... overrides jwt.secret
            .add_source(environment.separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.jwt.validate()?;

        Ok(config)
    }
}

impl JwtConfig {
    /// Check every token setting up front so a bad value stops startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.signing_key()?;
        self.ttl()?;
        self.bearer_settings()?;
        Ok(())
    }

    pub fn signing_key(&self) -> Result<SigningKey, ConfigError> {
        SigningKey::new(self.secret.as_bytes())
            .map_err(|e| ConfigError::Message(format!("jwt.secret: {}", e)))
    }

    pub fn ttl(&self) -> Result<chrono::Duration, ConfigError> {
        if self.expiration_hours <= 0 {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be positive, got {}",
                self.expiration_hours
            )));
        }
        chrono::Duration::try_hours(self.expiration_hours).ok_or_else(|| {
            ConfigError::Message(format!(
                "jwt.expiration_hours out of range: {}",
                self.expiration_hours
            ))
        })
    }

    pub fn bearer_settings(&self) -> Result<BearerSettings, ConfigError> {
        let header_name = HeaderName::try_from(self.header_name.as_str())
            .map_err(|e| ConfigError::Message(format!("jwt.header_name: {}", e)))?;

        Ok(BearerSettings {
            header_name,
            scheme_prefix: self.scheme_prefix.clone(),
        })
    }
}
