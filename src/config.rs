// src/config.rs

use std::env;
use std::net::SocketAddr;

use dotenvy::dotenv;

/// Longest accepted session lifetime: ten years.
pub const MAX_SESSION_TTL: u64 = 60 * 60 * 24 * 365 * 10;

const DEFAULT_SESSION_TTL: u64 = 60 * 60 * 24 * 7;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Signs session and flash cookies.
    pub secret_key: String,
    pub session_ttl: u64,
    pub bind_addr: SocketAddr,
    pub static_dir: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://site.db?mode=rwc".to_string());

        let secret_key = env::var("SECRET_KEY").map_err(|_| ConfigError::Missing("SECRET_KEY"))?;

        let session_ttl = parse_session_ttl(env::var("SESSION_TTL_SECONDS").ok())?;

        let bind_addr = match env::var("BIND_ADDR") {
            Ok(value) => value.parse::<SocketAddr>().map_err(|_| ConfigError::Invalid {
                name: "BIND_ADDR",
                value,
            })?,
            Err(_) => SocketAddr::from(([0, 0, 0, 0], 3000)),
        };

        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            database_url,
            secret_key,
            session_ttl,
            bind_addr,
            static_dir,
            rust_log,
        })
    }
}

/// Parses `SESSION_TTL_SECONDS`, falling back to one week when unset.
fn parse_session_ttl(value: Option<String>) -> Result<u64, ConfigError> {
    let Some(value) = value else {
        return Ok(DEFAULT_SESSION_TTL);
    };
    match value.parse::<u64>() {
        Ok(ttl) if ttl > 0 && ttl <= MAX_SESSION_TTL => Ok(ttl),
        _ => Err(ConfigError::Invalid {
            name: "SESSION_TTL_SECONDS",
            value,
        }),
    }
}
