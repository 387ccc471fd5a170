use anyhow::{Context, Result};
use std::{env, str::FromStr};
use tracing::Level;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub max_connections: u32,

    // Rate limiting
    pub rate_per_min: u32,

    pub api_prefix: String,

    pub log_dir: String,
    pub log_level: Level,

    /// Insert the demo employees and applications at boot
    pub seed_on_startup: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080".to_string())?,
            max_connections: var_or("DATABASE_MAX_CONNECTIONS", 5)?,
            rate_per_min: var_or("RATE_PER_MIN", 1000)?,
            api_prefix: var_or("API_PREFIX", String::new())?,
            log_dir: var_or("LOG_DIR", "logs".to_string())?,
            log_level: var_or("LOG_LEVEL", Level::INFO)?,
            seed_on_startup: var_or("SEED_ON_STARTUP", false)?,
        })
    }
}

fn var_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid value {raw:?} for {key}: {e}")),
        Err(_) => Ok(default),
    }
}
