use std::env;
use std::str::FromStr;

use anyhow::Context;
use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,
    pub log_dir: String,

    // Rate limiting
    pub rate_derive_per_min: u32,

    pub max_payload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8080".to_string(),
            api_prefix: "/api".to_string(),
            log_dir: "logs".to_string(),
            rate_derive_per_min: 600,
            max_payload_bytes: 4 * 1024 * 1024, // a month of records for a large team
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        let defaults = Self::default();

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or(defaults.server_addr),
            api_prefix: env::var("API_PREFIX").unwrap_or(defaults.api_prefix),
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
            rate_derive_per_min: parsed_var("RATE_DERIVE_PER_MIN", defaults.rate_derive_per_min)?,
            max_payload_bytes: parsed_var("MAX_PAYLOAD_BYTES", defaults.max_payload_bytes)?,
        })
    }
}

fn parsed_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
