use anyhow::{anyhow, Result};
use std::net::SocketAddr;
use std::str::FromStr;

use crate::app::posts::DEFAULT_NAMESPACE;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(anyhow!("expected `redis` or `memory`, got `{}`", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub http_addr: String,
    pub store_backend: StoreBackend,
    pub redis_url: String,
    pub key_namespace: String,
    pub share_region: String,
    pub store_timeout_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let http_addr = env_or("HTTP_ADDR", "0.0.0.0:8080");
        let _parsed_http_addr = SocketAddr::from_str(&http_addr)
            .map_err(|err| anyhow!("invalid HTTP_ADDR: {}", err))?;

        let key_namespace = env_or("KEY_NAMESPACE", DEFAULT_NAMESPACE);
        if key_namespace.is_empty() || key_namespace.contains(':') {
            return Err(anyhow!("invalid KEY_NAMESPACE: must be non-empty and contain no ':'"));
        }

        let store_timeout_ms: u64 = env_or_parse("STORE_TIMEOUT_MS", "2000")?;
        if store_timeout_ms == 0 {
            return Err(anyhow!("invalid STORE_TIMEOUT_MS: must be greater than zero"));
        }

        Ok(Self {
            http_addr,
            store_backend: env_or_parse("STORE_BACKEND", "redis")?,
            redis_url: env_or("REDIS_URL", "redis://127.0.0.1/"),
            key_namespace,
            share_region: env_or("SHARE_REGION", "Patagonia"),
            store_timeout_ms,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
    value
        .parse::<T>()
        .map_err(|err| anyhow!("invalid {}: {}", key, err))
}
