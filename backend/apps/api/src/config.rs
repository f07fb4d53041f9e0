//! Server configuration from environment variables
//!
//! | variable | default |
//! |---|---|
//! | `BIND_ADDR` | `0.0.0.0:31113` |
//! | `DATABASE_URL` | unset: in-memory repositories |
//! | `REDIS_URL` | unset: in-process key-value store |
//! | `SESSION_TTL_SECS` | `86400` |
//! | `CACHE_TTL_SECS` | `300` |
//! | `REQUEST_TIMEOUT_SECS` | `30` |
//! | `PASSWORD_PEPPER` | unset (standard base64 when set) |
//! | `FRONTEND_ORIGINS` | `http://localhost:40922,http://127.0.0.1:40922` |

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use platform::crypto;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
/// Upper bound for every `*_SECS` setting (30 days)
const MAX_SECS: u64 = 30 * 24 * 3600;

const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    pub session_ttl: Duration,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
    pub password_pepper: Option<Vec<u8>>,
    pub frontend_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_or(get("BIND_ADDR"), "BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let session_ttl = secs_or(get("SESSION_TTL_SECS"), "SESSION_TTL_SECS", 86_400)?;
        let cache_ttl = secs_or(get("CACHE_TTL_SECS"), "CACHE_TTL_SECS", 300)?;
        let request_timeout = secs_or(get("REQUEST_TIMEOUT_SECS"), "REQUEST_TIMEOUT_SECS", 30)?;

        let password_pepper = get("PASSWORD_PEPPER")
            .map(|b64| crypto::from_base64(b64.trim()))
            .transpose()
            .context("PASSWORD_PEPPER must be standard base64")?;

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            bind_addr,
            database_url: get("DATABASE_URL"),
            redis_url: get("REDIS_URL"),
            session_ttl,
            cache_ttl,
            request_timeout,
            password_pepper,
            frontend_origins,
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = value.unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse()
        .with_context(|| format!("{} has an invalid value: {}", key, raw))
}

fn secs_or(value: Option<String>, key: &str, default: u64) -> anyhow::Result<Duration> {
    let secs: u64 = parse_or(value, key, &default.to_string())?;
    if secs == 0 {
        bail!("{} must be greater than zero", key);
    }
    if secs > MAX_SECS {
        bail!("{} must be at most {} seconds", key, MAX_SECS);
    }
    Ok(Duration::from_secs(secs))
}
