//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;

use anyhow::Context;

use workforce_auth::GatePaths;

const DEV_SESSION_SECRET: &str = "dev-session-secret";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `BIND_ADDR`, default `0.0.0.0:8080`.
    pub bind_addr: SocketAddr,
    /// `SESSION_SECRET`: HS256 key for session tokens.
    pub session_secret: String,
    pub paths: GatePaths,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            session_secret: DEV_SESSION_SECRET.to_string(),
            paths: GatePaths::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("invalid BIND_ADDR '{addr}'"))?;
        }

        match lookup("SESSION_SECRET").filter(|s| !s.trim().is_empty()) {
            Some(secret) => config.session_secret = secret,
            None => tracing::warn!("SESSION_SECRET not set; using insecure dev default"),
        }

        Ok(config)
    }
}
