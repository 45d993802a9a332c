//! Server Configuration
//!
//! Everything the binary reads from the environment (after `.env` is
//! loaded). Parsed once at startup.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use identity::IdentityConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Which identity store backs the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl StoreKind {
    fn parse(value: &str) -> anyhow::Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            other => bail!("IDENTITY_STORE must be 'postgres' or 'memory' (got '{other}')"),
        }
    }
}

/// Store connection settings; all that `--migrate`, `--reset` and `--drop` need
#[derive(Debug)]
pub struct DatabaseConfig {
    pub store: StoreKind,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let store = StoreKind::parse(&lookup("IDENTITY_STORE").unwrap_or_default())?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            store,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            max_connections,
        })
    }

    pub fn database_url(&self) -> anyhow::Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL must be set for the postgres identity store")
    }
}

#[derive(Debug)]
pub struct ServerConfig {
    pub database: DatabaseConfig,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub identity: IdentityConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database = DatabaseConfig::from_lookup(&lookup)?;

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:8080")?;

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            database,
            bind_addr,
            frontend_origins,
            identity: identity_config(&lookup)?,
        })
    }
}

fn identity_config(lookup: &impl Fn(&str) -> Option<String>) -> anyhow::Result<IdentityConfig> {
    let base = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
        Some(secret) => IdentityConfig {
            token_secret: Some(secret.into_bytes()),
            ..IdentityConfig::default()
        },
        None if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set, using a random development secret");
            IdentityConfig::development()
        }
        None => bail!("JWT_SECRET must be set in production"),
    };

    let token_ttl = match lookup("TOKEN_TTL_SECS") {
        Some(v) => {
            let secs: u64 = v
                .trim()
                .parse()
                .context("TOKEN_TTL_SECS must be a number of seconds")?;
            if secs == 0 {
                bail!("TOKEN_TTL_SECS must be greater than zero");
            }
            Duration::from_secs(secs)
        }
        None => base.token_ttl,
    };

    let require_name = match lookup("IDENTITY_REQUIRE_NAME") {
        Some(v) => parse_bool(&v).context("IDENTITY_REQUIRE_NAME must be true or false")?,
        None => false,
    };

    Ok(IdentityConfig {
        token_ttl,
        password_pepper: lookup("PASSWORD_PEPPER")
            .filter(|p| !p.is_empty())
            .map(String::into_bytes),
        require_name,
        ..base
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
