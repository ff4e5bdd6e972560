//! Connection settings for the `users` database.
//!
//! A front desk issues one short statement per scan, so the pool stays
//! small by default: one warm connection, at most ten.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MIN_CONNECTIONS: u32 = 1;
const MAX_CONNECTIONS: u32 = 10;
const POOL_CEILING: u32 = 100;
const ACQUIRE_TIMEOUT_SECS: u64 = 30;
const IDLE_TIMEOUT_SECS: u64 = 600;
const MAX_LIFETIME_SECS: u64 = 1800;

/// Where the user store lives and how its pool is sized.
///
/// Loaded from `ENTRANCE_SYSTEM__DATABASE__*`; only `URL` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://` or `postgresql://` URL of the database holding `users`.
    pub url: String,

    #[serde(default = "min_connections")]
    pub min_connections: u32,

    #[serde(default = "max_connections")]
    pub max_connections: u32,

    /// Seconds a scan may wait for a free connection before failing.
    #[serde(default = "acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    #[serde(default = "idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    #[serde(default = "max_lifetime_secs")]
    pub max_lifetime_secs: u64,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }

    /// The URL with its password masked, safe to log at startup.
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        let Some((credentials, host)) = rest.rsplit_once('@') else {
            return self.url.clone();
        };
        match credentials.split_once(':') {
            Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
            None => self.url.clone(),
        }
    }

    fn has_postgres_scheme(&self) -> bool {
        ["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }

    /// Rejects settings the pool could never honour.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            Err(ValidationError::MissingRequired("DATABASE__URL"))
        } else if !self.has_postgres_scheme() {
            Err(ValidationError::InvalidDatabaseUrl)
        } else if self.min_connections > self.max_connections {
            Err(ValidationError::InvalidPoolSize)
        } else if self.max_connections > POOL_CEILING {
            Err(ValidationError::PoolSizeTooLarge)
        } else if self.acquire_timeout_secs == 0 {
            Err(ValidationError::InvalidTimeout)
        } else {
            Ok(())
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: MIN_CONNECTIONS,
            max_connections: MAX_CONNECTIONS,
            acquire_timeout_secs: ACQUIRE_TIMEOUT_SECS,
            idle_timeout_secs: IDLE_TIMEOUT_SECS,
            max_lifetime_secs: MAX_LIFETIME_SECS,
        }
    }
}

fn min_connections() -> u32 {
    MIN_CONNECTIONS
}

fn max_connections() -> u32 {
    MAX_CONNECTIONS
}

fn acquire_timeout_secs() -> u64 {
    ACQUIRE_TIMEOUT_SECS
}

fn idle_timeout_secs() -> u64 {
    IDLE_TIMEOUT_SECS
}

fn max_lifetime_secs() -> u64 {
    MAX_LIFETIME_SECS
}
