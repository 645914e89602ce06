//! Centralized configuration (environment variables + defaults).

use crate::crypto::hashing::DigestMode;
use anyhow::{anyhow, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = "./ledger_data";
pub const DEFAULT_VERIFY_DELAY_MS: u64 = 2_000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Which key-value backend holds the `users`, `certificates` and `user` entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    File { dir: PathBuf },
    Postgres { database_url: String },
}

#[derive(Clone, Debug)]
pub struct LedgerConfig {
    pub backend: StoreBackend,
    pub verify_delay: Duration,
    pub digest_mode: DigestMode,
    pub bind_addr: SocketAddr,
}

impl LedgerConfig {
    /// Reads `.env` (if any) and the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("LEDGER_STORE")
            .unwrap_or_else(|| "file".to_string())
            .trim()
            .to_lowercase()
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            "file" => StoreBackend::File {
                dir: PathBuf::from(
                    lookup("LEDGER_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
                ),
            },
            "postgres" => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL")
                    .ok_or_else(|| anyhow!("DATABASE_URL must be set when LEDGER_STORE=postgres"))?,
            },
            other => {
                return Err(anyhow!(
                    "LEDGER_STORE must be one of memory, file, postgres (got '{}')",
                    other
                ))
            }
        };

        let verify_delay_ms = match lookup("VERIFY_DELAY_MS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("VERIFY_DELAY_MS must be a valid u64 (got '{}')", v))?,
            None => DEFAULT_VERIFY_DELAY_MS,
        };

        let digest_mode = match lookup("DIGEST_MODE") {
            Some(v) => v.parse::<DigestMode>().map_err(|e| anyhow!("DIGEST_MODE: {}", e))?,
            None => DigestMode::default(),
        };

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .with_context(|| format!("BIND_ADDR must be host:port (got '{}')", bind_raw))?;

        Ok(Self {
            backend,
            verify_delay: Duration::from_millis(verify_delay_ms),
            digest_mode,
            bind_addr,
        })
    }

    /// In-memory store, no artificial latency. Used by tests and benchmarks.
    pub fn in_memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            verify_delay: Duration::ZERO,
            digest_mode: DigestMode::default(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        }
    }
}
