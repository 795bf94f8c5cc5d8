use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

const DEFAULT_STORE_PATH: &str = "data/resumeProfiles.json";
const DEFAULT_STORE_KEY: &str = "resumeProfiles";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Which persistence backend holds the candidate blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    File,
    Redis,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "file" => Ok(StoreBackend::File),
            "redis" => Ok(StoreBackend::Redis),
            other => Err(anyhow!(
                "STORE_BACKEND must be one of memory, file, redis (got '{other}')"
            )),
        }
    }
}

/// Application configuration loaded from environment variables.
///
/// A missing model API key only fails the requests that need the model.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub store_backend: StoreBackend,
    pub store_path: PathBuf,
    pub store_key: String,
    pub redis_url: Option<String>,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let store_backend = optional_env("STORE_BACKEND")
            .map(|v| v.parse::<StoreBackend>())
            .transpose()?
            .unwrap_or(StoreBackend::File);

        let redis_url = optional_env("REDIS_URL");
        if store_backend == StoreBackend::Redis && redis_url.is_none() {
            return Err(anyhow!(
                "Required environment variable 'REDIS_URL' is not set (STORE_BACKEND=redis)"
            ));
        }

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            store_backend,
            store_path: optional_env("STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
            store_key: optional_env("STORE_KEY").unwrap_or_else(|| DEFAULT_STORE_KEY.to_string()),
            redis_url,
            max_upload_bytes: match optional_env("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a positive integer")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// In-memory configuration with no credentials, used by tests.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            anthropic_api_key: None,
            store_backend: StoreBackend::Memory,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            store_key: DEFAULT_STORE_KEY.to_string(),
            redis_url: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

/// Reads an env var, treating empty values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
