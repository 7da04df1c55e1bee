use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Feature columns analysed when `FEATURE_COLUMNS` is not set.
const DEFAULT_FEATURE_COLUMNS: &str = "Metascore,Userscore,Year,Rank,\
Positive %,Mixed %,Negative %,NA_Sales,Global_Sales,User_Count";

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            data: DataConfig::from_env(),
        }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  server:  host={}, port={}", self.server.host, self.server.port);
        tracing::info!("  data:    csv_path={}", self.data.csv_path.display());
        tracing::info!("  data:    {} feature columns, max_k={}", self.data.feature_columns.len(), self.data.max_k);
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "127.0.0.1"),
            port: env_u16("PORT", 5001),
        }
    }
}

// ── Data ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub csv_path: PathBuf,
    /// Numeric columns standardized and fed to PCA/clustering.
    pub feature_columns: Vec<String>,
    /// Upper bound of the cluster-count search range.
    pub max_k: usize,
}

impl DataConfig {
    fn from_env() -> Self {
        let columns = env_or("FEATURE_COLUMNS", DEFAULT_FEATURE_COLUMNS);
        Self {
            csv_path: PathBuf::from(env_or("CSV_PATH", "games.csv")),
            feature_columns: columns
                .split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
            max_k: env_usize("MAX_K", 10),
        }
    }
}
