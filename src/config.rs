//! Application configuration.
//!
//! Values are resolved with priority: config.toml > environment (.env) > default.

use serde::Deserialize;
use std::path::PathBuf;

// ==================== Config File ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct AppConfig {
    server: Option<ServerConfig>,
    data: Option<DataConfig>,
    session: Option<SessionConfig>,
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
    addr: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct DataConfig {
    dir: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionConfig {
    expiry_hours: Option<i64>,
}

/// Resolved runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_addr: String,
    pub server_port: u16,
    pub data_dir: PathBuf,
    pub session_expiry_hours: i64,
}

impl Settings {
    /// Get the full server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_addr, self.server_port)
    }
}

/// Load settings from config.toml, the environment and defaults.
pub fn load() -> Settings {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let file_config = match std::fs::read_to_string(CONFIG_FILE) {
        Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring malformed {}: {}", CONFIG_FILE, e);
                AppConfig::default()
            }
        },
        Err(_) => AppConfig::default(),
    };

    resolve(file_config, |key| std::env::var(key).ok())
}

fn resolve(config: AppConfig, env: impl Fn(&str) -> Option<String>) -> Settings {
    let server_addr = config
        .server
        .as_ref()
        .and_then(|s| s.addr.clone())
        .or_else(|| env("SERVER_ADDR"))
        .unwrap_or_else(|| SERVER_ADDR.to_string());

    let server_port = config
        .server
        .as_ref()
        .and_then(|s| s.port)
        .or_else(|| env("PORT").and_then(|p| p.parse().ok()))
        .unwrap_or(SERVER_PORT);

    let data_dir = match config.data.and_then(|d| d.dir) {
        Some(dir) => {
            tracing::info!("Using data directory from {}: {}", CONFIG_FILE, dir);
            PathBuf::from(dir)
        }
        None => match env("DATA_DIR") {
            Some(dir) => {
                tracing::info!("Using data directory from DATA_DIR env: {}", dir);
                PathBuf::from(dir)
            }
            None => PathBuf::from(DEFAULT_DATA_DIR),
        },
    };

    let session_expiry_hours = config
        .session
        .and_then(|s| s.expiry_hours)
        .or_else(|| env("SESSION_EXPIRY_HOURS").and_then(|h| h.parse().ok()))
        .unwrap_or(SESSION_EXPIRY_HOURS);

    Settings {
        server_addr,
        server_port,
        data_dir,
        session_expiry_hours,
    }
}

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "config.toml";

/// Default data directory
pub const DEFAULT_DATA_DIR: &str = "data";

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const SERVER_PORT: u16 = 5000;

/// Static assets directory, relative to the working directory
pub const STATIC_DIR: &str = "static";

/// Largest accepted dataset upload
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

// ==================== Session Configuration ====================

/// Idle session lifetime in hours (1 week)
pub const SESSION_EXPIRY_HOURS: i64 = 24 * 7;

/// Probability threshold for session cleanup (0-255, lower = more frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

// ==================== Map Configuration ====================

/// Initial map centre (latitude, longitude)
pub const MAP_CENTER: (f64, f64) = (-10.0, 25.0);

/// Initial map zoom level
pub const MAP_ZOOM: u8 = 3;

/// Placeholder marker for row i sits at origin + i * step
pub const MARKER_ORIGIN: (f64, f64) = (-10.0, 20.0);
pub const MARKER_STEP: (f64, f64) = (2.0, 3.0);
