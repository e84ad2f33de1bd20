//! Config loader — reads `~/.murmur/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.murmur/config.json`
//! 3. Environment variables (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    // Ensure parent directory exists
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Supported overrides:
/// - `OPENAI_API_KEY` → `openai.api_key` (the provider's conventional var)
/// - `MURMUR_OPENAI__API_KEY` → `openai.api_key` (wins over `OPENAI_API_KEY`)
/// - `MURMUR_OPENAI__API_BASE` → `openai.api_base`
/// - `MURMUR_MODELS__CHAT` → `models.chat`
/// - `MURMUR_MODELS__SPEECH` → `models.speech`
/// - `MURMUR_MODELS__TRANSCRIPTION` → `models.transcription`
/// - `MURMUR_MODELS__VOICE` → `models.voice`
/// - `MURMUR_TIMING` → `timing` ("1" or "true")
fn apply_env_overrides(mut config: Config) -> Config {
    // Credentials
    if let Ok(val) = std::env::var("OPENAI_API_KEY") {
        config.openai.api_key = val;
    }
    if let Ok(val) = std::env::var("MURMUR_OPENAI__API_KEY") {
        config.openai.api_key = val;
    }
    if let Ok(val) = std::env::var("MURMUR_OPENAI__API_BASE") {
        config.openai.api_base = Some(val);
    }

    // Model defaults
    if let Ok(val) = std::env::var("MURMUR_MODELS__CHAT") {
        config.models.chat = val;
    }
    if let Ok(val) = std::env::var("MURMUR_MODELS__SPEECH") {
        config.models.speech = val;
    }
    if let Ok(val) = std::env::var("MURMUR_MODELS__TRANSCRIPTION") {
        config.models.transcription = val;
    }
    if let Ok(val) = std::env::var("MURMUR_MODELS__VOICE") {
        config.models.voice = val;
    }

    // Timing observer
    if let Ok(val) = std::env::var("MURMUR_TIMING") {
        config.timing = val == "true" || val == "1";
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
