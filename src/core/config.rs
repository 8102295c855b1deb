//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.hamsi/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::core::mode::ModeId;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HamsiConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_mode: Option<ModeId>,
    pub reply_delay_ms: Option<u64>,
    pub rng_seed: Option<u64>,
    pub log_level: Option<String>,
}

/// Values given on the command line (None = flag not passed).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub mode: Option<ModeId>,
    pub reply_delay_ms: Option<u64>,
    pub rng_seed: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REPLY_DELAY_MS: u64 = 1000;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub default_mode: ModeId,
    pub reply_delay: Duration,
    pub rng_seed: Option<u64>,
    pub log_level: LevelFilter,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            default_mode: ModeId::default(),
            reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
            rng_seed: None,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.hamsi/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".hamsi").join("config.toml"))
}

/// Load config from `~/.hamsi/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HamsiConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<HamsiConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(HamsiConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<HamsiConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(HamsiConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: HamsiConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Hamsi Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_mode = "casual"     # "casual", "formal" or "technical"
# reply_delay_ms = 1000       # How long the assistant "types" before replying
# rng_seed = 42               # Fix lead-in choice for reproducible runs
# log_level = "debug"         # "error", "warn", "info", "debug", "trace", "off"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_TEMPLATE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &HamsiConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &HamsiConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Mode: CLI → env → config → default
    let default_mode = cli
        .mode
        .or_else(|| env_parsed(&env, "HAMSI_MODE"))
        .or(config.general.default_mode)
        .unwrap_or_default();

    // Reply delay: CLI → env → config → default
    let reply_delay_ms = cli
        .reply_delay_ms
        .or_else(|| env_parsed(&env, "HAMSI_REPLY_DELAY_MS"))
        .or(config.general.reply_delay_ms)
        .unwrap_or(DEFAULT_REPLY_DELAY_MS);

    // Seed: CLI → env → config → entropy
    let rng_seed = cli
        .rng_seed
        .or_else(|| env_parsed(&env, "HAMSI_SEED"))
        .or(config.general.rng_seed);

    // Log level: env → config → default
    let log_level: LevelFilter = env_parsed(&env, "HAMSI_LOG_LEVEL")
        .or_else(|| {
            config.general.log_level.as_deref().and_then(|level| {
                level
                    .parse::<LevelFilter>()
                    .inspect_err(|_| warn!("Ignoring invalid log_level in config: {}", level))
                    .ok()
            })
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        default_mode,
        reply_delay: Duration::from_millis(reply_delay_ms),
        rng_seed,
        log_level,
    }
}

/// Reads and parses an env var. Invalid values are logged and ignored.
fn env_parsed<T: std::str::FromStr>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = env(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_parses() {
        let config = HamsiConfig::default();
        assert!(config.general.default_mode.is_none());
        assert!(config.general.reply_delay_ms.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&HamsiConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved, ResolvedConfig::default());
        assert_eq!(resolved.reply_delay, Duration::from_millis(1000));
        assert_eq!(resolved.default_mode, ModeId::Casual);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = HamsiConfig {
            general: GeneralConfig {
                default_mode: Some(ModeId::Formal),
                reply_delay_ms: Some(250),
                rng_seed: Some(42),
                log_level: Some("warn".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.default_mode, ModeId::Formal);
        assert_eq!(resolved.reply_delay, Duration::from_millis(250));
        assert_eq!(resolved.rng_seed, Some(42));
        assert_eq!(resolved.log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_env_overrides_config() {
        let config = HamsiConfig {
            general: GeneralConfig {
                default_mode: Some(ModeId::Formal),
                reply_delay_ms: Some(250),
                ..Default::default()
            },
        };
        let env = env_from(&[("HAMSI_MODE", "technical"), ("HAMSI_REPLY_DELAY_MS", "10")]);
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.default_mode, ModeId::Technical);
        assert_eq!(resolved.reply_delay, Duration::from_millis(10));
    }

    #[test]
    fn test_cli_wins_over_env() {
        let cli = CliOverrides {
            mode: Some(ModeId::Casual),
            reply_delay_ms: Some(5),
            rng_seed: Some(1),
        };
        let env = env_from(&[("HAMSI_MODE", "formal"), ("HAMSI_SEED", "9")]);
        let resolved = resolve_with_env(&HamsiConfig::default(), &cli, env);
        assert_eq!(resolved.default_mode, ModeId::Casual);
        assert_eq!(resolved.reply_delay, Duration::from_millis(5));
        assert_eq!(resolved.rng_seed, Some(1));
    }

    #[test]
    fn test_invalid_env_value_is_ignored() {
        let config = HamsiConfig {
            general: GeneralConfig {
                default_mode: Some(ModeId::Formal),
                ..Default::default()
            },
        };
        let env = env_from(&[("HAMSI_MODE", "spanish"), ("HAMSI_REPLY_DELAY_MS", "soon")]);
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.default_mode, ModeId::Formal);
        assert_eq!(resolved.reply_delay, Duration::from_millis(DEFAULT_REPLY_DELAY_MS));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[general]
default_mode = "technical"
"#;
        let config: HamsiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_mode, Some(ModeId::Technical));
        assert!(config.general.reply_delay_ms.is_none());
        assert!(config.general.rng_seed.is_none());
    }

    #[test]
    fn test_unknown_mode_in_toml_is_parse_error() {
        let toml_str = r#"
[general]
default_mode = "spanish"
"#;
        assert!(toml::from_str::<HamsiConfig>(toml_str).is_err());
    }

    #[test]
    fn test_generated_template_is_valid_toml() {
        let config: HamsiConfig = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert!(config.general.default_mode.is_none());
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = std::env::temp_dir().join(format!("hamsi-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.general.default_mode.is_none());
        assert!(path.exists());

        fs::write(&path, "[general]\nreply_delay_ms = 20\n").unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.general.reply_delay_ms, Some(20));

        fs::write(&path, "[general\n").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(dir);
    }
}
