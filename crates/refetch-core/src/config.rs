use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::retry::{DEFAULT_DELAY_STEP, DEFAULT_MAX_RETRIES};

/// Default legacy API base (v1, used for writes and mod ops).
pub const DEFAULT_API_V1: &str = "https://fdapilive.ilovefreegle.org/api";
/// Default fast read API base (v2).
pub const DEFAULT_API_V2: &str = "https://api.ilovefreegle.org/apiv2";

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the original attempt.
    pub max_retries: u32,
    /// Backoff step in milliseconds; retry N waits N steps.
    pub delay_step_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay_step_ms: DEFAULT_DELAY_STEP.as_millis() as u64,
        }
    }
}

/// Per-request transport limits (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
            user_agent: concat!("refetch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// API endpoints and client identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub api_v1: String,
    pub api_v2: String,
    /// Reported to the v1 API as the `app` flag.
    pub app: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_v1: DEFAULT_API_V1.to_string(),
            api_v2: DEFAULT_API_V2.to_string(),
            app: false,
        }
    }
}

/// Global configuration loaded from `~/.config/refetch/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefetchConfig {
    #[serde(default)]
    pub api: ApiConfig,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Optional transport limits; if missing, built-in defaults are used.
    #[serde(default)]
    pub transport: Option<TransportConfig>,
}

impl RefetchConfig {
    pub fn retry_or_default(&self) -> RetryConfig {
        self.retry.clone().unwrap_or_default()
    }

    pub fn transport_or_default(&self) -> TransportConfig {
        self.transport.clone().unwrap_or_default()
    }

    /// Apply `IZNIK_API_V1` / `IZNIK_API_V2` from the environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(v) = get("IZNIK_API_V1").filter(|v| !v.trim().is_empty()) {
            self.api.api_v1 = v;
        }
        if let Some(v) = get("IZNIK_API_V2").filter(|v| !v.trim().is_empty()) {
            self.api.api_v2 = v;
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("refetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
/// Environment overrides are applied on top.
pub fn load_or_init() -> Result<RefetchConfig> {
    let mut cfg = load_or_init_at(&config_path()?)?;
    cfg.apply_env_overrides();
    Ok(cfg)
}

/// Like `load_or_init` for an explicit path, without environment overrides.
pub fn load_or_init_at(path: &Path) -> Result<RefetchConfig> {
    if !path.exists() {
        let default_cfg = RefetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: RefetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_values() {
        let cfg = RefetchConfig::default();
        assert_eq!(cfg.api.api_v1, DEFAULT_API_V1);
        assert_eq!(cfg.api.api_v2, DEFAULT_API_V2);
        assert!(!cfg.api.app);
        let retry = cfg.retry_or_default();
        assert_eq!(retry.max_retries, 10);
        assert_eq!(retry.delay_step_ms, 1000);
        assert_eq!(cfg.transport_or_default().connect_timeout_secs, 15);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg: RefetchConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, RefetchConfig::default());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            [api]
            api_v1 = "http://localhost:8181/api"
            app = true

            [retry]
            max_retries = 3
            delay_step_ms = 50

            [transport]
            connect_timeout_secs = 2
            timeout_secs = 5
            user_agent = "test-agent"
        "#;
        let cfg: RefetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.api.api_v1, "http://localhost:8181/api");
        assert_eq!(cfg.api.api_v2, DEFAULT_API_V2);
        assert!(cfg.api.app);
        let retry = cfg.retry.as_ref().unwrap();
        assert_eq!(retry.max_retries, 3);
        assert_eq!(retry.delay_step_ms, 50);
        assert_eq!(cfg.transport.as_ref().unwrap().user_agent, "test-agent");
    }

    #[test]
    fn env_overrides_replace_api_bases() {
        let env: HashMap<&str, &str> = [
            ("IZNIK_API_V1", "http://dev/api"),
            ("IZNIK_API_V2", "  "),
        ]
        .into_iter()
        .collect();
        let mut cfg = RefetchConfig::default();
        cfg.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.api.api_v1, "http://dev/api");
        assert_eq!(cfg.api.api_v2, DEFAULT_API_V2);
    }

    #[test]
    fn load_or_init_writes_default_then_reads_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let created = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        let loaded = load_or_init_at(&path).unwrap();
        assert_eq!(created, loaded);
    }
}
