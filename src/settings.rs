use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "privacy_sweep";
const ENV_PREFIX: &str = "PRIVACY_SWEEP";
const PROFILE_FILE: &str = ".pdr_scanner.json";

/// Runtime settings: defaults, then the config file, then `PRIVACY_SWEEP_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub timeout_secs: f64,
    pub delay_secs: f64,
    pub profile_path: Option<PathBuf>,
    pub user_agent: Option<String>,
}

impl Settings {
    /// Load from `path` (must exist) or from an optional `privacy_sweep.{toml,json,..}` in the cwd.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let builder = Config::builder()
            .set_default("timeout_secs", 15.0)?
            .set_default("delay_secs", 2.0)?;
        let builder = match path {
            Some(p) => builder.add_source(File::from(p).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };
        builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")
    }

    pub fn timeout(&self) -> Duration {
        secs(self.timeout_secs)
    }

    pub fn delay(&self) -> Duration {
        secs(self.delay_secs)
    }

    /// Saved-profile location; `$HOME/.pdr_scanner.json` unless configured.
    pub fn profile_path(&self) -> PathBuf {
        self.profile_path.clone().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_default()
                .join(PROFILE_FILE)
        })
    }
}

/// Negative, NaN or infinite values collapse to zero.
pub fn secs(value: f64) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::from_secs_f64(value)
    } else {
        Duration::ZERO
    }
}
