//! Server Settings
//!
//! Layered configuration: built-in defaults, then an optional
//! `signal-preview.toml`, then `SIGNAL_PREVIEW_*` environment overrides.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use signal_table::Limits;

/// Typed server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Address the server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Shared demo access code, set per recipient. Compared in process and
    /// never logged.
    #[serde(default = "default_access_code")]
    pub access_code: String,

    /// Sampling rate assumed for uploaded signals (Hz); not caller-tunable
    #[serde(default = "default_sample_rate_hz")]
    pub sample_rate_hz: f64,

    /// Upload ceilings, fixed for the life of the process
    #[serde(default)]
    pub limits: Limits,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_access_code() -> String {
    "Demo2025".to_string()
}

fn default_sample_rate_hz() -> f64 {
    256.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            access_code: default_access_code(),
            sample_rate_hz: default_sample_rate_hz(),
            limits: Limits::default(),
        }
    }
}

impl Settings {
    /// Load settings from file and environment, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("signal-preview").required(false))
            .add_source(Environment::with_prefix("SIGNAL_PREVIEW").separator("__"))
            .build()?
            .try_deserialize()
    }
}
