#![forbid(unsafe_code)]

//! Tunable panel behavior as data.
//!
//! [`CollapseConfig`] gathers the spring profile, the deep-link immediate
//! window, and the viewport breakpoints. With the `config` feature (on by
//! default) it loads from TOML or JSON; every field is optional and falls
//! back to the built-in value.
//!
//! ```toml
//! immediate_window_ms = 1000
//!
//! [spring]
//! tension = 250.0
//! friction = 32.0
//! clamp = true
//!
//! [breakpoints]
//! medium = 600
//! wide = 960
//! ```

#[cfg(feature = "config")]
use std::path::Path;

use fold_core::animation::SpringConfig;
use fold_core::breakpoint::Breakpoints;
use web_time::Duration;

/// Built-in length of the deep-link immediate window.
pub const DEFAULT_IMMEDIATE_WINDOW_MS: u64 = 1000;

/// Panel configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CollapseConfig {
    /// How long a deep-linked panel snaps instead of animating.
    pub immediate_window_ms: u64,
    /// Height transition profile.
    pub spring: SpringConfig,
    /// Widths at which content is re-measured.
    pub breakpoints: Breakpoints,
}

impl Default for CollapseConfig {
    fn default() -> Self {
        Self {
            immediate_window_ms: DEFAULT_IMMEDIATE_WINDOW_MS,
            spring: SpringConfig::default(),
            breakpoints: Breakpoints::default(),
        }
    }
}

impl CollapseConfig {
    /// Immediate window as a duration.
    #[must_use]
    pub fn immediate_window(&self) -> Duration {
        Duration::from_millis(self.immediate_window_ms)
    }

    /// Problems with the configured values; empty when valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(self.spring.tension.is_finite() && self.spring.tension > 0.0) {
            errors.push(format!(
                "spring.tension must be positive, got {}",
                self.spring.tension
            ));
        }
        if !(self.spring.friction.is_finite() && self.spring.friction >= 0.0) {
            errors.push(format!(
                "spring.friction must be non-negative, got {}",
                self.spring.friction
            ));
        }
        if self.immediate_window_ms == 0 {
            errors.push("immediate_window_ms must be greater than zero".to_owned());
        }
        if self.breakpoints.medium >= self.breakpoints.wide {
            errors.push(format!(
                "breakpoints.medium ({}) must be below breakpoints.wide ({})",
                self.breakpoints.medium, self.breakpoints.wide
            ));
        }
        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.checked()
    }

    /// Serialize to TOML.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    #[cfg(feature = "config")]
    fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}

/// Failure to load a [`CollapseConfig`].
#[cfg(feature = "config")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The TOML did not parse or did not match the schema.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// TOML serialization failed.
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    /// The JSON did not parse or did not match the schema.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Parsed values are out of range.
    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}
