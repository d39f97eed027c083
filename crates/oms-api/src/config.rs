//! # Configuration
//!
//! Environment-driven settings for the API process.
//!
//! | Variable               | Default   |
//! |------------------------|-----------|
//! | `OMS_PORT`             | `8080`    |
//! | `OMS_BODY_LIMIT_BYTES` | `2097152` |
//! | `OMS_LOG_FORMAT`       | `pretty`  |
//!
//! Log filtering itself follows `RUST_LOG` through `EnvFilter`.

use std::str::FromStr;

use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub body_limit_bytes: usize,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            body_limit_bytes: DEFAULT_BODY_LIMIT,
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary lookup; unset variables fall
    /// back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            port: parse_var(&lookup, "OMS_PORT", defaults.port)?,
            body_limit_bytes: parse_var(&lookup, "OMS_BODY_LIMIT_BYTES", defaults.body_limit_bytes)?,
            log_format: parse_var(&lookup, "OMS_LOG_FORMAT", defaults.log_format)?,
        })
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            })
        }
    }
}
