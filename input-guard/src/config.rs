use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Input pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Largest markup payload the sanitizer accepts, in bytes (default: 2 MiB)
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,

    /// Characters of offending content echoed back in errors (default: 100)
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: default_max_input_bytes(),
            preview_chars: default_preview_chars(),
        }
    }
}

impl GuardConfig {
    pub const MAX_INPUT_BYTES_VAR: &'static str = "INPUT_GUARD_MAX_INPUT_BYTES";
    pub const PREVIEW_CHARS_VAR: &'static str = "INPUT_GUARD_PREVIEW_CHARS";

    /// Load from `INPUT_GUARD_*` environment variables, falling back to the
    /// defaults for anything unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            max_input_bytes: env_or(Self::MAX_INPUT_BYTES_VAR, default_max_input_bytes()),
            preview_chars: env_or(Self::PREVIEW_CHARS_VAR, default_preview_chars()),
        }
    }
}

fn env_or<T>(var: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(var, value = %raw, fallback = %default, "Ignoring invalid input guard setting");
            default
        }),
        Err(_) => default,
    }
}

fn default_max_input_bytes() -> usize {
    2 * 1024 * 1024
}

fn default_preview_chars() -> usize {
    100
}
