use serde::Deserialize;

pub const DEFAULT_NAME_LENGTH: usize = 32;
pub const DEFAULT_NAME_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// Controls the shape of names produced by
/// [`generate_random_name_with`](crate::services::fs::utils::generate_random_name_with).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NameConfig {
    pub length: usize,
    pub alphabet: String,
}

impl Default for NameConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_NAME_LENGTH,
            alphabet: DEFAULT_NAME_ALPHABET.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset or unparsable.
    pub default_directive: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_directive: "info".to_string(),
        }
    }
}
