//! Error types for playback settings

use thiserror::Error;

/// Settings errors
///
/// Transitions on the playback state never fail; only loading the
/// persisted settings can.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Configuration source could not be read or deserialized
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    /// A value is outside its accepted range
    #[error("Invalid setting {key}: {reason}")]
    Invalid {
        /// Setting name
        key: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Result type for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;
