//! Error types and result aliases for the Crest CLI.
//!
//! Each variant carries a user-friendly message with actionable recovery
//! steps. Flow-specific failures live in [`crate::auth::error`] and are
//! folded in transparently.

use thiserror::Error;

use crate::auth::error::{FlowError, TransportError};

/// Main error type for Crest CLI operations.
#[derive(Error, Debug)]
pub enum CrestError {
    /// Stored credentials are malformed or corrupted.
    #[error("Invalid credentials. Your stored credentials may be corrupted. Run 'crest auth logout' then 'crest setup'.")]
    InvalidCredentials,

    /// The browser-login flow reached a terminal failure.
    #[error(transparent)]
    Auth(#[from] FlowError),

    /// HTTP-level failure outside the flow itself.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Failed to access the OS keyring.
    #[error("Failed to access credential storage: {0}. Ensure your system keyring is unlocked.")]
    CredentialStorage(String),

    /// General configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}. Check file permissions and format.")]
    ConfigRead(String),

    /// Failed to write configuration file.
    #[error("Failed to write configuration file: {0}. Check directory permissions.")]
    ConfigWrite(String),

    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON or TOML serialization/deserialization failed.
    #[error("Data serialization error: {0}. This may indicate corrupted data.")]
    Serialization(String),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl CrestError {
    /// Checks if this error can be resolved by running `crest setup` again.
    #[allow(dead_code)] // Kept for future use in main error handler
    #[must_use]
    pub const fn requires_setup(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::Auth(FlowError::TimedOut { .. })
        )
    }
}

/// Result type alias using [`CrestError`].
pub type Result<T> = std::result::Result<T, CrestError>;

impl From<serde_json::Error> for CrestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("JSON error: {err}"))
    }
}

impl From<toml::de::Error> for CrestError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigRead(format!("TOML parse error: {err}"))
    }
}

impl From<toml::ser::Error> for CrestError {
    fn from(err: toml::ser::Error) -> Self {
        Self::ConfigWrite(format!("TOML serialize error: {err}"))
    }
}

impl From<keyring::Error> for CrestError {
    fn from(err: keyring::Error) -> Self {
        Self::CredentialStorage(err.to_string())
    }
}
