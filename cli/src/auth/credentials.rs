//! Secure credential storage using the operating system keyring.
//!
//! This module provides platform-specific secure storage for the API key
//! issued by a successful browser login:
//! - macOS: Keychain
//! - Linux: Secret Service (GNOME Keyring, `KWallet`)
//! - Windows: Credential Manager
//!
//! Credentials are stored as JSON in the keyring under a service-specific key.

use std::fmt;

use chrono::{DateTime, Utc};
use keyring::Entry;
use serde::{Deserialize, Serialize};

use crate::error::{CrestError, Result};

const SERVICE_NAME: &str = "dev.crestml.cli";
const CREDENTIALS_KEY: &str = "api_credentials";

/// What the setup command persists after a successful login.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoredCredentials {
    /// The long-lived API key. Sensitive: redacted from debug output.
    pub api_key: String,
    /// Display label for the credential's owner, if the server sent one.
    pub workspace: Option<String>,
    /// Server the key was issued by.
    pub host: String,
    /// Port of that server.
    pub port: u16,
    /// When the login completed.
    pub acquired_at: DateTime<Utc>,
}

impl fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredentials")
            .field("api_key", &"<redacted>")
            .field("workspace", &self.workspace)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("acquired_at", &self.acquired_at)
            .finish()
    }
}

/// Secure credential storage backed by the OS keyring.
pub struct CredentialStore {
    entry: Entry,
}

impl CredentialStore {
    /// Creates a new credential store instance.
    ///
    /// # Errors
    ///
    /// Returns [`CrestError::CredentialStorage`] if the keyring entry cannot
    /// be created, which may occur if the keyring service is unavailable or
    /// locked.
    pub fn new() -> Result<Self> {
        let entry = Entry::new(SERVICE_NAME, CREDENTIALS_KEY)
            .map_err(|e| CrestError::CredentialStorage(e.to_string()))?;
        Ok(Self { entry })
    }

    /// Saves credentials to secure storage.
    ///
    /// Serializes the credentials to JSON and stores them in the OS keyring.
    /// Overwrites any previously stored credentials.
    pub fn save(&self, creds: &StoredCredentials) -> Result<()> {
        let json = serde_json::to_string(creds)?;
        self.entry
            .set_password(&json)
            .map_err(|e| CrestError::CredentialStorage(e.to_string()))?;
        Ok(())
    }

    /// Loads credentials from secure storage.
    ///
    /// Returns `None` if no credentials are stored.
    ///
    /// # Errors
    ///
    /// Returns [`CrestError::InvalidCredentials`] if stored data cannot be
    /// parsed, or [`CrestError::CredentialStorage`] if the keyring is
    /// inaccessible.
    pub fn load(&self) -> Result<Option<StoredCredentials>> {
        match self.entry.get_password() {
            Ok(json) => {
                let creds: StoredCredentials =
                    serde_json::from_str(&json).map_err(|_| CrestError::InvalidCredentials)?;
                Ok(Some(creds))
            },
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CrestError::CredentialStorage(e.to_string())),
        }
    }

    /// Checks whether any credentials are stored.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.entry.get_password().is_ok()
    }

    /// Deletes stored credentials from the keyring.
    ///
    /// No-op if no credentials are stored.
    pub fn delete(&self) -> Result<()> {
        match self.entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(CrestError::CredentialStorage(e.to_string())),
        }
    }
}
