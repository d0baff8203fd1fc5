//! Authentication module for the Crest CLI.
//!
//! This module owns the browser-login token flow (session creation, user
//! hand-off, polling) and secure storage of the resulting API key.

pub mod credentials;
pub mod error;
pub mod flow;
pub mod session;
pub mod transport;

pub use credentials::{CredentialStore, StoredCredentials};
pub use error::{FlowError, TransportError};
pub use flow::TokenFlow;
pub use session::{AuthResult, AuthSession};
pub use transport::{FlowTransport, HttpFlowTransport};
