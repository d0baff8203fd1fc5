//! Types for one browser-login attempt.

use std::fmt;

/// One in-flight authentication session, as issued by the server.
///
/// A session is single-use: it is created at the start of a flow, lives in
/// memory until the flow reaches a terminal outcome, and is never reused
/// across two attempts.
#[derive(Clone)]
pub struct AuthSession {
    /// Opaque session identifier; addresses the wait endpoint.
    pub flow_id: String,
    /// Capability secret proving ownership of the session. Sent with every
    /// wait request, never persisted, never logged.
    pub wait_secret: String,
    /// URL the user must visit to complete login. Single-use, display-only.
    pub web_url: String,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The wait secret authorizes polling for this session; keep it out
        // of debug output and logs.
        f.debug_struct("AuthSession")
            .field("flow_id", &self.flow_id)
            .field("wait_secret", &"<redacted>")
            .field("web_url", &self.web_url)
            .finish()
    }
}

/// Terminal outcome of a successful flow.
///
/// Exclusively owned by the caller once returned; the flow keeps no copy.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthResult {
    /// The long-lived API key issued after the user logged in.
    pub api_key: String,
    /// Display label for the credential's owner, if the server sent one.
    pub workspace: Option<String>,
}

impl fmt::Debug for AuthResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResult")
            .field("api_key", &"<redacted>")
            .field("workspace", &self.workspace)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secrets() {
        let session = AuthSession {
            flow_id: "flow-1".to_string(),
            wait_secret: "super-secret".to_string(),
            web_url: "https://example.test/login".to_string(),
        };
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("flow-1"));

        let result = AuthResult {
            api_key: "key-material".to_string(),
            workspace: Some("alice".to_string()),
        };
        let rendered = format!("{result:?}");
        assert!(!rendered.contains("key-material"));
        assert!(rendered.contains("alice"));
    }
}
