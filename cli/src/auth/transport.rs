//! Wire transport for the token-flow endpoints.
//!
//! The flow itself is transport-agnostic: it drives a [`FlowTransport`],
//! and [`HttpFlowTransport`] is the production implementation speaking the
//! platform's JSON-over-HTTPS protocol.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::auth::error::TransportError;
use crate::auth::session::AuthSession;
use crate::error::Result;

/// Request timeout for session creation. Kept short and independent of the
/// overall flow budget so a hung creation call cannot silently consume it.
const CREATE_TIMEOUT: Duration = Duration::from_secs(10);

/// How long the server is asked to hold each wait request open, in seconds.
const SERVER_WAIT_SECS: u64 = 40;

/// Request timeout for wait requests, slightly above the server's own wait
/// window to allow for network latency.
const WAIT_REQUEST_TIMEOUT: Duration = Duration::from_secs(SERVER_WAIT_SECS + 5);

/// One wait-endpoint reply, prior to classification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitReply {
    /// `true` means the server's wait window lapsed with no decision yet;
    /// the caller should poll again.
    #[serde(default)]
    pub timeout: bool,
    /// The issued API key, present iff the login completed.
    pub api_key: Option<String>,
    /// Display label for the credential's owner, if any.
    pub workspace_username: Option<String>,
}

/// Transport seam for the token-flow endpoints (enables mocking).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FlowTransport: Send + Sync {
    /// Creates a new server-side authentication session.
    async fn create_session(&self) -> std::result::Result<AuthSession, TransportError>;

    /// Asks the server for the session's result, blocking server-side for
    /// up to its wait window before replying.
    async fn wait_for_result(
        &self,
        session: &AuthSession,
    ) -> std::result::Result<WaitReply, TransportError>;
}

/// HTTPS implementation of [`FlowTransport`].
pub struct HttpFlowTransport {
    client: Client,
    base_url: Url,
}

impl HttpFlowTransport {
    /// Creates a transport for the platform API at the given host and port.
    pub fn for_host(host: &str, port: u16) -> Result<Self> {
        let base_url = Url::parse(&format!("https://{host}:{port}/api/"))?;
        Ok(Self::new(base_url)?)
    }

    /// Creates a transport against an explicit base URL.
    pub fn new(mut base_url: Url) -> std::result::Result<Self, TransportError> {
        // join() treats the last path segment as a file unless the base
        // ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(format!("crest-cli/{}", env!("CARGO_PKG_VERSION")))
            // The flow runs before any trust material has been provisioned,
            // so certificate verification is off for this exchange only.
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|e| TransportError::Protocol(format!("invalid endpoint URL: {e}")))
    }
}

#[async_trait]
impl FlowTransport for HttpFlowTransport {
    async fn create_session(&self) -> std::result::Result<AuthSession, TransportError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct CreateFlowResponse {
            flow_id: String,
            wait_secret: String,
            web_url: String,
        }

        let url = self.endpoint("token-flow/create")?;
        let response = self
            .client
            .post(url)
            .timeout(CREATE_TIMEOUT)
            .send()
            .await?;
        let response = check_status(response).await?;

        let body: CreateFlowResponse = response
            .json()
            .await
            .map_err(|e| TransportError::Protocol(e.to_string()))?;

        Ok(AuthSession {
            flow_id: body.flow_id,
            wait_secret: body.wait_secret,
            web_url: body.web_url,
        })
    }

    async fn wait_for_result(
        &self,
        session: &AuthSession,
    ) -> std::result::Result<WaitReply, TransportError> {
        let url = self.endpoint(&format!("token-flow/wait/{}", session.flow_id))?;
        let server_wait = SERVER_WAIT_SECS.to_string();

        let response = self
            .client
            .get(url)
            .query(&[
                ("wait_secret", session.wait_secret.as_str()),
                ("timeout", server_wait.as_str()),
            ])
            .timeout(WAIT_REQUEST_TIMEOUT)
            .send()
            .await?;
        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| TransportError::Protocol(e.to_string()))
    }
}

/// Maps non-success statuses to [`TransportError::Status`].
async fn check_status(
    response: reqwest::Response,
) -> std::result::Result<reqwest::Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(TransportError::Status {
        status: status.as_u16(),
        message,
    })
}
