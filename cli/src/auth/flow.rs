//! Browser-login flow against the platform's token-flow endpoints.
//!
//! One [`TokenFlow::start_flow`] call owns one authentication attempt end
//! to end: it creates a server-side session, hands the user to the browser,
//! then serially polls the wait endpoint until the session resolves into a
//! credential, a poll fails, or the overall time budget lapses. Polls are
//! never concurrent and a session is never reused across attempts.

use std::time::Duration;

use tokio::time::Instant;

use crate::auth::error::{FlowError, TransportError};
use crate::auth::session::{AuthResult, AuthSession};
use crate::auth::transport::{FlowTransport, WaitReply};

/// Drives one authentication attempt over an injectable transport.
pub struct TokenFlow<T> {
    transport: T,
}

/// Outcome of a single wait request.
#[derive(Debug)]
enum PollState {
    /// The server's wait window lapsed with no decision yet; poll again.
    Pending,
    /// Login completed and a credential was issued.
    Resolved(AuthResult),
}

impl<T: FlowTransport> TokenFlow<T> {
    /// Creates a flow over the given transport.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Runs one authentication attempt to its terminal outcome.
    ///
    /// Creates a session, shows the hand-off URL (and opens a browser when
    /// `launch_browser` is set), then polls until the server issues a
    /// credential. Fails with [`FlowError::Creation`] if the session cannot
    /// be established, [`FlowError::Polling`] on the first failed poll, or
    /// [`FlowError::TimedOut`] once `overall_timeout` has elapsed with the
    /// session still pending.
    pub async fn start_flow(
        &self,
        overall_timeout: Duration,
        launch_browser: bool,
    ) -> Result<AuthResult, FlowError> {
        let started = Instant::now();

        println!("Initiating browser login...");
        let session = self
            .transport
            .create_session()
            .await
            .map_err(|source| FlowError::Creation { source })?;
        tracing::debug!(flow_id = %session.flow_id, "authentication session created");

        println!();
        println!("To finish logging in, visit:");
        println!();
        println!("  {}", session.web_url);
        println!();
        if launch_browser {
            // Best effort: no browser on a headless machine is not an
            // error, the URL is already on screen.
            if open_browser(&session) {
                println!("Browser opened automatically.");
            } else {
                println!("Could not open a browser. Please visit the URL manually.");
            }
            println!();
        }

        println!("Waiting for login to complete in the browser...");
        self.poll_until_resolved(&session, started, overall_timeout)
            .await
    }

    /// Polls the wait endpoint until a terminal outcome.
    ///
    /// The deadline is checked before each request goes out; a request
    /// already in flight when the deadline passes is allowed to complete,
    /// since the transport's own request timeout caps how late it can
    /// return.
    async fn poll_until_resolved(
        &self,
        session: &AuthSession,
        started: Instant,
        overall_timeout: Duration,
    ) -> Result<AuthResult, FlowError> {
        let mut attempt: u32 = 1;

        loop {
            if started.elapsed() >= overall_timeout {
                return Err(FlowError::TimedOut {
                    waited_secs: overall_timeout.as_secs(),
                });
            }

            tracing::info!(attempt, "polling for login result");
            let reply = self
                .transport
                .wait_for_result(session)
                .await
                .map_err(|source| FlowError::Polling { source })?;

            match classify(reply)? {
                PollState::Pending => attempt += 1,
                PollState::Resolved(result) => {
                    tracing::debug!(attempts = attempt, "authentication complete");
                    return Ok(result);
                },
            }
        }
    }
}

/// Classifies one wait reply.
///
/// A reply that is neither pending nor carrying a credential is a protocol
/// violation and ends the attempt like any other polling failure.
fn classify(reply: WaitReply) -> Result<PollState, FlowError> {
    if reply.timeout {
        return Ok(PollState::Pending);
    }

    let api_key = reply.api_key.ok_or_else(|| FlowError::Polling {
        source: TransportError::Protocol("reply carried neither a timeout nor an apiKey".to_string()),
    })?;

    Ok(PollState::Resolved(AuthResult {
        api_key,
        workspace: reply.workspace_username,
    }))
}

/// Opens the hand-off URL in the default browser.
///
/// Returns `true` if a browser was launched. Failure is expected in
/// headless environments and is never escalated.
pub fn open_browser(session: &AuthSession) -> bool {
    open::that(&session.web_url).is_ok()
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::auth::transport::MockFlowTransport;

    fn test_session() -> AuthSession {
        AuthSession {
            flow_id: "flow-1".to_string(),
            wait_secret: "s3cret".to_string(),
            web_url: "https://example.test/login/flow-1".to_string(),
        }
    }

    fn pending() -> Result<WaitReply, TransportError> {
        Ok(WaitReply {
            timeout: true,
            api_key: None,
            workspace_username: None,
        })
    }

    fn resolved(key: &str) -> Result<WaitReply, TransportError> {
        Ok(WaitReply {
            timeout: false,
            api_key: Some(key.to_string()),
            workspace_username: Some("alice".to_string()),
        })
    }

    /// Scripted transport: each wait entry is (latency in seconds, reply).
    /// The latency is a real `tokio::time::sleep`, so under a paused
    /// runtime it advances the clock the flow measures its deadline with.
    struct ScriptedTransport {
        replies: Mutex<VecDeque<(Duration, Result<WaitReply, TransportError>)>>,
        wait_calls: AtomicU32,
    }

    impl ScriptedTransport {
        fn new(replies: Vec<(u64, Result<WaitReply, TransportError>)>) -> Self {
            Self {
                replies: Mutex::new(
                    replies
                        .into_iter()
                        .map(|(secs, reply)| (Duration::from_secs(secs), reply))
                        .collect(),
                ),
                wait_calls: AtomicU32::new(0),
            }
        }

        fn wait_calls(&self) -> u32 {
            self.wait_calls.load(Ordering::SeqCst)
        }

        fn unused_replies(&self) -> usize {
            self.replies.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl FlowTransport for ScriptedTransport {
        async fn create_session(&self) -> Result<AuthSession, TransportError> {
            Ok(test_session())
        }

        async fn wait_for_result(
            &self,
            _session: &AuthSession,
        ) -> Result<WaitReply, TransportError> {
            self.wait_calls.fetch_add(1, Ordering::SeqCst);
            let (latency, reply) = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("poll issued after the script ran out");
            tokio::time::sleep(latency).await;
            reply
        }
    }

    #[tokio::test(start_paused = true)]
    async fn returns_credential_after_three_pending_polls() {
        let transport = ScriptedTransport::new(vec![
            (1, pending()),
            (1, pending()),
            (1, resolved("abc123")),
        ]);
        let flow = TokenFlow::new(transport);
        let before = Instant::now();

        let result = flow
            .start_flow(Duration::from_secs(100), false)
            .await
            .unwrap();

        assert_eq!(result.api_key, "abc123");
        assert_eq!(result.workspace.as_deref(), Some("alice"));
        assert_eq!(flow.transport.wait_calls(), 3);
        assert_eq!(before.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn pending_reply_triggers_exactly_one_more_poll_without_delay() {
        let transport = ScriptedTransport::new(vec![(0, pending()), (0, resolved("k"))]);
        let flow = TokenFlow::new(transport);
        let before = Instant::now();

        flow.start_flow(Duration::from_secs(100), false)
            .await
            .unwrap();

        assert_eq!(flow.transport.wait_calls(), 2);
        // No backoff, no added delay between polls.
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn success_reply_stops_polling() {
        let transport = ScriptedTransport::new(vec![(0, resolved("k")), (0, pending())]);
        let flow = TokenFlow::new(transport);

        flow.start_flow(Duration::from_secs(100), false)
            .await
            .unwrap();

        assert_eq!(flow.transport.wait_calls(), 1);
        assert_eq!(flow.transport.unused_replies(), 1);
    }

    #[tokio::test]
    async fn creation_failure_issues_no_polls() {
        let mut transport = MockFlowTransport::new();
        transport
            .expect_create_session()
            .times(1)
            .returning(|| Err(TransportError::Unreachable));
        transport.expect_wait_for_result().times(0);
        let flow = TokenFlow::new(transport);

        let err = flow
            .start_flow(Duration::from_secs(100), false)
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::Creation { .. }));
    }

    #[tokio::test]
    async fn poll_transport_error_ends_attempt_with_budget_remaining() {
        let transport = ScriptedTransport::new(vec![
            (0, Err(TransportError::Network("reset".to_string()))),
            (0, pending()),
        ]);
        let flow = TokenFlow::new(transport);

        let err = flow
            .start_flow(Duration::from_secs(100), false)
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::Polling { .. }));
        assert_eq!(flow.transport.wait_calls(), 1);
        assert_eq!(flow.transport.unused_replies(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_budget_times_out_before_any_poll() {
        let transport = ScriptedTransport::new(vec![]);
        let flow = TokenFlow::new(transport);

        let err = flow.start_flow(Duration::ZERO, false).await.unwrap_err();

        assert!(matches!(err, FlowError::TimedOut { waited_secs: 0 }));
        assert_eq!(flow.transport.wait_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn in_flight_reply_is_accepted_past_the_deadline() {
        // First poll takes 6s against a 5s budget: the deadline check runs
        // before sending, so the in-flight reply is still accepted, and the
        // next iteration times out without a second request.
        let transport = ScriptedTransport::new(vec![(6, pending())]);
        let flow = TokenFlow::new(transport);

        let err = flow
            .start_flow(Duration::from_secs(5), false)
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::TimedOut { waited_secs: 5 }));
        assert_eq!(flow.transport.wait_calls(), 1);
    }

    #[test]
    fn classify_pending_reply() {
        let state = classify(WaitReply {
            timeout: true,
            api_key: None,
            workspace_username: None,
        })
        .unwrap();

        assert!(matches!(state, PollState::Pending));
    }

    #[test]
    fn classify_resolved_reply() {
        let state = classify(WaitReply {
            timeout: false,
            api_key: Some("abc123".to_string()),
            workspace_username: Some("alice".to_string()),
        })
        .unwrap();

        match state {
            PollState::Resolved(result) => {
                assert_eq!(result.api_key, "abc123");
                assert_eq!(result.workspace.as_deref(), Some("alice"));
            },
            PollState::Pending => panic!("expected resolved state"),
        }
    }

    #[test]
    fn classify_rejects_reply_without_credential() {
        let err = classify(WaitReply {
            timeout: false,
            api_key: None,
            workspace_username: None,
        })
        .unwrap_err();

        assert!(matches!(
            err,
            FlowError::Polling {
                source: TransportError::Protocol(_)
            }
        ));
    }
}
