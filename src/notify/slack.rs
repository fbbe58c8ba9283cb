//! Slack webhook error alerts.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::message::{build_error_message, Branding, Message};
use super::transport::{HttpTransport, Transport};
use crate::error::AlertError;

/// The only status accepted as a successful delivery.
const STATUS_OK: u16 = 200;

/// Longest response body excerpt kept on a rejected delivery.
const MAX_BODY_EXCERPT: usize = 512;

/// Sends error alerts to a single Slack webhook.
#[derive(Clone)]
pub struct AlertDispatcher {
    /// Webhook URL.
    webhook_url: String,
    /// Fixed alert content.
    branding: Branding,
    /// HTTP transport.
    transport: Arc<dyn Transport>,
}

impl AlertDispatcher {
    /// Creates a dispatcher using the shared default HTTP client.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            branding: Branding::default(),
            transport: Arc::new(HttpTransport::default()),
        }
    }

    /// Replaces the transport.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replaces the alert branding.
    pub fn with_branding(mut self, branding: Branding) -> Self {
        self.branding = branding;
        self
    }

    /// Returns the webhook URL.
    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    /// Returns the alert branding.
    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    /// Builds the error alert message this dispatcher would send.
    pub fn error_message<S: AsRef<str>>(
        &self,
        error_text: &str,
        logs_url: &str,
        mentions: &[S],
    ) -> Message {
        self.branding.error_message(error_text, logs_url, mentions)
    }

    /// Builds and delivers an error alert.
    pub async fn send_error_alert<S: AsRef<str>>(
        &self,
        error_text: &str,
        logs_url: &str,
        mentions: &[S],
    ) -> Result<(), AlertError> {
        let message = self.error_message(error_text, logs_url, mentions);
        self.send(&message).await
    }

    /// Delivers a prebuilt message.
    pub async fn send(&self, message: &Message) -> Result<(), AlertError> {
        send_with(self.transport.as_ref(), &self.webhook_url, message).await
    }
}

impl std::fmt::Debug for AlertDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertDispatcher")
            .field("webhook_url", &self.webhook_url)
            .field("branding", &self.branding)
            .finish_non_exhaustive()
    }
}

/// Delivers `message` to `endpoint`.
///
/// Uses `client` when given, otherwise the shared default client.
pub async fn send(
    endpoint: &str,
    message: &Message,
    client: Option<&reqwest::Client>,
) -> Result<(), AlertError> {
    let transport = client
        .map(|c| HttpTransport::new(c.clone()))
        .unwrap_or_default();
    send_with(&transport, endpoint, message).await
}

/// Delivers `message` to `endpoint` through `transport`.
///
/// Succeeds only on HTTP 200. Makes exactly one request and never retries.
#[instrument(skip_all, fields(endpoint = %endpoint))]
pub async fn send_with<T: Transport + ?Sized>(
    transport: &T,
    endpoint: &str,
    message: &Message,
) -> Result<(), AlertError> {
    if endpoint.trim().is_empty() {
        return Err(AlertError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
        });
    }

    let body = serde_json::to_vec(message)?;

    let response = match transport.post_json(endpoint, body).await {
        Ok(response) => response,
        Err(e) => {
            debug!(error = %e, "Slack webhook request failed");
            return Err(e);
        }
    };

    if response.status != STATUS_OK {
        debug!(status = response.status, "Slack webhook rejected alert");
        return Err(AlertError::DeliveryRejected {
            status: response.status,
            body: truncate(&response.body, MAX_BODY_EXCERPT),
        });
    }

    debug!("Slack alert delivered");
    Ok(())
}

/// Builds an error alert with the default branding and delivers it.
pub async fn send_error_alert<S: AsRef<str>>(
    endpoint: &str,
    error_text: &str,
    logs_url: &str,
    mentions: &[S],
    client: Option<&reqwest::Client>,
) -> Result<(), AlertError> {
    let message = build_error_message(error_text, logs_url, mentions);
    send(endpoint, &message, client).await
}

/// Truncates a string to at most `max_len` bytes on a char boundary.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::transport::{MockTransport, WebhookResponse};
    use std::sync::Mutex;
    use tracing_subscriber::fmt::MakeWriter;

    /// In-memory sink for formatted log lines.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn ok_response(status: u16) -> Result<WebhookResponse, AlertError> {
        Ok(WebhookResponse {
            status,
            body: String::new(),
        })
    }

    fn sample_message() -> Message {
        build_error_message("nil pointer at line 42", "https://logs.example/abc", &["@oncall"])
    }

    #[tokio::test]
    async fn status_ok_is_delivered() {
        let mut transport = MockTransport::new();
        transport
            .expect_post_json()
            .withf(|url, _| url == "https://hooks.example/x")
            .times(1)
            .returning(|_, _| ok_response(200));

        let result = send_with(&transport, "https://hooks.example/x", &sample_message()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn non_ok_status_is_rejected_without_retry() {
        let mut transport = MockTransport::new();
        transport
            .expect_post_json()
            .times(1)
            .returning(|_, _| {
                Ok(WebhookResponse {
                    status: 500,
                    body: "internal".to_string(),
                })
            });

        let err = send_with(&transport, "https://hooks.example/x", &sample_message())
            .await
            .unwrap_err();

        match err {
            AlertError::DeliveryRejected { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn other_success_codes_are_still_rejected() {
        for status in [201u16, 204, 301, 404] {
            let mut transport = MockTransport::new();
            transport
                .expect_post_json()
                .times(1)
                .returning(move |_, _| ok_response(status));

            let err = send_with(&transport, "https://hooks.example/x", &sample_message())
                .await
                .unwrap_err();
            assert_eq!(err.status(), Some(status));
        }
    }

    #[tokio::test]
    async fn transport_failure_is_propagated() {
        let mut transport = MockTransport::new();
        transport.expect_post_json().times(1).returning(|_, _| {
            Err(AlertError::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))
        });

        let err = send_with(&transport, "https://hooks.example/x", &sample_message())
            .await
            .unwrap_err();

        assert!(err.is_transport());
        let source = std::error::Error::source(&err).expect("source");
        assert_eq!(source.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn empty_endpoint_makes_no_request() {
        let mut transport = MockTransport::new();
        transport.expect_post_json().never();

        let err = send_with(&transport, "  ", &sample_message())
            .await
            .unwrap_err();
        assert!(matches!(err, AlertError::InvalidEndpoint { .. }));
    }

    #[tokio::test]
    async fn body_is_serialized_message() {
        let expected = serde_json::to_vec(&sample_message()).unwrap();

        let mut transport = MockTransport::new();
        transport
            .expect_post_json()
            .withf(move |_, body| body == &expected)
            .times(1)
            .returning(|_, _| ok_response(200));

        send_with(&transport, "https://hooks.example/x", &sample_message())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn dispatcher_uses_branding_and_transport() {
        let mut transport = MockTransport::new();
        transport
            .expect_post_json()
            .withf(|url, body| {
                let msg: Message = serde_json::from_slice(body).unwrap();
                url == "https://hooks.example/y"
                    && msg.text == "<@sre> you have a system error!"
                    && msg.attachments[0].title == "Paging"
            })
            .times(1)
            .returning(|_, _| ok_response(200));

        let dispatcher = AlertDispatcher::new("https://hooks.example/y")
            .with_transport(Arc::new(transport))
            .with_branding(Branding {
                title: "Paging".to_string(),
                ..Branding::default()
            });

        dispatcher
            .send_error_alert("db down", "https://logs.example/db", &["@sre"])
            .await
            .unwrap();
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("ééé", 3), "é...");
    }

    #[tokio::test]
    async fn delivery_is_only_logged_at_debug() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .with_writer(logs.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut transport = MockTransport::new();
        transport
            .expect_post_json()
            .times(1)
            .returning(|_, _| ok_response(200));

        send_with(&transport, "https://hooks.example/x", &sample_message())
            .await
            .unwrap();

        let output = logs.contents();
        let line = output
            .lines()
            .find(|l| l.contains("Slack alert delivered"))
            .expect("delivery event");
        assert!(line.contains("DEBUG"), "unexpected level: {line}");
        assert!(!output.contains(" INFO "), "library logged at info: {output}");
    }
}
