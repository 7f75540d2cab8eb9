use async_trait::async_trait;
use model::ForwardError;

/// The delivery seam: one HTTP POST of a payload to a target URL.
///
/// Implementations make exactly one attempt per call; retry is the
/// queue's responsibility. A response is always returned as its status
/// code, including error statuses. `ForwardError::Transport` is
/// reserved for attempts where no response arrived at all.
#[async_trait]
pub trait Forwarder: Send + Sync {
    async fn forward(&self, url: &str, payload: &str) -> Result<u16, ForwardError>;
}

/// Production forwarder backed by a shared `reqwest` client.
pub struct HttpForwarder {
    client: reqwest::Client,
}

impl HttpForwarder {
    pub fn new() -> Self {
        HttpForwarder {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpForwarder {
    fn default() -> Self {
        HttpForwarder::new()
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn forward(&self, url: &str, payload: &str) -> Result<u16, ForwardError> {
        let response: reqwest::Response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(payload.to_string())
            .send()
            .await
            .map_err(|err| ForwardError::Transport(err.to_string()))?;

        let status: u16 = response.status().as_u16();

        if status >= 400 {
            // Drain the error body for the logs; it is never surfaced
            let body: String = response.text().await.unwrap_or_default();
            tracing::error!("Target returned {status}: {body}");
        }

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn forwards_payload_as_json_post() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(header("Content-Type", "application/json"))
            .and(body_string(r#"{"order":42}"#))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let forwarder = HttpForwarder::new();
        let status = forwarder
            .forward(&format!("{}/hook", mock_server.uri()), r#"{"order":42}"#)
            .await
            .unwrap();

        assert_eq!(200, status);
    }

    #[tokio::test]
    async fn returns_error_status_without_failing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/hook"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let forwarder = HttpForwarder::new();
        let status = forwarder
            .forward(&format!("{}/hook", mock_server.uri()), "{}")
            .await
            .unwrap();

        // The exchange completed, so the status comes back as a value
        assert_eq!(500, status);
    }

    #[tokio::test]
    async fn unreachable_target_is_a_transport_error() {
        let forwarder = HttpForwarder::new();

        // Reserved port with nothing listening
        let result = forwarder.forward("http://127.0.0.1:1/hook", "{}").await;

        assert!(matches!(result, Err(ForwardError::Transport(_))));
    }

    #[tokio::test]
    async fn makes_exactly_one_attempt() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let forwarder = HttpForwarder::new();
        forwarder.forward(&mock_server.uri(), "{}").await.unwrap();

        // MockServer verifies the expectation on drop
    }
}
