use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, error};

use portfolio_api::models::chat::{ChatRequest, ChatResponse};
use portfolio_api::models::content::Portfolio;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Backend returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl TransportError {
    /// Short label used when logging, so status and transport failures stay distinguishable.
    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::Status { .. } => "http_status",
            TransportError::Network(_) => "network",
            TransportError::Decode(_) => "decode",
        }
    }
}

/// Carries one chat exchange to the assistant backend.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<String, TransportError>;
}

/// `POST {base_url}/api/chat` over HTTP. No timeout is configured: a stalled
/// request stays outstanding until the connection itself fails.
#[derive(Clone)]
pub struct HttpChatTransport {
    client: Client,
    base_url: String,
}

impl HttpChatTransport {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(&self, request: &ChatRequest) -> Result<String, TransportError> {
        debug!(
            "Sending chat request ({} history message(s))",
            request.history.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(TransportError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        let reply: ChatResponse = response.json().await.map_err(TransportError::Decode)?;
        Ok(reply.response)
    }
}

/// Fetches all collections once at startup from `GET {base_url}/api/portfolio`.
pub async fn fetch_portfolio(client: &Client, base_url: &str) -> Result<Portfolio, TransportError> {
    let url = format!("{}/api/portfolio", base_url.trim_end_matches('/'));
    let response = client
        .get(url)
        .timeout(Duration::from_secs(30))
        .send()
        .await
        .map_err(TransportError::Network)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TransportError::Status { status, body });
    }

    response.json().await.map_err(TransportError::Decode)
}

/// Logs a failed exchange with its failure kind.
pub fn log_failure(err: &TransportError) {
    error!(kind = err.kind(), "Chat error: {err}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode as AxumStatus, routing::post, Json, Router};
    use portfolio_api::models::chat::ChatMessage;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn request() -> ChatRequest {
        ChatRequest {
            message: "Quelles sont tes certifications?".into(),
            history: vec![ChatMessage::assistant("Bonjour!")],
        }
    }

    #[tokio::test]
    async fn test_send_posts_json_and_reads_reply() {
        let seen: Arc<Mutex<Option<Value>>> = Arc::default();
        let captured = seen.clone();
        let router = Router::new().route(
            "/api/chat",
            post(move |Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some(body);
                    Json(json!({"response": "Trois certifications."}))
                }
            }),
        );
        let base = serve(router).await;

        let transport = HttpChatTransport::new(Client::new(), format!("{base}/"));
        let reply = transport.send(&request()).await.unwrap();
        assert_eq!(reply, "Trois certifications.");
        assert_eq!(
            seen.lock().unwrap().clone().unwrap(),
            json!({
                "message": "Quelles sont tes certifications?",
                "history": [{"role": "assistant", "content": "Bonjour!"}]
            })
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let router = Router::new().route(
            "/api/chat",
            post(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = serve(router).await;

        let err = HttpChatTransport::new(Client::new(), base)
            .send(&request())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "http_status");
        match err {
            TransportError::Status { status, body } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unexpected_body_is_decode_error() {
        let router = Router::new().route(
            "/api/chat",
            post(|| async { Json(json!({"answer": "wrong field"})) }),
        );
        let base = serve(router).await;

        let err = HttpChatTransport::new(Client::new(), base)
            .send(&request())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "decode");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = HttpChatTransport::new(Client::new(), format!("http://{addr}"))
            .send(&request())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "network");
    }

    #[tokio::test]
    async fn test_fetch_portfolio() {
        let router = Router::new().route(
            "/api/portfolio",
            axum::routing::get(|| async {
                Json(json!({
                    "skills": [{
                        "id": "s1", "title": "Rust", "shortDescription": "s",
                        "longDescription": "l", "date": "2025"
                    }]
                }))
            }),
        );
        let base = serve(router).await;

        let portfolio = fetch_portfolio(&Client::new(), &base).await.unwrap();
        assert_eq!(portfolio.skills.len(), 1);
        assert!(portfolio.experiences.is_empty());
    }
}
