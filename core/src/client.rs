use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::config::TripConfig;
use crate::errors::{TripError, TripResult};
use crate::session::SessionContext;

/// Client for the travel backend.
///
/// Single point of outbound request configuration: a fixed base URL, a
/// per-request timeout, and the bearer token read from the session context
/// before every call. Requests are attempted exactly once.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: &TripConfig, session: SessionContext) -> TripResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TripError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the persisted token, if any. A missing token is not an error.
    async fn authorize(&self, builder: RequestBuilder) -> TripResult<RequestBuilder> {
        match self.session.token().await? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Ok(builder),
        }
    }

    #[instrument(skip(self, builder))]
    async fn send<T: DeserializeOwned>(&self, path: &str, builder: RequestBuilder) -> TripResult<T> {
        let builder = self.authorize(builder).await?;
        debug!("Sending request to {}", path);

        let response = builder.send().await.map_err(|e| {
            error!(error = %e, "API request to {} failed to complete", path);
            if e.is_timeout() {
                TripError::Transport(format!("Request to {} timed out", path))
            } else {
                TripError::Transport(format!("Failed to send request: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(|e| {
                TripError::Transport(format!("Failed to read error response: {}", e))
            })?;
            let detail = extract_detail(status, &body);
            error!(status = status.as_u16(), detail = %detail, "API Error on {}", path);

            return Err(TripError::Server {
                status_code: status.as_u16(),
                detail,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TripError::Transport(format!("Failed to read response: {}", e)))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            error!(error = %e, "Unparseable response from {}", path);
            TripError::Parse(format!("Failed to parse response: {}", e))
        })
    }

    /// GET `path` with query parameters and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> TripResult<T> {
        let builder = self.client.get(self.url(path)).query(query);
        self.send(path, builder).await
    }

    /// POST a JSON body to `path` and decode the JSON reply
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> TripResult<T> {
        let builder = self.client.post(self.url(path)).json(body);
        self.send(path, builder).await
    }

    /// POST form-encoded fields to `path` and decode the JSON reply
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> TripResult<T> {
        let builder = self.client.post(self.url(path)).form(fields);
        self.send(path, builder).await
    }
}

/// Pull the human-readable failure detail out of an error body.
///
/// Prefers a JSON `detail` (string, or the serialized value when structured),
/// then a JSON `message`, then the raw text, then the status reason.
pub(crate) fn extract_detail(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        match value.get("detail") {
            Some(Value::String(detail)) => return detail.clone(),
            Some(Value::Null) | None => {}
            Some(other) => return other.to_string(),
        }
        if let Some(Value::String(message)) = value.get("message") {
            return message.clone();
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    #[test]
    fn test_extract_detail_prefers_detail_field() {
        let detail = extract_detail(StatusCode::NOT_FOUND, r#"{"detail":"Trip not found"}"#);
        assert_eq!(detail, "Trip not found");
    }

    #[test]
    fn test_extract_detail_structured() {
        let body = r#"{"detail":[{"loc":["query","days"],"msg":"too large"}]}"#;
        let detail = extract_detail(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert!(detail.contains("too large"));
    }

    #[test]
    fn test_extract_detail_fallbacks() {
        assert_eq!(
            extract_detail(StatusCode::BAD_REQUEST, r#"{"message":"bad input"}"#),
            "bad input"
        );
        assert_eq!(
            extract_detail(StatusCode::BAD_GATEWAY, "upstream down\n"),
            "upstream down"
        );
        assert_eq!(
            extract_detail(StatusCode::SERVICE_UNAVAILABLE, ""),
            "Service Unavailable"
        );
    }

    #[test]
    fn test_url_joining() {
        let config = TripConfig {
            api_url: Some("http://localhost:8000/api/".to_string()),
            ..TripConfig::default()
        };
        let client =
            ApiClient::new(&config, SessionContext::from_store(InMemoryStore::new())).unwrap();

        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(client.url("/travel/plan"), "http://localhost:8000/api/travel/plan");
        assert_eq!(client.url("auth/me"), "http://localhost:8000/api/auth/me");
    }
}
