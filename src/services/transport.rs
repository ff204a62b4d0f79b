use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::error::{AppError, AppResult};

/// An outbound GET request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn query(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query.push((name.to_string(), value.into()));
        self
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and raw body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends provider requests
///
/// Connection pooling, TLS and any retry policy live behind this trait.
/// Cancellation is handled by the caller dropping the returned future.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, request: HttpRequest) -> AppResult<HttpResponse>;
}

/// [`HttpTransport`] backed by a shared reqwest client
#[derive(Clone)]
pub struct ReqwestTransport {
    http_client: HttpClient,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    pub fn from_client(http_client: HttpClient) -> Self {
        Self { http_client }
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: HttpRequest) -> AppResult<HttpResponse> {
        let mut builder = self.http_client.get(&request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(
            url = %request.url,
            status = status,
            bytes = body.len(),
            "Provider response received"
        );

        Ok(HttpResponse { status, body })
    }
}
