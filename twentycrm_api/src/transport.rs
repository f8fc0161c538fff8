//! The authenticated send capability behind the client.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::{
    request::{Method, RequestDescriptor},
    Error,
};

/// An authenticated "send one request" capability. Query building and
/// pagination never see credentials, only this.
#[async_trait]
pub trait Sender: Send + Sync {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value, Error>;
}

/// `reqwest`-backed sender for a Twenty CRM instance.
///
/// Joins the descriptor's path and parameters onto the instance base URL,
/// attaches the bearer API key, and decodes JSON response bodies. Requests
/// use a 30-second timeout.
pub struct HttpSender {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl HttpSender {
    /// Creates a sender for the given instance URL (e.g.
    /// `https://api.twenty.com`) and API key.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http,
        })
    }

    fn url_for(&self, request: &RequestDescriptor) -> Result<Url, Error> {
        let mut url =
            Url::parse(format!("{}{}", &self.base_url, request.path).as_str()).map_err(|e| {
                tracing::error!("Invalid URL constructed: {}", e);
                Error::RequestFailed
            })?;
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &request.query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl Sender for HttpSender {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value, Error> {
        let url = self.url_for(request)?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .http
            .request(method, url)
            .bearer_auth(&self.api_key)
            .header("accept", "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(|e| {
            tracing::error!("Failed to send request: {}", e);
            Error::RequestFailed
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        // DELETE responses may have no body at all.
        if body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse response: {} | body: {}", e, snippet);
            Error::RequestFailed
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        format!("{}...[truncated]", &body[..MAX])
    }
}
