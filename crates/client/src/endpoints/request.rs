//! Request descriptions and HTTP status mapping.

use reqwest::{Client, Method, RequestBuilder, Response};

use crate::error::{Error, Result};

/// Upper bound on upstream error bodies carried into error messages.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Description of one upstream call: method, path, query, and JSON body.
///
/// The executor turns a spec into a real request by attaching the bearer
/// token and anti-forgery header, which keeps specs inert and replayable for
/// the single retry after a forced re-authentication.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl RequestSpec {
    /// Describe a GET of `path` (relative to the registry base URL).
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Describe a POST of a JSON body to `path`.
    pub fn post_json(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Materialize the spec against `base_url`.
    pub(crate) fn build(&self, http: &Client, base_url: &str) -> RequestBuilder {
        let url = format!("{}{}", base_url, self.path);
        let mut builder = http.request(self.method.clone(), url);
        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }
        if let Some(body) = &self.body {
            builder = builder.json(body);
        }
        builder
    }
}

/// Send a request and map the response status into the error taxonomy.
///
/// 401/403 become [`Error::UpstreamAuth`] so the executor can recognize them
/// for its single forced re-authentication; every other non-success status
/// becomes [`Error::Upstream`] and is surfaced without retry.
pub(crate) async fn send(builder: RequestBuilder) -> Result<Response> {
    let response = builder.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let status = status.as_u16();
    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "could not read error response body".to_string());
    let message = extract_error_message(&body);

    if status == 401 || status == 403 {
        Err(Error::UpstreamAuth {
            status,
            url,
            message,
            retry: None,
        })
    } else {
        Err(Error::Upstream {
            status,
            url,
            message,
        })
    }
}

/// Pull a human-readable message out of an upstream error body.
///
/// The registry usually answers with `{"error": ...}` or `{"message": ...}`;
/// anything else is carried verbatim, truncated.
fn extract_error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(msg) = json.get(key).and_then(|v| v.as_str())
                && !msg.is_empty()
            {
                return msg.to_string();
            }
        }
    }
    let mut message: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    if message.len() < body.len() {
        message.push('…');
    }
    message
}
