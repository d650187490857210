//! HTTP transport shared by authentication and resource calls.
//!
//! Responsibilities:
//! - Attach the standard headers (user agent, token, forwarded-for).
//! - Follow 3xx redirects manually, replaying the same method, body and query.
//! - Classify non-success responses into [`ClientError`] kinds.
//!
//! Does NOT handle:
//! - Re-authentication on 401 (see `client::retry_call!`).
//!
//! Invariants:
//! - Tokens never appear in log output.
//! - At most `max_redirects` hops are followed per request.

use reqwest::header::{CONTENT_TYPE, HeaderMap, LOCATION, USER_AGENT};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, Result};
use keystone_config::constants::{DEFAULT_MAX_REDIRECTS, USER_AGENT as DEFAULT_USER_AGENT};

/// Header carrying the caller's token.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";
const FORWARDED_HEADER: &str = "Forwarded";

/// A request described independently of the HTTP client.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    url: String,
    token: Option<String>,
    body: Option<Value>,
    query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            token: None,
            body: None,
            query: Vec::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn head(url: impl Into<String>) -> Self {
        Self::new(Method::HEAD, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, url).body(body)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn patch(url: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PATCH, url).body(body)
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Send `token` as `X-Auth-Token`.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Append a query parameter when `value` is set.
    pub fn query(mut self, key: &str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.query.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// A successful response with its body already read.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub url: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl ApiResponse {
    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            ClientError::MalformedResponse(format!("invalid JSON from {}: {e}", self.url))
        })
    }

    pub fn text(&self) -> &str {
        &self.body
    }
}

/// Configured HTTP client plus the headers every request carries.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    user_agent: String,
    original_ip: Option<String>,
    max_redirects: usize,
}

impl HttpTransport {
    /// Wrap `http`, which must not follow redirects on its own.
    pub fn new(http: Client) -> Self {
        Self {
            http,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            original_ip: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Announce the end user's address in a `Forwarded` header.
    pub fn with_original_ip(mut self, original_ip: Option<String>) -> Self {
        self.original_ip = original_ip;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    /// Send `request`, following redirects, and return the final successful response.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut url = request.url.clone();

        for hop in 0..=self.max_redirects {
            let builder = self.prepare(&request, &url);
            debug!(
                method = %request.method,
                url = %url,
                hop,
                authenticated = request.token.is_some(),
                "REQ"
            );

            let response = builder.send().await?;
            let status = response.status();
            debug!(status = status.as_u16(), url = %url, "RESP");

            if status.is_redirection()
                && let Some(location) = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
            {
                let next = response.url().join(location).map_err(|e| {
                    ClientError::InvalidUrl(format!("invalid redirect location '{location}': {e}"))
                })?;
                debug!(status = status.as_u16(), location = %next, "Following redirect");
                url = next.to_string();
                continue;
            }

            return finish(response).await;
        }

        Err(ClientError::TooManyRedirects {
            limit: self.max_redirects,
            url: request.url,
        })
    }

    fn prepare(&self, request: &ApiRequest, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(USER_AGENT, &self.user_agent);

        if let Some(token) = &request.token {
            builder = builder.header(AUTH_TOKEN_HEADER, token);
        }
        if let Some(ip) = &self.original_ip {
            builder = builder.header(
                FORWARDED_HEADER,
                format!("for={ip};by={}", self.user_agent),
            );
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }
        builder
    }
}

async fn finish(response: reqwest::Response) -> Result<ApiResponse> {
    let status = response.status();
    let url = response.url().to_string();
    let headers = response.headers().clone();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(ApiResponse {
            status,
            url,
            headers,
            body,
        });
    }

    Err(ClientError::from_status(
        status.as_u16(),
        url,
        error_message(&body),
    ))
}

/// Message of a Keystone error body, or the raw text.
///
/// Understands `{"error": {"message": ...}}` and the older
/// `{"<kind>": {"message": ...}}` shape.
pub(crate) fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let message = parsed.as_ref().and_then(|value| {
        let object = value.as_object()?;
        object
            .get("error")
            .into_iter()
            .chain(object.values())
            .find_map(|inner| inner.get("message")?.as_str())
    });

    match message {
        Some(message) => message.to_string(),
        None if body.trim().is_empty() => "no response body".to_string(),
        None => body.to_string(),
    }
}
