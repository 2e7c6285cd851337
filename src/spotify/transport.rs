use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde_json::Value;

use crate::{
    error::{Error, Result},
    spotify::Token,
};

/// A single HTTP request, described independently of how it is sent.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub url: String,
    pub method: Method,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    pub fn get(url: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            url: url.into(),
            method: Method::GET,
            query: Vec::new(),
            headers,
            body: None,
        }
    }

    pub fn delete(url: impl Into<String>, headers: HeaderMap, body: Value) -> Self {
        Self {
            url: url.into(),
            method: Method::DELETE,
            query: Vec::new(),
            headers,
            body: Some(body),
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }
}

/// Sends one request and hands back the decoded JSON body.
///
/// Implementations must turn both connection failures and non-2xx responses
/// into `Err`; nothing above this layer looks at status codes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, request: &RequestDescriptor) -> Result<Value>;
}

/// Headers shared by every API call.
///
/// `Authorization` is only attached for a present, valid credential; without
/// one the request goes out as-is and the server is left to reject it.
pub fn headers_for(credential: Option<&Token>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(token) = credential.filter(|token| token.is_valid()) {
        match HeaderValue::from_str(&token.header_value()) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => log::warn!("access token is not a valid header value, sending without it"),
        }
    }

    headers
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Bounds every request, so a hung connection fails instead of stalling the caller.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn request(&self, request: &RequestDescriptor) -> Result<Value> {
        log::debug!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Status { status, body: text });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}
