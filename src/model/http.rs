/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Transport boundary between the client and the HTTP stack.
//!
//! The client never talks to `reqwest` directly. It describes each call as a
//! [`TransportRequest`] and hands it to an [`HttpTransport`], which answers
//! with a [`TransportResponse`] for 2xx statuses or a [`TransportError`]
//! otherwise. Non-2xx responses are returned as errors that carry the
//! response, network failures and timeouts as errors without one.

use async_trait::async_trait;
use reqwest::Client as HttpInternalClient;
use reqwest::Method;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// An outgoing HTTP request described as plain data
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL including any query string
    pub url: String,
    /// Header names and values, sent as given
    pub headers: BTreeMap<String, String>,
    /// JSON body, if any
    pub body: Option<Value>,
    /// Request timeout
    pub timeout: Duration,
    /// Whether cookies and credentials should accompany the request
    ///
    /// Only meaningful for transports with an ambient credential store.
    pub with_credentials: bool,
}

impl TransportRequest {
    /// Returns the value of a request header, matching the name case-insensitively
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response received from the server
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers (case-insensitive lookup)
    pub headers: HeaderMap,
    /// Decoded response body, see [`decode_body`]
    pub body: Value,
}

impl TransportResponse {
    /// Creates a response with no headers
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body,
        }
    }

    /// Returns a header value as a string when present and valid UTF-8
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Error raised by a transport
///
/// `response` is populated when the server answered with a non-2xx status;
/// it is `None` for connection failures, timeouts and malformed requests.
#[derive(Debug, Clone)]
pub struct TransportError {
    /// Human readable description of the failure
    pub message: String,
    /// Whether the request timed out
    pub timeout: bool,
    /// The server response, when one was received
    pub response: Option<TransportResponse>,
}

impl TransportError {
    /// Creates an error without an embedded response
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timeout: false,
            response: None,
        }
    }

    /// Creates an error wrapping a non-2xx response
    pub fn with_response(message: impl Into<String>, response: TransportResponse) -> Self {
        Self {
            message: message.into(),
            timeout: false,
            response: Some(response),
        }
    }

    /// Creates a timeout error
    pub fn timed_out(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timeout: true,
            response: None,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::timed_out(err.to_string())
        } else if err.is_connect() {
            TransportError::new(format!("connection failed: {err}"))
        } else {
            TransportError::new(err.to_string())
        }
    }
}

/// HTTP capability used by the client to execute requests
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Executes a request
    ///
    /// # Returns
    /// * `Ok(TransportResponse)` - The server answered with a 2xx status
    /// * `Err(TransportError)` - Any other outcome
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Default transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: HttpInternalClient,
}

impl ReqwestTransport {
    /// Creates a transport with a fresh `reqwest` client
    ///
    /// # Returns
    /// * `Ok(ReqwestTransport)` - Ready to use transport
    /// * `Err(TransportError)` - If the underlying client cannot be built (TLS backend failure)
    pub fn new() -> Result<Self, TransportError> {
        let http_client = HttpInternalClient::builder().build()?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        debug!("{} {}", request.method, request.url);

        let mut builder = self
            .http_client
            .request(request.method.clone(), &request.url)
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!("Response status: {}", status);

        let headers = response.headers().clone();
        let text = response.text().await?;
        let response = TransportResponse {
            status: status.as_u16(),
            headers,
            body: decode_body(&text),
        };

        if status.is_success() {
            Ok(response)
        } else {
            Err(TransportError::with_response(
                format!("Request failed with status code {}", status.as_u16()),
                response,
            ))
        }
    }
}

/// Decodes a response body
///
/// JSON bodies are parsed, anything else is kept as a JSON string and an
/// empty body becomes `Value::Null`.
#[must_use]
pub fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
