//! Driven port for sending HTTP requests to the status page API.
//!
//! The access layer builds fully resolved requests and interprets responses;
//! adapters only move bytes and classify transport failures.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use super::define_port_error;

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Upper-case verb.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Fully resolved request handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Verb.
    pub method: HttpMethod,
    /// Absolute URL: base URL joined with the endpoint path.
    pub url: String,
    /// Header pairs in the order they were added.
    pub headers: Vec<(String, String)>,
    /// Serialised JSON payload.
    pub body: Option<String>,
}

impl ApiRequest {
    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` header, when sent.
    pub content_type: Option<String>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// JSON response with the given status and body.
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status,
            content_type: Some("application/json; charset=utf-8".to_owned()),
            body: body.to_string().into_bytes(),
        }
    }

    /// Response with no declared content type and an empty body.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }

    /// Any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the declared content type carries JSON.
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|value| value.to_ascii_lowercase().contains("application/json"))
    }
}

define_port_error! {
    /// Failures raised before a response was received.
    pub enum TransportError {
        /// Connection refused, DNS failure, or the host is offline.
        Unreachable { message: String } =>
            "server unreachable: {message}",
        /// The request could not be built.
        InvalidRequest { message: String } =>
            "invalid request: {message}",
        /// The response body could not be read.
        Body { message: String } =>
            "failed to read response body: {message}",
    }
}

/// Port for performing one HTTP exchange.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` and return the raw response, whatever its status.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Transport double that replays queued outcomes and records requests.
///
/// Running out of scripted outcomes yields
/// [`TransportError::InvalidRequest`] so unexpected calls surface in tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedHttpTransport {
    outcomes: Arc<Mutex<VecDeque<Result<ApiResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl ScriptedHttpTransport {
    /// Transport with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next call.
    pub fn push_response(&self, response: ApiResponse) {
        self.push_outcome(Ok(response));
    }

    /// Queue a transport failure for the next call.
    pub fn push_error(&self, error: TransportError) {
        self.push_outcome(Err(error));
    }

    fn push_outcome(&self, outcome: Result<ApiResponse, TransportError>) {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
    }

    /// Requests sent so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedHttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let description = format!("{} {}", request.method.as_str(), request.url);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::invalid_request(format!(
                    "no scripted response for {description}"
                )))
            })
    }
}
