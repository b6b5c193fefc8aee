//! Client-level error types.
//!
//! Every failure an operation can produce is folded into [`ClientError`] so
//! callers branch on the kind instead of matching message strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::auth::{LoginValidationError, RegistrationValidationError};
use super::incident::IncidentValidationError;
use super::service::ServiceValidationError;

/// Message carried when the server cannot be reached at all.
pub const UNREACHABLE_SERVER_MESSAGE: &str =
    "Unable to reach the server. Please check API base URL.";

/// Fallback message when a failed response carries no usable `message`.
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed";

/// Normalised API failure.
///
/// ## Invariants
/// - `status` is `None` only for failures where no response was received.
/// - `details` holds the parsed response body when the server sent JSON.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use status_client::domain::ApiError;
///
/// let err = ApiError::from_response(404, Some(json!({ "message": "Not found" })));
/// assert_eq!(err.status(), Some(404));
/// assert_eq!(err.message(), "Not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    status: Option<u16>,
    details: Option<Value>,
}

impl ApiError {
    /// Create an error without structured details.
    pub fn new(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status,
            details: None,
        }
    }

    /// The server could not be reached.
    pub fn unreachable() -> Self {
        Self::new(UNREACHABLE_SERVER_MESSAGE, None)
    }

    /// Build an error from a non-success response and its parsed body.
    pub fn from_response(status: u16, payload: Option<Value>) -> Self {
        let message = payload
            .as_ref()
            .and_then(|body| body.get("message"))
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .unwrap_or(REQUEST_FAILED_MESSAGE)
            .to_owned();
        Self {
            message,
            status: Some(status),
            details: payload,
        }
    }

    /// Human-readable message suitable for a notice.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// HTTP status code, absent for unreachable-server failures.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Structured payload returned by the server, if any.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

}

/// Client-side required-field failures, raised before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Login form.
    #[error(transparent)]
    Login(#[from] LoginValidationError),
    /// Registration form.
    #[error(transparent)]
    Registration(#[from] RegistrationValidationError),
    /// New service form.
    #[error(transparent)]
    Service(#[from] ServiceValidationError),
    /// New incident form or update note.
    #[error(transparent)]
    Incident(#[from] IncidentValidationError),
}

/// Tagged failure union returned by every client operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// The server could not be reached (connection refused, DNS, offline).
    #[error("{0}")]
    Network(ApiError),
    /// The server answered with a non-success status.
    #[error("{0}")]
    Api(ApiError),
    /// Form input failed validation; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A profile refresh failed and the session was ended.
    #[error("{source}")]
    SessionExpired {
        /// Failure that ended the session.
        source: Box<ClientError>,
    },
    /// A response claimed to be JSON but could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode {
        /// Decoder message.
        message: String,
    },
    /// The request could not be built or its body could not be read.
    #[error("request failed before a response was received: {message}")]
    Transport {
        /// Adapter message.
        message: String,
    },
}

impl ClientError {
    /// Wrap the cause of a failed profile refresh.
    pub fn session_expired(cause: Self) -> Self {
        Self::SessionExpired {
            source: Box::new(cause),
        }
    }

    /// Response body could not be decoded.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Request failed before a response arrived.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// The normalised API error, looking through `SessionExpired`.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Network(error) | Self::Api(error) => Some(error),
            Self::SessionExpired { source } => source.api_error(),
            Self::Validation(_) | Self::Decode { .. } | Self::Transport { .. } => None,
        }
    }

    /// HTTP status of the underlying API error, if one was received.
    pub fn status(&self) -> Option<u16> {
        self.api_error().and_then(ApiError::status)
    }

    /// `true` when the server rejected the caller's credentials or token.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// `true` when the server could not be reached, looking through
    /// `SessionExpired`.
    pub fn is_network(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::SessionExpired { source } => source.is_network(),
            _ => false,
        }
    }
}

impl From<LoginValidationError> for ClientError {
    fn from(value: LoginValidationError) -> Self {
        Self::Validation(value.into())
    }
}

impl From<RegistrationValidationError> for ClientError {
    fn from(value: RegistrationValidationError) -> Self {
        Self::Validation(value.into())
    }
}

impl From<ServiceValidationError> for ClientError {
    fn from(value: ServiceValidationError) -> Self {
        Self::Validation(value.into())
    }
}

impl From<IncidentValidationError> for ClientError {
    fn from(value: IncidentValidationError) -> Self {
        Self::Validation(value.into())
    }
}
