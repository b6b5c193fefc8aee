//! Server-owned identities mirrored by the client.
//!
//! Users and organizations are owned by the API; the client only keeps a
//! read-only copy for display. Unknown fields are retained so a persisted
//! snapshot restores exactly what the server sent.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use zeroize::Zeroizing;

/// Opaque server identifier.
///
/// The API emits numeric identifiers for some records and string identifiers
/// for others, so both shapes are kept exactly as received.
///
/// # Examples
/// ```
/// use status_client::domain::EntityId;
///
/// let numeric: EntityId = serde_json::from_str("9").unwrap();
/// let textual: EntityId = serde_json::from_str("\"org-9\"").unwrap();
/// assert_eq!(numeric.to_string(), "9");
/// assert_eq!(textual.to_string(), "org-9");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    /// Numeric identifier.
    Number(i64),
    /// String identifier (UUID, slug, document id, ...).
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Authenticated user as reported by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Server identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Login email, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role within the organization, e.g. `admin`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Fields the client does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Organization the user acts for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Server identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Fields the client does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Validation errors returned by [`BearerToken::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    /// The token is blank.
    Empty,
}

impl fmt::Display for TokenValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "bearer token must not be empty"),
        }
    }
}

impl std::error::Error for TokenValidationError {}

/// Opaque credential attached to authorized requests.
///
/// ## Invariants
/// - The token is non-empty once trimmed of whitespace.
/// - `Debug` output never contains the secret.
///
/// # Examples
/// ```
/// use status_client::domain::BearerToken;
///
/// let token = BearerToken::new("abc").unwrap();
/// assert_eq!(token.as_str(), "abc");
/// assert!(!format!("{token:?}").contains("abc"));
/// assert!(BearerToken::new("  ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Validate and wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Result<Self, TokenValidationError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(TokenValidationError::Empty);
        }
        Ok(Self(Zeroizing::new(token)))
    }

    /// Borrow the raw token for header construction.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

impl TryFrom<String> for BearerToken {
    type Error = TokenValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BearerToken> for String {
    fn from(value: BearerToken) -> Self {
        value.as_str().to_owned()
    }
}
