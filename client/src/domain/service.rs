//! Monitored services and the form used to create them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::identity::EntityId;
use super::wire::null_as_default;

/// Operational state of a service, from healthiest to worst.
///
/// Values the client does not know are preserved in [`ServiceStatus::Other`]
/// so they survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceStatus {
    /// `"Operational"`
    #[default]
    Operational,
    /// `"Degraded"`
    Degraded,
    /// `"Partial Outage"`
    PartialOutage,
    /// `"Major Outage"`
    MajorOutage,
    /// Anything else, verbatim.
    Other(String),
}

impl ServiceStatus {
    /// Known statuses in severity order.
    pub const KNOWN: [Self; 4] = [
        Self::Operational,
        Self::Degraded,
        Self::PartialOutage,
        Self::MajorOutage,
    ];

    /// Wire representation used by the API.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Operational => "Operational",
            Self::Degraded => "Degraded",
            Self::PartialOutage => "Partial Outage",
            Self::MajorOutage => "Major Outage",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Position in the severity order; `None` for unrecognised values.
    pub fn severity(&self) -> Option<usize> {
        match self {
            Self::Operational => Some(0),
            Self::Degraded => Some(1),
            Self::PartialOutage => Some(2),
            Self::MajorOutage => Some(3),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ServiceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Operational" => Self::Operational,
            "Degraded" => Self::Degraded,
            "Partial Outage" => Self::PartialOutage,
            "Major Outage" => Self::MajorOutage,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for ServiceStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<ServiceStatus> for String {
    fn from(value: ServiceStatus) -> Self {
        match value {
            ServiceStatus::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

/// Service record as returned by `/services` and the public snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Server identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Optional blurb.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Missing or `null` reads as [`ServiceStatus::Operational`].
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ServiceStatus,
    /// Fields this client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Raw input of the "new service" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceForm {
    /// Required.
    pub name: String,
    /// Optional; blank is sent as an empty string.
    pub description: String,
    /// Initial state.
    pub status: ServiceStatus,
}

/// Reasons a service form is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceValidationError {
    /// The name is blank.
    #[error("Service name is required")]
    MissingName,
}

/// Validated payload for `POST /services`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewService {
    name: String,
    description: String,
    status: ServiceStatus,
}

impl NewService {
    /// Trim the form fields and require a name.
    ///
    /// # Examples
    /// ```
    /// use status_client::domain::{NewService, ServiceForm, ServiceStatus};
    ///
    /// let service = NewService::try_from_form(&ServiceForm {
    ///     name: "  API  ".into(),
    ///     ..ServiceForm::default()
    /// })
    /// .unwrap();
    /// assert_eq!(service.name(), "API");
    /// assert_eq!(service.status(), &ServiceStatus::Operational);
    /// ```
    pub fn try_from_form(form: &ServiceForm) -> Result<Self, ServiceValidationError> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(ServiceValidationError::MissingName);
        }
        Ok(Self {
            name: name.to_owned(),
            description: form.description.trim().to_owned(),
            status: form.status.clone(),
        })
    }

    /// Trimmed name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Trimmed description, possibly empty.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Initial state.
    pub fn status(&self) -> &ServiceStatus {
        &self.status
    }
}
