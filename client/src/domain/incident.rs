//! Incidents, their timeline updates, and the forms that create them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::identity::EntityId;
use super::timestamp::Timestamp;
use super::wire::null_as_default;

/// Lifecycle state of an incident.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IncidentStatus {
    /// Reported, not yet triaged.
    #[default]
    Open,
    /// Cause being looked into.
    Investigating,
    /// Fix applied, watching for recurrence.
    Monitoring,
    /// Over.
    Resolved,
    /// A status this client does not know, kept verbatim.
    Other(String),
}

impl IncidentStatus {
    /// Wire spelling, e.g. `"investigating"`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "open",
            Self::Investigating => "investigating",
            Self::Monitoring => "monitoring",
            Self::Resolved => "resolved",
            Self::Other(value) => value.as_str(),
        }
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for IncidentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "open" => Self::Open,
            "investigating" => Self::Investigating,
            "monitoring" => Self::Monitoring,
            "resolved" => Self::Resolved,
            _ => Self::Other(value),
        }
    }
}

impl From<IncidentStatus> for String {
    fn from(value: IncidentStatus) -> Self {
        match value {
            IncidentStatus::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

/// Whether the record describes an unplanned incident or planned maintenance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentKind {
    /// Unplanned disruption.
    #[default]
    Incident,
    /// Planned work.
    Maintenance,
}

/// One entry of an incident's update timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentUpdate {
    /// Incident status set by this update, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<IncidentStatus>,
    /// Update text; `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// When the update was posted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    /// Older servers send this instead of `timestamp`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Fields this client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Incident record as returned by `/incidents` and the public snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Server identifier.
    pub id: EntityId,
    /// Headline shown on the status page.
    pub title: String,
    /// Longer explanation, when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Missing or `null` reads as [`IncidentStatus::Open`].
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: IncidentStatus,
    /// Wire field `incidentType`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_type: Option<IncidentKind>,
    /// Affected services; the API sends either ids or embedded records.
    #[serde(default, deserialize_with = "null_as_default")]
    pub services: Vec<Value>,
    /// Timeline, oldest first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub updates: Vec<IncidentUpdate>,
    /// When the disruption began.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<Timestamp>,
    /// When the record was filed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Set once resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<Timestamp>,
    /// Fields this client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Incident {
    /// Resolved incidents move to the history list.
    pub fn is_resolved(&self) -> bool {
        self.status == IncidentStatus::Resolved
    }
}

/// Split incidents into `(active, resolved)` keeping their order.
pub fn partition_incidents(incidents: &[Incident]) -> (Vec<&Incident>, Vec<&Incident>) {
    incidents.iter().partition(|incident| !incident.is_resolved())
}

/// Reasons an incident form or update note is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IncidentValidationError {
    /// The title is blank.
    #[error("Title is required")]
    MissingTitle,
    /// The description is blank.
    #[error("Description is required")]
    MissingDescription,
    /// No affected service was selected.
    #[error("Select at least one service")]
    NoServices,
    /// The update note is blank.
    #[error("Update message cannot be empty")]
    EmptyUpdate,
}

/// Raw input of the "new incident" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentForm {
    /// Required headline.
    pub title: String,
    /// Required explanation.
    pub description: String,
    /// Status the incident opens with.
    pub status: IncidentStatus,
    /// Incident or planned maintenance.
    pub kind: IncidentKind,
    /// Ids of the affected services.
    pub services: Vec<EntityId>,
    /// Optional first timeline message; blank means none.
    pub initial_update: String,
}

/// Validated payload for `POST /incidents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncident {
    title: String,
    description: String,
    status: IncidentStatus,
    incident_type: IncidentKind,
    services: Vec<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    initial_update: Option<String>,
}

impl NewIncident {
    /// Validate the form; checks run in the order the form shows its fields.
    pub fn try_from_form(form: &IncidentForm) -> Result<Self, IncidentValidationError> {
        let title = form.title.trim();
        if title.is_empty() {
            return Err(IncidentValidationError::MissingTitle);
        }
        let description = form.description.trim();
        if description.is_empty() {
            return Err(IncidentValidationError::MissingDescription);
        }
        if form.services.is_empty() {
            return Err(IncidentValidationError::NoServices);
        }
        let initial_update = Some(form.initial_update.trim())
            .filter(|update| !update.is_empty())
            .map(str::to_owned);

        Ok(Self {
            title: title.to_owned(),
            description: description.to_owned(),
            status: form.status.clone(),
            incident_type: form.kind,
            services: form.services.clone(),
            initial_update,
        })
    }

    /// Trimmed title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Trimmed first update, when one was given.
    pub fn initial_update(&self) -> Option<&str> {
        self.initial_update.as_deref()
    }
}

/// Non-empty message posted to an incident's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentNote {
    message: String,
}

impl IncidentNote {
    /// Trim `message`, refusing it when nothing is left.
    pub fn try_new(message: &str) -> Result<Self, IncidentValidationError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(IncidentValidationError::EmptyUpdate);
        }
        Ok(Self {
            message: message.to_owned(),
        })
    }

    /// Trimmed text.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}
