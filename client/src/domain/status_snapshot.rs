//! Public status view records.
//!
//! The anonymous status page reads an aggregated snapshot per organization:
//! current service states, open incidents, history, and a merged timeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::identity::EntityId;
use super::incident::Incident;
use super::service::{Service, ServiceStatus};
use super::timestamp::Timestamp;
use super::wire::null_as_default;

/// Organization listed by `GET /public/organizations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicOrganization {
    /// Identifier used as the `orgId` query parameter.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Fields this client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Kind of event shown on the public timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineKind {
    /// A message posted on an incident.
    IncidentUpdate,
    /// A service changed state.
    ServiceStatus,
    /// Any kind this client does not know.
    #[serde(other)]
    Other,
}

/// One timeline event; incident updates and service status changes share the
/// same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    /// Source record id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// Wire field `type`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TimelineKind>,
    /// When the event happened, as sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    /// Incident or service status at that point, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Update text for incident updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Set for service status events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    /// Set for incident updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_title: Option<String>,
    /// Fields this client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TimelineEntry {
    /// Heading shown above the entry: the incident title for incident
    /// updates, the service name otherwise.
    pub fn subject(&self) -> Option<&str> {
        match self.kind {
            Some(TimelineKind::IncidentUpdate) => self.incident_title.as_deref(),
            _ => self.service_name.as_deref(),
        }
    }
}

/// Aggregated public view of one organization.
///
/// Every list tolerates being absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    /// Organization the snapshot describes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<PublicOrganization>,
    /// Worst service state, as computed by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_status: Option<ServiceStatus>,
    /// Server time the snapshot was built.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<Timestamp>,
    /// Current state of every public service.
    #[serde(default, deserialize_with = "null_as_default")]
    pub services: Vec<Service>,
    /// Incidents not yet resolved.
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_incidents: Vec<Incident>,
    /// Resolved incidents, newest first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub past_incidents: Vec<Incident>,
    /// Incident updates and service changes merged by time.
    #[serde(default, deserialize_with = "null_as_default")]
    pub timeline: Vec<TimelineEntry>,
}

/// Organization the public view opens with.
///
/// A configured default wins; otherwise the first listed organization is
/// used.
///
/// # Examples
/// ```
/// use status_client::domain::{PublicOrganization, initial_organization};
///
/// let orgs: Vec<PublicOrganization> =
///     serde_json::from_str(r#"[{"id":"acme","name":"Acme"}]"#).unwrap();
/// assert_eq!(initial_organization(None, &orgs).as_deref(), Some("acme"));
/// assert_eq!(initial_organization(Some("globex"), &orgs).as_deref(), Some("globex"));
/// assert_eq!(initial_organization(None, &[]), None);
/// ```
pub fn initial_organization(
    configured_default: Option<&str>,
    organizations: &[PublicOrganization],
) -> Option<String> {
    configured_default
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .or_else(|| organizations.first().map(|org| org.id.to_string()))
}
