//! Incident management endpoints used by the dashboard.

use serde_json::Value;

use super::ApiClient;
use super::dto::{IncidentEnvelope, IncidentsEnvelope};
use crate::domain::{ClientResult, EntityId, Incident, IncidentNote, NewIncident};

/// Accessor for `/incidents`.
pub struct IncidentsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> IncidentsApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /incidents`.
    pub async fn list(&self) -> ClientResult<Vec<Incident>> {
        let envelope: IncidentsEnvelope = self.client.get_as("/incidents").await?;
        Ok(envelope.incidents)
    }

    /// `POST /incidents`.
    pub async fn create(&self, incident: &NewIncident) -> ClientResult<Incident> {
        let envelope: IncidentEnvelope = self.client.post_as("/incidents", incident).await?;
        Ok(envelope.incident)
    }

    /// `PUT /incidents/:id/update`, appending `note` to the timeline.
    pub async fn post_update(&self, id: &EntityId, note: &IncidentNote) -> ClientResult<Incident> {
        let envelope: IncidentEnvelope = self
            .client
            .put_as(&format!("/incidents/{id}/update"), Some(note))
            .await?;
        Ok(envelope.incident)
    }

    /// `PUT /incidents/:id/resolve`.
    pub async fn resolve(&self, id: &EntityId) -> ClientResult<Incident> {
        let envelope: IncidentEnvelope = self
            .client
            .put_as::<Value, _>(&format!("/incidents/{id}/resolve"), None)
            .await?;
        Ok(envelope.incident)
    }
}
