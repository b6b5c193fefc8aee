//! Admin console workflows: service and incident management with notices.
//!
//! Each operation validates its form first, so a refused form never reaches
//! the network. Outcomes are surfaced through the [`Notifier`] port the same
//! way the session store reports sign-in results.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::domain::ports::Notifier;
use crate::domain::{
    ClientError, ClientResult, EntityId, Incident, IncidentForm, IncidentNote, NewIncident,
    NewService, Notice, Service, ServiceForm, ServiceStatus,
};

/// Service and incident management for signed-in administrators.
///
/// Uses whatever token the shared [`ApiClient`] currently carries.
pub struct AdminConsole {
    api: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
}

impl AdminConsole {
    /// Build a console over the shared access layer.
    pub fn new(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// Validate `form` and create the service.
    ///
    /// # Errors
    ///
    /// A blank name fails with [`ClientError::Validation`] before any
    /// request; server failures are returned after an error notice.
    pub async fn create_service(&self, form: &ServiceForm) -> ClientResult<Service> {
        let service = self.validated(NewService::try_from_form(form))?;
        let created = self.api.services().create(&service).await;
        self.report(created, "Service created")
    }

    /// Move a service to `status`.
    pub async fn update_service_status(
        &self,
        id: &EntityId,
        status: &ServiceStatus,
    ) -> ClientResult<Service> {
        let updated = self.api.services().update_status(id, status).await;
        self.report(updated, "Status updated")
    }

    /// Delete a service.
    pub async fn delete_service(&self, id: &EntityId) -> ClientResult<()> {
        let deleted = self.api.services().delete(id).await;
        self.report(deleted, "Service deleted")
    }

    /// Validate `form` and open the incident.
    ///
    /// # Errors
    ///
    /// Missing title, description or services fail with
    /// [`ClientError::Validation`] in that order, before any request.
    pub async fn create_incident(&self, form: &IncidentForm) -> ClientResult<Incident> {
        let incident = self.validated(NewIncident::try_from_form(form))?;
        let created = self.api.incidents().create(&incident).await;
        self.report(created, "Incident created")
    }

    /// Post `message` to the incident's timeline; blank messages are refused.
    pub async fn post_incident_update(
        &self,
        id: &EntityId,
        message: &str,
    ) -> ClientResult<Incident> {
        let note = self.validated(IncidentNote::try_new(message))?;
        let updated = self.api.incidents().post_update(id, &note).await;
        self.report(updated, "Update added")
    }

    /// Mark the incident resolved.
    pub async fn resolve_incident(&self, id: &EntityId) -> ClientResult<Incident> {
        let resolved = self.api.incidents().resolve(id).await;
        self.report(resolved, "Incident resolved")
    }

    fn validated<T, E>(&self, result: Result<T, E>) -> ClientResult<T>
    where
        E: Into<ClientError>,
    {
        result.map_err(|error| {
            let error = error.into();
            self.notifier.notify(&Notice::error(error.to_string()));
            error
        })
    }

    fn report<T>(&self, result: ClientResult<T>, success: &str) -> ClientResult<T> {
        match &result {
            Ok(_) => {
                info!(action = success, "admin action completed");
                self.notifier.notify(&Notice::success(success));
            }
            Err(error) => {
                warn!(error = %error, "admin action failed");
                self.notifier.notify(&Notice::error(error.to_string()));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests;
