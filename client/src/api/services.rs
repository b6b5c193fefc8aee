//! Service management endpoints used by the dashboard.

use super::ApiClient;
use super::dto::{ServiceEnvelope, ServicesEnvelope, StatusChangeDto};
use crate::domain::{ClientResult, EntityId, NewService, Service, ServiceStatus};

/// Accessor for `/services`.
pub struct ServicesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ServicesApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /services`.
    pub async fn list(&self) -> ClientResult<Vec<Service>> {
        let envelope: ServicesEnvelope = self.client.get_as("/services").await?;
        Ok(envelope.services)
    }

    /// `POST /services`.
    pub async fn create(&self, service: &NewService) -> ClientResult<Service> {
        let envelope: ServiceEnvelope = self.client.post_as("/services", service).await?;
        Ok(envelope.service)
    }

    /// `PUT /services/:id/status` with an audit message naming the new status.
    pub async fn update_status(&self, id: &EntityId, status: &ServiceStatus) -> ClientResult<Service> {
        let body = StatusChangeDto {
            status,
            message: format!("Status updated to {status}"),
        };
        let envelope: ServiceEnvelope = self
            .client
            .put_as(&format!("/services/{id}/status"), Some(&body))
            .await?;
        Ok(envelope.service)
    }

    /// `DELETE /services/:id`.
    pub async fn delete(&self, id: &EntityId) -> ClientResult<()> {
        self.client.delete(&format!("/services/{id}")).await?;
        Ok(())
    }
}
