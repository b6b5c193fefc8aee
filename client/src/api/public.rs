//! Unauthenticated reads backing the public status view.

use url::form_urlencoded;

use super::ApiClient;
use super::dto::OrganizationsEnvelope;
use crate::domain::{ClientResult, PublicOrganization, StatusSnapshot};

/// Accessor for `/public/*`.
pub struct PublicApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PublicApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Organizations that publish a status page; empty when none are listed.
    pub async fn organizations(&self) -> ClientResult<Vec<PublicOrganization>> {
        let payload = self.client.get("/public/organizations").await?;
        let Some(value) = payload else {
            return Ok(Vec::new());
        };
        let envelope: OrganizationsEnvelope = super::decode(Some(value))?;
        Ok(envelope.organizations)
    }

    /// Status snapshot for `organization`, or the server's default when
    /// `None`.
    pub async fn status_snapshot(&self, organization: Option<&str>) -> ClientResult<StatusSnapshot> {
        self.client.get_as(&status_path(organization)).await
    }
}

fn status_path(organization: Option<&str>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(identifier) = organization.filter(|value| !value.is_empty()) {
        query.append_pair("organizationId", identifier);
    }
    format!("/public/status?{}", query.finish())
}
