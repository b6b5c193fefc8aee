//! Wire DTOs for request bodies and response envelopes.
//!
//! Responses wrap records in a named field (`{ "service": ... }`); the
//! envelopes here unwrap them before records reach callers.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Incident, LoginCredentials, PublicOrganization, RegistrationMode, RegistrationRequest,
    Service, ServiceStatus,
};
use crate::domain::wire::null_as_default;

#[derive(Serialize)]
pub(super) struct LoginRequestDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

impl<'a> From<&'a LoginCredentials> for LoginRequestDto<'a> {
    fn from(credentials: &'a LoginCredentials) -> Self {
        Self {
            email: credentials.email(),
            password: credentials.password(),
        }
    }
}

/// Registration body; only the selected mode's fields are serialised.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RegisterRequestDto<'a> {
    pub(super) name: &'a str,
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) organization_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) organization_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) invite_token: Option<&'a str>,
}

impl<'a> From<&'a RegistrationRequest> for RegisterRequestDto<'a> {
    fn from(request: &'a RegistrationRequest) -> Self {
        let (organization_name, organization_id, invite_token) = match request.mode() {
            RegistrationMode::CreateOrganization { organization_name } => {
                (Some(organization_name.as_str()), None, None)
            }
            RegistrationMode::JoinOrganization {
                organization_id,
                invite_token,
            } => (
                None,
                Some(organization_id.as_str()),
                Some(invite_token.as_str()),
            ),
        };
        Self {
            name: request.name(),
            email: request.email(),
            password: request.password(),
            organization_name,
            organization_id,
            invite_token,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct StatusChangeDto<'a> {
    pub(super) status: &'a ServiceStatus,
    pub(super) message: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct OrganizationsEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub(super) organizations: Vec<PublicOrganization>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ServicesEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub(super) services: Vec<Service>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ServiceEnvelope {
    pub(super) service: Service,
}

#[derive(Debug, Deserialize)]
pub(super) struct IncidentsEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub(super) incidents: Vec<Incident>,
}

#[derive(Debug, Deserialize)]
pub(super) struct IncidentEnvelope {
    pub(super) incident: Incident,
}
