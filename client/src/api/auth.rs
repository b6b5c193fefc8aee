//! Authentication endpoints.

use serde::Deserialize;

use super::ApiClient;
use super::dto::{LoginRequestDto, RegisterRequestDto};
use crate::domain::{
    BearerToken, ClientResult, LoginCredentials, Organization, RegistrationRequest, User,
};

/// Successful login or registration response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthGrant {
    /// Token for subsequent requests.
    pub token: BearerToken,
    /// Signed-in user.
    pub user: User,
    /// Organization the user belongs to, when returned.
    #[serde(default)]
    pub organization: Option<Organization>,
}

/// Response of `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    /// Current user.
    pub user: User,
    /// Current organization, when returned.
    #[serde(default)]
    pub organization: Option<Organization>,
}

/// Accessor for `/auth/*`.
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/login`.
    pub async fn login(&self, credentials: &LoginCredentials) -> ClientResult<AuthGrant> {
        self.client
            .post_as("/auth/login", &LoginRequestDto::from(credentials))
            .await
    }

    /// `POST /auth/register`.
    pub async fn register(&self, request: &RegistrationRequest) -> ClientResult<AuthGrant> {
        self.client
            .post_as("/auth/register", &RegisterRequestDto::from(request))
            .await
    }

    /// `GET /auth/me` using the client's current token.
    pub async fn me(&self) -> ClientResult<Profile> {
        self.client.get_as("/auth/me").await
    }
}
