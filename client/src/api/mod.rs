//! API access layer: the single gateway every server call goes through.
//!
//! [`ApiClient`] owns the base URL and the current bearer token, builds
//! requests for the [`HttpTransport`] port, and folds every failure into
//! [`ClientError`]. Typed accessors for each endpoint group borrow the client.

mod auth;
mod dto;
mod incidents;
mod public;
mod services;

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::domain::ports::{ApiRequest, ApiResponse, HttpMethod, HttpTransport, TransportError};
use crate::domain::{ApiError, BearerToken, ClientError, ClientResult};

pub use self::auth::{AuthApi, AuthGrant, Profile};
pub use self::incidents::IncidentsApi;
pub use self::public::PublicApi;
pub use self::services::ServicesApi;

/// Gateway to the status page REST API.
///
/// ## Invariants
/// - `base_url` never ends with `/` and does not change after construction.
/// - The `Authorization` header is sent only while a token is set.
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    token: RwLock<Option<BearerToken>>,
}

impl ApiClient {
    /// Create a client for `base_url`, dropping one trailing slash.
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        let mut base_url = base_url.into();
        if base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            transport,
            token: RwLock::new(None),
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Replace the token attached to subsequent requests; `None` clears it.
    pub fn set_token(&self, token: Option<BearerToken>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Token currently attached to requests.
    pub fn token(&self) -> Option<BearerToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Login, registration and profile endpoints.
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Unauthenticated status page endpoints.
    pub fn public(&self) -> PublicApi<'_> {
        PublicApi::new(self)
    }

    /// Service management endpoints.
    pub fn services(&self) -> ServicesApi<'_> {
        ServicesApi::new(self)
    }

    /// Incident management endpoints.
    pub fn incidents(&self) -> IncidentsApi<'_> {
        IncidentsApi::new(self)
    }

    /// `GET <base><path>`.
    pub async fn get(&self, path: &str) -> ClientResult<Option<Value>> {
        self.request(HttpMethod::Get, path, None).await
    }

    /// `POST <base><path>` with an optional JSON body.
    pub async fn post(&self, path: &str, body: Option<&Value>) -> ClientResult<Option<Value>> {
        self.request(HttpMethod::Post, path, body).await
    }

    /// `PUT <base><path>` with an optional JSON body.
    pub async fn put(&self, path: &str, body: Option<&Value>) -> ClientResult<Option<Value>> {
        self.request(HttpMethod::Put, path, body).await
    }

    /// `DELETE <base><path>`.
    pub async fn delete(&self, path: &str) -> ClientResult<Option<Value>> {
        self.request(HttpMethod::Delete, path, None).await
    }

    /// Perform one request and normalise its outcome.
    ///
    /// Returns the parsed JSON body, or `None` when the response is not JSON
    /// or its body is blank.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Network`] when the server cannot be reached.
    /// - [`ClientError::Api`] for non-success statuses.
    /// - [`ClientError::Decode`] when a JSON response is malformed.
    /// - [`ClientError::Transport`] when the request cannot be built or the
    ///   body cannot be read.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> ClientResult<Option<Value>> {
        let request = self.build_request(method, path, body);
        let response = self
            .transport
            .send(request)
            .await
            .map_err(map_transport_error)?;
        debug!(
            method = method.as_str(),
            path,
            status = response.status,
            "api request completed"
        );

        let payload = parse_payload(&response)?;
        if !response.is_success() {
            return Err(ClientError::Api(ApiError::from_response(
                response.status,
                payload,
            )));
        }
        Ok(payload)
    }

    fn build_request(&self, method: HttpMethod, path: &str, body: Option<&Value>) -> ApiRequest {
        let mut headers = vec![("Content-Type".to_owned(), "application/json".to_owned())];
        if let Some(token) = self.token() {
            headers.push((
                "Authorization".to_owned(),
                format!("Bearer {}", token.as_str()),
            ));
        }
        ApiRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers,
            body: body.map(Value::to_string),
        }
    }

    pub(crate) async fn get_as<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        decode(self.get(path).await?)
    }

    pub(crate) async fn post_as<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        decode(self.post(path, Some(&body)).await?)
    }

    pub(crate) async fn put_as<B, T>(&self, path: &str, body: Option<&B>) -> ClientResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let body = body.map(encode).transpose()?;
        decode(self.put(path, body.as_ref()).await?)
    }
}

fn map_transport_error(error: TransportError) -> ClientError {
    match error {
        TransportError::Unreachable { message } => {
            debug!(%message, "api server unreachable");
            ClientError::Network(ApiError::unreachable())
        }
        other => ClientError::transport(other.to_string()),
    }
}

fn parse_payload(response: &ApiResponse) -> ClientResult<Option<Value>> {
    if !response.is_json() || response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(&response.body)
        .map(Some)
        .map_err(|error| ClientError::decode(format!("invalid JSON payload: {error}")))
}

fn encode<B: Serialize>(body: &B) -> ClientResult<Value> {
    serde_json::to_value(body)
        .map_err(|error| ClientError::transport(format!("failed to encode request body: {error}")))
}

fn decode<T: DeserializeOwned>(payload: Option<Value>) -> ClientResult<T> {
    let value = payload.ok_or_else(|| ClientError::decode("expected a JSON response body"))?;
    serde_json::from_value(value)
        .map_err(|error| ClientError::decode(format!("unexpected response shape: {error}")))
}
