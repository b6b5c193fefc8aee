//! Session store: the single owner of "who is logged in".
//!
//! Every transition runs its side effects (persist the snapshot, configure
//! the access layer's token, publish the new state) before the operation
//! returns. Overlapping transitions are not fenced; the last one to finish
//! wins.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::{ApiClient, AuthGrant};
use crate::domain::ports::{Notifier, SessionStorage};
use crate::domain::{
    ClientError, ClientResult, LoginCredentials, Notice, PersistedSession, RegistrationForm,
    RegistrationRequest, RouteArea, RouteDecision, Session, ValidationError,
};

/// Storage key holding the persisted session snapshot.
pub const SESSION_STORAGE_KEY: &str = "statuspage_auth";

/// Notice shown when a profile refresh ends the session.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

/// Owned, injectable session state container.
///
/// ## Invariants
/// - The published [`Session`] and the access layer's token always agree once
///   an operation has returned.
/// - Hydration reads storage at most once.
pub struct SessionStore {
    api: Arc<ApiClient>,
    storage: Arc<dyn SessionStorage>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<Session>,
}

impl SessionStore {
    /// Create a store in the hydrating state; call [`SessionStore::hydrate`]
    /// to resolve it.
    pub fn new(
        api: Arc<ApiClient>,
        storage: Arc<dyn SessionStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (state, _) = watch::channel(Session::hydrating());
        Self {
            api,
            storage,
            notifier,
            state,
        }
    }

    /// Access layer shared with the store.
    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    /// Current session.
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receiver notified on every transition.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Guard decision for `area` given the current session.
    pub fn route_decision(&self, area: RouteArea) -> RouteDecision {
        self.state.borrow().route_decision(area)
    }

    /// Restore the persisted session, once.
    ///
    /// Missing, unreadable, or incomplete snapshots resolve to an anonymous
    /// session. Later calls return the current session untouched.
    pub fn hydrate(&self) -> Session {
        if !self.state.borrow().is_loading() {
            return self.session();
        }

        let session = self.read_persisted().unwrap_or_else(Session::anonymous);
        self.api.set_token(session.token().cloned());
        self.state.send_replace(session.clone());
        info!(phase = ?session.phase(), "session hydrated");
        session
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without a network call when either
    /// field is blank; otherwise propagates the access layer's error and
    /// leaves the session unchanged.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        let credentials = self.validated(LoginCredentials::try_from_parts(email, password))?;
        let grant = self.api.auth().login(&credentials).await?;
        let greeting = format!("Welcome back, {}", grant.user.name);
        let session = self.establish(grant);
        self.notifier.notify(&Notice::success(greeting));
        Ok(session)
    }

    /// Register a new account, creating or joining an organization.
    ///
    /// # Errors
    ///
    /// Same contract as [`SessionStore::login`]; incomplete forms fail with
    /// [`ClientError::Validation`] before any request is sent.
    pub async fn register(&self, form: &RegistrationForm) -> ClientResult<Session> {
        let request = self.validated(RegistrationRequest::try_from_form(form))?;
        let grant = self.api.auth().register(&request).await?;
        let greeting = match grant.organization.as_ref() {
            Some(organization) if !organization.name.is_empty() => {
                format!("Welcome to {}", organization.name)
            }
            _ => "Welcome aboard".to_owned(),
        };
        let session = self.establish(grant);
        self.notifier.notify(&Notice::success(greeting));
        Ok(session)
    }

    /// End the session locally. Never fails; storage problems are logged.
    pub fn logout(&self) {
        self.api.set_token(None);
        self.state.send_replace(Session::anonymous());
        if let Err(error) = self.storage.remove(SESSION_STORAGE_KEY) {
            warn!(error = %error, "failed to clear persisted session");
        }
        info!("session ended");
    }

    /// Re-fetch the profile for the current token and merge it in.
    ///
    /// # Errors
    ///
    /// Any failure logs out, emits a session-expired notice, and returns
    /// [`ClientError::SessionExpired`] wrapping the cause.
    pub async fn refresh_profile(&self) -> ClientResult<Session> {
        match self.api.auth().me().await {
            Ok(profile) => {
                let current = self.session();
                let Some(next) = current.with_profile(profile.user, profile.organization) else {
                    return Ok(current);
                };
                self.persist(&next);
                self.state.send_replace(next.clone());
                Ok(next)
            }
            Err(error) => {
                warn!(error = %error, "profile refresh failed; ending session");
                self.notifier.notify(&Notice::error(SESSION_EXPIRED_MESSAGE));
                self.logout();
                Err(ClientError::session_expired(error))
            }
        }
    }

    fn establish(&self, grant: AuthGrant) -> Session {
        let AuthGrant {
            token,
            user,
            organization,
        } = grant;
        let user_id = user.id.clone();
        let session = Session::authenticated(token.clone(), user, organization);
        self.state.send_replace(session.clone());
        self.persist(&session);
        self.api.set_token(Some(token));
        info!(user_id = %user_id, "session established");
        session
    }

    fn validated<T, E>(&self, result: Result<T, E>) -> ClientResult<T>
    where
        E: Into<ValidationError>,
    {
        result.map_err(|error| {
            let error: ValidationError = error.into();
            self.notifier.notify(&Notice::error(error.to_string()));
            ClientError::Validation(error)
        })
    }

    fn persist(&self, session: &Session) {
        let serialised = match serde_json::to_string(&session.to_persisted()) {
            Ok(value) => value,
            Err(error) => {
                warn!(error = %error, "failed to serialise session snapshot");
                return;
            }
        };
        if let Err(error) = self.storage.write(SESSION_STORAGE_KEY, &serialised) {
            warn!(error = %error, "failed to persist session snapshot");
        }
    }

    fn read_persisted(&self) -> Option<Session> {
        let raw = match self.storage.read(SESSION_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                warn!(error = %error, "failed to read persisted session");
                return None;
            }
        };
        match serde_json::from_str::<PersistedSession>(&raw) {
            Ok(snapshot) => {
                let session = snapshot.into_session();
                if session.is_none() {
                    warn!("persisted session lacks a token or user; ignoring it");
                }
                session
            }
            Err(error) => {
                warn!(error = %error, "persisted session is corrupt; ignoring it");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests;
