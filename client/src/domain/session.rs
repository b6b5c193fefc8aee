//! Session model: who is logged in, and for which organization.
//!
//! A [`Session`] is either hydrating, anonymous, or authenticated. The
//! authenticated form always carries both a token and a user, so the "token
//! present iff user present" rule holds by construction.

use serde::{Deserialize, Serialize};

use super::identity::{BearerToken, Organization, User};

/// Lifecycle phase derived from a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Persisted state has not been read yet.
    Hydrating,
    /// Nobody is logged in.
    Anonymous,
    /// A token and user are held.
    Authenticated,
}

/// Client-held authentication state.
///
/// Serialises to `{ user, organization, token, loading }` for UI consumers.
///
/// # Examples
/// ```
/// use status_client::domain::{Session, SessionPhase};
///
/// let session = Session::hydrating();
/// assert!(session.is_loading());
/// assert_eq!(session.phase(), SessionPhase::Hydrating);
/// assert_eq!(Session::anonymous().phase(), SessionPhase::Anonymous);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    user: Option<User>,
    organization: Option<Organization>,
    token: Option<BearerToken>,
    loading: bool,
}

impl Session {
    /// Initial state before hydration.
    pub fn hydrating() -> Self {
        Self {
            user: None,
            organization: None,
            token: None,
            loading: true,
        }
    }

    /// Resolved state with nobody logged in.
    pub fn anonymous() -> Self {
        Self {
            loading: false,
            ..Self::hydrating()
        }
    }

    /// Resolved state for a logged-in user.
    pub fn authenticated(
        token: BearerToken,
        user: User,
        organization: Option<Organization>,
    ) -> Self {
        Self {
            user: Some(user),
            organization,
            token: Some(token),
            loading: false,
        }
    }

    /// Logged-in user.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Organization the user acts for, when the server named one.
    pub fn organization(&self) -> Option<&Organization> {
        self.organization.as_ref()
    }

    /// Bearer token sent with API calls.
    pub fn token(&self) -> Option<&BearerToken> {
        self.token.as_ref()
    }

    /// `true` until hydration resolves.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// `true` when a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Phase derived from the loading flag and token.
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Hydrating
        } else if self.is_authenticated() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }

    /// Replace the profile of an authenticated session, keeping its token.
    ///
    /// Returns `None` when the session is not authenticated.
    pub fn with_profile(&self, user: User, organization: Option<Organization>) -> Option<Self> {
        let token = self.token.clone()?;
        Some(Self::authenticated(token, user, organization))
    }

    /// Snapshot written to durable storage; `loading` is never persisted.
    pub fn to_persisted(&self) -> PersistedSession {
        PersistedSession {
            user: self.user.clone(),
            organization: self.organization.clone(),
            token: self.token.clone(),
        }
    }

    /// Guard decision for a screen in `area`.
    ///
    /// # Examples
    /// ```
    /// use status_client::domain::{RouteArea, RouteDecision, Session};
    ///
    /// assert_eq!(
    ///     Session::anonymous().route_decision(RouteArea::Dashboard),
    ///     RouteDecision::RedirectToLogin
    /// );
    /// assert_eq!(
    ///     Session::hydrating().route_decision(RouteArea::Auth),
    ///     RouteDecision::Pending
    /// );
    /// ```
    pub fn route_decision(&self, area: RouteArea) -> RouteDecision {
        match (self.phase(), area) {
            (SessionPhase::Hydrating, _) => RouteDecision::Pending,
            (SessionPhase::Authenticated, RouteArea::Dashboard)
            | (SessionPhase::Anonymous, RouteArea::Auth) => RouteDecision::Allowed,
            (SessionPhase::Anonymous, RouteArea::Dashboard) => RouteDecision::RedirectToLogin,
            (SessionPhase::Authenticated, RouteArea::Auth) => RouteDecision::RedirectToDashboard,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::hydrating()
    }
}

/// Durable snapshot of a [`Session`].
///
/// Every field is optional on read so partially written or older snapshots
/// still decode; [`PersistedSession::into_session`] decides whether the
/// snapshot is usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    /// Profile at the time of writing.
    #[serde(default)]
    pub user: Option<User>,
    /// Organization at the time of writing.
    #[serde(default)]
    pub organization: Option<Organization>,
    /// Token at the time of writing.
    #[serde(default)]
    pub token: Option<BearerToken>,
}

impl PersistedSession {
    /// Restore an authenticated session; requires both a token and a user.
    pub fn into_session(self) -> Option<Session> {
        match (self.token, self.user) {
            (Some(token), Some(user)) => Some(Session::authenticated(token, user, self.organization)),
            _ => None,
        }
    }
}

/// Screen groups guarded by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteArea {
    /// Admin dashboard; requires a session.
    Dashboard,
    /// Login and registration; only for anonymous visitors.
    Auth,
}

/// Outcome of [`Session::route_decision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Hydration still running; show a placeholder.
    Pending,
    /// Render the screen.
    Allowed,
    /// Anonymous visitor on a dashboard screen.
    RedirectToLogin,
    /// Signed-in user on a login or registration screen.
    RedirectToDashboard,
}
