//! Domain primitives mirrored from the status page API.
//!
//! Purpose: define strongly typed records for the session, the identities it
//! carries, and the service/incident data shown on the dashboard and public
//! status view. Nothing in here performs I/O; adapters reach the outside world
//! through the traits in [`ports`].
//!
//! Public surface:
//! - Session (alias to `session::Session`): who is logged in, and for which
//!   organization.
//! - ClientError (alias to `error::ClientError`): tagged failure union every
//!   operation returns.
//! - Service / Incident: dashboard records plus their validated forms.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod identity;
pub mod incident;
pub mod notice;
pub mod ports;
pub mod service;
pub mod session;
pub mod status_snapshot;
pub mod timestamp;
pub(crate) mod wire;

pub use self::auth::{
    LoginCredentials, LoginValidationError, RegistrationForm, RegistrationMode,
    RegistrationModeKind, RegistrationRequest, RegistrationValidationError,
};
pub use self::dashboard::{DashboardSummary, overall_status};
pub use self::error::{
    ApiError, ClientError, REQUEST_FAILED_MESSAGE, UNREACHABLE_SERVER_MESSAGE, ValidationError,
};
pub use self::identity::{BearerToken, EntityId, Organization, TokenValidationError, User};
pub use self::incident::{
    Incident, IncidentForm, IncidentKind, IncidentNote, IncidentStatus, IncidentUpdate,
    IncidentValidationError, NewIncident, partition_incidents,
};
pub use self::notice::{Notice, NoticeLevel};
pub use self::service::{NewService, Service, ServiceForm, ServiceStatus, ServiceValidationError};
pub use self::session::{PersistedSession, RouteArea, RouteDecision, Session, SessionPhase};
pub use self::status_snapshot::{
    PublicOrganization, StatusSnapshot, TimelineEntry, TimelineKind, initial_organization,
};
pub use self::timestamp::Timestamp;

/// Convenient client result alias.
///
/// # Examples
/// ```
/// use status_client::domain::{ClientResult, ClientError, ApiError};
///
/// fn lookup() -> ClientResult<()> {
///     Err(ClientError::Api(ApiError::new("Not found", Some(404))))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ClientResult<T> = Result<T, ClientError>;
