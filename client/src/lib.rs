//! Session and API access core for the status page client.
//!
//! Layers follow a hexagonal split:
//! - [`domain`]: records, validation, errors, and ports.
//! - [`api`]: the access layer every server call flows through.
//! - [`session`]: the session store and its lifecycle.
//! - [`admin`]: service and incident management with notices.
//! - [`outbound`]: adapters for HTTP, durable storage, and notices.
//! - [`bootstrap`]: wiring from [`config::ClientSettings`] to a hydrated
//!   [`bootstrap::StatusPageClient`].

pub mod admin;
pub mod api;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod outbound;
pub mod session;
pub mod telemetry;

pub use admin::AdminConsole;
pub use bootstrap::{BootstrapError, StatusPageClient};
pub use session::{SESSION_STORAGE_KEY, SessionStore};
