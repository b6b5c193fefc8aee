//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod http_transport;
mod notifier;
mod session_storage;

#[cfg(test)]
pub use http_transport::MockHttpTransport;
pub use http_transport::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransport, ScriptedHttpTransport, TransportError,
};
#[cfg(test)]
pub use notifier::MockNotifier;
pub use notifier::{Notifier, RecordingNotifier};
#[cfg(test)]
pub use session_storage::MockSessionStorage;
pub use session_storage::{InMemorySessionStorage, SessionStorage, StorageError};
