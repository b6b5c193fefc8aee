//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest-backed [`HttpTransport`](crate::domain::ports::HttpTransport)
//! - **storage**: file-backed [`SessionStorage`](crate::domain::ports::SessionStorage)
//!   with atomic writes
//! - **notifier**: notices routed to `tracing`
//!
//! Adapters translate between port types and infrastructure types. They
//! contain no session logic.

pub mod http;
pub mod notifier;
pub mod storage;
