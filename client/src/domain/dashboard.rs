//! Dashboard read models derived from services and incidents.

use super::incident::{Incident, partition_incidents};
use super::service::{Service, ServiceStatus};

/// Worst known status across `services`; `None` when there are no services.
///
/// Unrecognised statuses rank as [`ServiceStatus::Operational`].
///
/// # Examples
/// ```
/// use status_client::domain::{Service, ServiceStatus, overall_status};
///
/// let services: Vec<Service> = serde_json::from_str(
///     r#"[{"id":1,"name":"API","status":"Degraded"},{"id":2,"name":"Web","status":"Operational"}]"#,
/// )
/// .unwrap();
/// assert_eq!(overall_status(&services), Some(ServiceStatus::Degraded));
/// assert_eq!(overall_status(&[]), None);
/// ```
pub fn overall_status(services: &[Service]) -> Option<ServiceStatus> {
    services
        .iter()
        .map(|service| match service.status.severity() {
            Some(severity) => (severity, service.status.clone()),
            None => (0, ServiceStatus::Operational),
        })
        .max_by_key(|(severity, _)| *severity)
        .map(|(_, status)| status)
}

/// Counters shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    /// See [`overall_status`].
    pub overall_status: Option<ServiceStatus>,
    /// Number of services listed.
    pub service_count: usize,
    /// Incidents not yet resolved.
    pub active_incidents: usize,
    /// Incidents in the history list.
    pub resolved_incidents: usize,
}

impl DashboardSummary {
    /// Count `services` and split `incidents` by resolution.
    pub fn from_records(services: &[Service], incidents: &[Incident]) -> Self {
        let (active, resolved) = partition_incidents(incidents);
        Self {
            overall_status: overall_status(services),
            service_count: services.len(),
            active_incidents: active.len(),
            resolved_incidents: resolved.len(),
        }
    }
}
