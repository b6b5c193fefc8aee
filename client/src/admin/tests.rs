//! Tests for the admin console.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    ApiResponse, HttpMethod, RecordingNotifier, ScriptedHttpTransport, TransportError,
};
use crate::domain::{
    IncidentKind, IncidentStatus, IncidentValidationError, NoticeLevel, ServiceValidationError,
    UNREACHABLE_SERVER_MESSAGE, ValidationError,
};
use rstest::{fixture, rstest};
use serde_json::json;

const BASE_URL: &str = "http://localhost:4500/api";

struct Harness {
    transport: ScriptedHttpTransport,
    notifier: RecordingNotifier,
    console: AdminConsole,
}

impl Harness {
    fn notices(&self) -> Vec<Notice> {
        self.notifier.notices()
    }
}

#[fixture]
fn harness() -> Harness {
    let transport = ScriptedHttpTransport::new();
    let notifier = RecordingNotifier::new();
    let api = Arc::new(ApiClient::new(BASE_URL, Arc::new(transport.clone())));
    let console = AdminConsole::new(api, Arc::new(notifier.clone()));
    Harness {
        transport,
        notifier,
        console,
    }
}

fn incident_form() -> IncidentForm {
    IncidentForm {
        title: "Checkout errors".to_owned(),
        description: "Elevated 5xx".to_owned(),
        status: IncidentStatus::Investigating,
        kind: IncidentKind::Incident,
        services: vec![EntityId::Number(1)],
        initial_update: String::new(),
    }
}

#[rstest]
#[tokio::test]
async fn blank_service_name_is_refused_with_a_notice(harness: Harness) {
    let err = harness
        .console
        .create_service(&ServiceForm::default())
        .await
        .expect_err("blank name is refused");

    assert_eq!(
        err,
        ClientError::Validation(ValidationError::Service(ServiceValidationError::MissingName))
    );
    assert!(harness.transport.requests().is_empty());
    assert_eq!(harness.notices(), vec![Notice::error("Service name is required")]);
}

#[rstest]
#[case::title(IncidentForm { title: " ".to_owned(), ..incident_form() }, IncidentValidationError::MissingTitle)]
#[case::services(IncidentForm { services: Vec::new(), ..incident_form() }, IncidentValidationError::NoServices)]
#[tokio::test]
async fn incomplete_incident_forms_are_refused_with_a_notice(
    harness: Harness,
    #[case] form: IncidentForm,
    #[case] expected: IncidentValidationError,
) {
    let err = harness
        .console
        .create_incident(&form)
        .await
        .expect_err("form is refused");

    assert_eq!(err, ClientError::from(expected.clone()));
    assert!(harness.transport.requests().is_empty());
    assert_eq!(harness.notices(), vec![Notice::error(expected.to_string())]);
}

#[rstest]
#[tokio::test]
async fn blank_incident_update_is_refused(harness: Harness) {
    let err = harness
        .console
        .post_incident_update(&EntityId::Number(3), "   ")
        .await
        .expect_err("blank note is refused");

    assert_eq!(err.to_string(), "Update message cannot be empty");
    assert!(harness.transport.requests().is_empty());
}

#[rstest]
#[tokio::test]
async fn created_service_raises_a_success_notice(harness: Harness) {
    harness.transport.push_response(ApiResponse::json(
        201,
        &json!({ "service": { "id": 7, "name": "Checkout", "status": "Operational" } }),
    ));

    let service = harness
        .console
        .create_service(&ServiceForm {
            name: " Checkout ".to_owned(),
            ..ServiceForm::default()
        })
        .await
        .expect("service created");

    assert_eq!(service.id, EntityId::Number(7));
    assert_eq!(harness.notices(), vec![Notice::success("Service created")]);
    let requests = harness.transport.requests();
    let [request] = requests.as_slice() else {
        panic!("expected one request, got {requests:?}");
    };
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, format!("{BASE_URL}/services"));
}

#[rstest]
#[tokio::test]
async fn incident_workflow_reports_each_step(harness: Harness) {
    let incident = |status: &str| {
        json!({ "incident": { "id": 3, "title": "Checkout errors", "status": status } })
    };
    harness
        .transport
        .push_response(ApiResponse::json(201, &incident("investigating")));
    harness
        .transport
        .push_response(ApiResponse::json(200, &incident("monitoring")));
    harness
        .transport
        .push_response(ApiResponse::json(200, &incident("resolved")));
    let console = &harness.console;

    let created = console
        .create_incident(&incident_form())
        .await
        .expect("incident created");
    console
        .post_incident_update(&created.id, " Fix deployed ")
        .await
        .expect("update posted");
    let resolved = console
        .resolve_incident(&created.id)
        .await
        .expect("incident resolved");

    assert!(resolved.is_resolved());
    let messages: Vec<String> = harness
        .notices()
        .into_iter()
        .map(|notice| notice.message)
        .collect();
    assert_eq!(
        messages,
        vec!["Incident created", "Update added", "Incident resolved"]
    );
}

#[rstest]
#[tokio::test]
async fn server_failures_are_reported_and_returned(harness: Harness) {
    harness.transport.push_response(ApiResponse::json(
        403,
        &json!({ "message": "Admins only" }),
    ));
    harness
        .transport
        .push_error(TransportError::unreachable("connection refused"));

    let forbidden = harness
        .console
        .delete_service(&EntityId::Number(7))
        .await
        .expect_err("server refuses");
    let offline = harness
        .console
        .update_service_status(&EntityId::Number(7), &ServiceStatus::Degraded)
        .await
        .expect_err("server unreachable");

    assert_eq!(forbidden.status(), Some(403));
    assert!(offline.is_network());
    let notices = harness.notices();
    assert!(notices.iter().all(|notice| notice.level == NoticeLevel::Error));
    let messages: Vec<&str> = notices.iter().map(|notice| notice.message.as_str()).collect();
    assert_eq!(messages, vec!["Admins only", UNREACHABLE_SERVER_MESSAGE]);
}
