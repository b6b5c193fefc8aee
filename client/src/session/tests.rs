//! Tests for the session store.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    ApiResponse, HttpMethod, InMemorySessionStorage, MockSessionStorage, RecordingNotifier,
    ScriptedHttpTransport, StorageError, TransportError,
};
use crate::domain::{
    BearerToken, EntityId, NoticeLevel, RegistrationModeKind, SessionPhase,
    UNREACHABLE_SERVER_MESSAGE,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const BASE_URL: &str = "http://localhost:4500/api";

struct Harness {
    transport: ScriptedHttpTransport,
    storage: InMemorySessionStorage,
    notifier: RecordingNotifier,
    store: SessionStore,
}

impl Harness {
    fn with_storage(storage: InMemorySessionStorage) -> Self {
        let transport = ScriptedHttpTransport::new();
        let notifier = RecordingNotifier::new();
        let api = Arc::new(ApiClient::new(BASE_URL, Arc::new(transport.clone())));
        let store = SessionStore::new(api, Arc::new(storage.clone()), Arc::new(notifier.clone()));
        Self {
            transport,
            storage,
            notifier,
            store,
        }
    }

    fn persisted(&self) -> Option<Value> {
        self.storage
            .read(SESSION_STORAGE_KEY)
            .expect("in-memory read succeeds")
            .map(|raw| serde_json::from_str(&raw).expect("snapshot is JSON"))
    }

    fn last_notice(&self) -> Option<Notice> {
        self.notifier.notices().pop()
    }
}

#[fixture]
fn harness() -> Harness {
    let harness = Harness::with_storage(InMemorySessionStorage::new());
    harness.store.hydrate();
    harness
}

fn grant(token: &str) -> Value {
    json!({
        "token": token,
        "user": { "id": 1, "name": "Ada", "email": "ada@example.com", "role": "admin" },
        "organization": { "id": 9, "name": "Org" }
    })
}

#[test]
fn store_starts_hydrating() {
    let harness = Harness::with_storage(InMemorySessionStorage::new());
    assert_eq!(harness.store.session().phase(), SessionPhase::Hydrating);
    assert_eq!(
        harness.store.route_decision(RouteArea::Dashboard),
        RouteDecision::Pending
    );
}

#[test]
fn hydrate_restores_persisted_session() {
    let storage = InMemorySessionStorage::with_entry(
        SESSION_STORAGE_KEY,
        r#"{"token":"abc","user":{"id":1,"name":"A"},"organization":{"id":9,"name":"Org"}}"#,
    );
    let harness = Harness::with_storage(storage);

    let session = harness.store.hydrate();

    assert!(!session.is_loading());
    assert_eq!(session.token().map(BearerToken::as_str), Some("abc"));
    assert_eq!(session.user().map(|user| user.id.clone()), Some(EntityId::Number(1)));
    assert_eq!(session.organization().map(|org| org.name.as_str()), Some("Org"));
    assert_eq!(
        harness.store.api().token().as_ref().map(BearerToken::as_str),
        Some("abc")
    );
}

#[rstest]
#[case::corrupt("{not json")]
#[case::no_token(r#"{"user":{"id":1,"name":"A"}}"#)]
#[case::blank_token(r#"{"token":"","user":{"id":1,"name":"A"}}"#)]
fn hydrate_treats_unusable_snapshots_as_absent(#[case] raw: &str) {
    let harness = Harness::with_storage(InMemorySessionStorage::with_entry(SESSION_STORAGE_KEY, raw));

    let session = harness.store.hydrate();

    assert_eq!(session, Session::anonymous());
    assert!(harness.store.api().token().is_none());
}

#[test]
fn hydrate_survives_storage_read_failures() {
    let mut storage = MockSessionStorage::new();
    storage
        .expect_read()
        .times(1)
        .returning(|key| Err(StorageError::read(key, "permission denied")));
    let api = Arc::new(ApiClient::new(BASE_URL, Arc::new(ScriptedHttpTransport::new())));
    let store = SessionStore::new(api, Arc::new(storage), Arc::new(RecordingNotifier::new()));

    assert_eq!(store.hydrate(), Session::anonymous());
}

#[test]
fn hydrate_runs_once() {
    let harness = Harness::with_storage(InMemorySessionStorage::new());
    harness.store.hydrate();
    harness
        .storage
        .write(SESSION_STORAGE_KEY, &grant("late").to_string())
        .expect("in-memory write succeeds");

    assert_eq!(harness.store.hydrate(), Session::anonymous());
}

#[rstest]
#[tokio::test]
async fn login_establishes_and_persists_the_session(harness: Harness) {
    harness.transport.push_response(ApiResponse::json(200, &grant("tok-1")));
    let mut updates = harness.store.subscribe();

    let session = harness
        .store
        .login(" ada@example.com ", "secret")
        .await
        .expect("login succeeds");

    assert_eq!(session.phase(), SessionPhase::Authenticated);
    assert!(updates.has_changed().expect("sender is alive"));
    assert_eq!(*updates.borrow_and_update(), session);
    assert_eq!(
        harness.store.api().token().as_ref().map(BearerToken::as_str),
        Some("tok-1")
    );
    let persisted = harness.persisted().expect("snapshot is stored");
    assert_eq!(persisted.get("token"), Some(&json!("tok-1")));
    assert!(persisted.get("loading").is_none());

    let requests = harness.transport.requests();
    let request = requests.first().expect("login request sent");
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, format!("{BASE_URL}/auth/login"));
    assert_eq!(
        request.body.as_deref(),
        Some(r#"{"email":"ada@example.com","password":"secret"}"#)
    );
    assert_eq!(
        harness.last_notice(),
        Some(Notice::success("Welcome back, Ada"))
    );
}

#[rstest]
#[tokio::test]
async fn persisted_login_round_trips_through_hydration(harness: Harness) {
    harness.transport.push_response(ApiResponse::json(200, &grant("tok-1")));
    let session = harness
        .store
        .login("ada@example.com", "secret")
        .await
        .expect("login succeeds");

    let reloaded = Harness::with_storage(harness.storage.clone());
    assert_eq!(reloaded.store.hydrate(), session);
}

#[rstest]
#[case::blank_email("  ", "secret")]
#[case::blank_password("ada@example.com", "")]
#[tokio::test]
async fn login_validation_fails_without_network(
    harness: Harness,
    #[case] email: &str,
    #[case] password: &str,
) {
    let err = harness
        .store
        .login(email, password)
        .await
        .expect_err("blank fields are rejected");

    assert!(matches!(err, ClientError::Validation(_)));
    assert!(harness.transport.requests().is_empty());
    assert_eq!(
        harness.last_notice().map(|notice| notice.level),
        Some(NoticeLevel::Error)
    );
}

#[rstest]
#[tokio::test]
async fn rejected_login_leaves_state_unchanged(harness: Harness) {
    harness.transport.push_response(ApiResponse::json(
        401,
        &json!({ "message": "Invalid credentials" }),
    ));

    let err = harness
        .store
        .login("ada@example.com", "wrong")
        .await
        .expect_err("401 must fail");

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(harness.store.session(), Session::anonymous());
    assert!(harness.persisted().is_none());
    assert!(harness.notifier.notices().is_empty());
}

#[rstest]
#[tokio::test]
async fn unreachable_login_is_a_network_error(harness: Harness) {
    harness
        .transport
        .push_error(TransportError::unreachable("connection refused"));

    let err = harness
        .store
        .login("ada@example.com", "secret")
        .await
        .expect_err("unreachable must fail");

    assert!(err.is_network());
    assert_eq!(err.to_string(), UNREACHABLE_SERVER_MESSAGE);
    assert_eq!(harness.store.session(), Session::anonymous());
}

fn registration(mode: RegistrationModeKind) -> RegistrationForm {
    RegistrationForm {
        mode,
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        password: "secret".to_owned(),
        organization_name: "Acme".to_owned(),
        organization_id: "org-1".to_owned(),
        invite_token: "invite".to_owned(),
    }
}

#[rstest]
#[case::create_without_name(RegistrationForm { organization_name: " ".to_owned(), ..registration(RegistrationModeKind::CreateOrganization) })]
#[case::join_without_id(RegistrationForm { organization_id: String::new(), ..registration(RegistrationModeKind::JoinOrganization) })]
#[case::join_without_token(RegistrationForm { invite_token: String::new(), ..registration(RegistrationModeKind::JoinOrganization) })]
#[tokio::test]
async fn incomplete_registration_never_reaches_the_server(
    harness: Harness,
    #[case] form: RegistrationForm,
) {
    let err = harness
        .store
        .register(&form)
        .await
        .expect_err("incomplete form is rejected");

    assert!(matches!(err, ClientError::Validation(_)));
    assert!(harness.transport.requests().is_empty());
}

#[rstest]
#[tokio::test]
async fn register_welcomes_into_the_organization(harness: Harness) {
    harness.transport.push_response(ApiResponse::json(201, &grant("tok-2")));

    let session = harness
        .store
        .register(&registration(RegistrationModeKind::CreateOrganization))
        .await
        .expect("register succeeds");

    assert!(session.is_authenticated());
    assert_eq!(harness.last_notice(), Some(Notice::success("Welcome to Org")));
    let requests = harness.transport.requests();
    let body: Value = serde_json::from_str(
        requests
            .first()
            .and_then(|request| request.body.as_deref())
            .expect("register body sent"),
    )
    .expect("body is JSON");
    assert_eq!(body.get("organizationName"), Some(&json!("Acme")));
    assert!(body.get("inviteToken").is_none());
}

#[rstest]
#[tokio::test]
async fn register_without_organization_says_welcome_aboard(harness: Harness) {
    harness.transport.push_response(ApiResponse::json(
        201,
        &json!({ "token": "tok-3", "user": { "id": 2, "name": "Bo" } }),
    ));

    harness
        .store
        .register(&registration(RegistrationModeKind::JoinOrganization))
        .await
        .expect("register succeeds");

    assert_eq!(harness.last_notice(), Some(Notice::success("Welcome aboard")));
}

#[rstest]
#[tokio::test]
async fn logout_clears_everything(harness: Harness) {
    harness.transport.push_response(ApiResponse::json(200, &grant("tok-1")));
    harness
        .store
        .login("ada@example.com", "secret")
        .await
        .expect("login succeeds");

    harness.store.logout();

    assert_eq!(harness.store.session(), Session::anonymous());
    assert!(harness.store.api().token().is_none());
    assert!(!harness.storage.contains(SESSION_STORAGE_KEY));
}

#[test]
fn logout_tolerates_storage_failures() {
    let mut storage = MockSessionStorage::new();
    storage.expect_read().returning(|_| Ok(None));
    storage
        .expect_remove()
        .times(1)
        .returning(|key| Err(StorageError::remove(key, "read-only filesystem")));
    let api = Arc::new(ApiClient::new(BASE_URL, Arc::new(ScriptedHttpTransport::new())));
    let store = SessionStore::new(api, Arc::new(storage), Arc::new(RecordingNotifier::new()));
    store.hydrate();

    store.logout();

    assert_eq!(store.session(), Session::anonymous());
}

#[rstest]
#[tokio::test]
async fn refresh_merges_the_profile(harness: Harness) {
    harness.transport.push_response(ApiResponse::json(200, &grant("tok-1")));
    harness
        .store
        .login("ada@example.com", "secret")
        .await
        .expect("login succeeds");
    harness.transport.push_response(ApiResponse::json(
        200,
        &json!({ "user": { "id": 1, "name": "Ada L." }, "organization": { "id": 9, "name": "Org 2" } }),
    ));

    let session = harness.store.refresh_profile().await.expect("refresh succeeds");

    assert_eq!(session.user().map(|user| user.name.as_str()), Some("Ada L."));
    assert_eq!(session.token().map(BearerToken::as_str), Some("tok-1"));
    let requests = harness.transport.requests();
    let me = requests.last().expect("profile request sent");
    assert_eq!(me.url, format!("{BASE_URL}/auth/me"));
    assert_eq!(me.header("Authorization"), Some("Bearer tok-1"));
    let persisted = harness.persisted().expect("snapshot is stored");
    assert_eq!(
        persisted.pointer("/organization/name"),
        Some(&json!("Org 2"))
    );
}

#[rstest]
#[tokio::test]
async fn failed_refresh_forces_logout(harness: Harness) {
    harness.transport.push_response(ApiResponse::json(200, &grant("tok-1")));
    harness
        .store
        .login("ada@example.com", "secret")
        .await
        .expect("login succeeds");
    harness.transport.push_response(ApiResponse::json(
        401,
        &json!({ "message": "Token expired" }),
    ));

    let err = harness
        .store
        .refresh_profile()
        .await
        .expect_err("expired token must fail");

    assert!(matches!(err, ClientError::SessionExpired { .. }));
    assert!(err.is_unauthorized());
    assert_eq!(harness.store.session(), Session::anonymous());
    assert!(!harness.storage.contains(SESSION_STORAGE_KEY));
    assert_eq!(
        harness.last_notice(),
        Some(Notice::error(SESSION_EXPIRED_MESSAGE))
    );
    assert_eq!(
        harness.store.route_decision(RouteArea::Dashboard),
        RouteDecision::RedirectToLogin
    );
}

#[rstest]
#[tokio::test]
async fn anonymous_refresh_is_rejected_by_the_server(harness: Harness) {
    harness
        .transport
        .push_response(ApiResponse::json(401, &json!({ "message": "Unauthorized" })));

    let err = harness
        .store
        .refresh_profile()
        .await
        .expect_err("anonymous refresh must fail");

    assert!(matches!(err, ClientError::SessionExpired { .. }));
    let requests = harness.transport.requests();
    assert!(requests
        .first()
        .is_some_and(|request| request.header("Authorization").is_none()));
    assert_eq!(harness.store.session(), Session::anonymous());
}
