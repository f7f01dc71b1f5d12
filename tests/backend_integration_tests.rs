use std::time::Duration;

use campus_chat::client::{ChatBackend, ChatError, ConnectionStatus, HttpBackend};
use campus_chat::core::action::{Action, Effect};
use campus_chat::core::controller::SessionController;
use campus_chat::core::email::{EmailValidity, validate_email};
use campus_chat::core::message::Source;
use campus_chat::core::phrases::{
    CLIENT_REQUEST_REPLY, FALLBACK_REPLY, SERVER_INTERNAL_REPLY, UNREACHABLE_REPLY,
};
use campus_chat::core::session::{MemorySessionStore, SessionStore};
use campus_chat::core::topic::Topic;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

/// A base URL nothing listens on.
fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

async fn mount_reply(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn controller() -> SessionController<MemorySessionStore> {
    SessionController::new(MemorySessionStore::default(), 7)
}

// ============================================================================
// Chat route tests
// ============================================================================

#[tokio::test]
async fn test_chat_reply_field() {
    let server = MockServer::start().await;
    mount_reply(&server, "/chat/general", json!({"reply": "Hello"})).await;

    let backend = HttpBackend::new(server.uri());
    let reply = assert_ok!(backend.send_chat(Topic::General, "Hi").await);
    assert_eq!(reply.text, "Hello");
}

#[tokio::test]
async fn test_chat_reply_kept_beside_numeric_message() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        "/chat/general",
        json!({"reply": "Hello", "message": 200}),
    )
    .await;

    let backend = HttpBackend::new(server.uri());
    let reply = assert_ok!(backend.send_chat(Topic::General, "Hi").await);
    assert_eq!(reply.text, "Hello");
}

#[tokio::test]
async fn test_chat_request_body_has_empty_identity_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/academics"))
        .and(body_json(json!({
            "message": "Which programs?",
            "user_name": "",
            "email": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "B.Tech"})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let reply = assert_ok!(backend.send_chat(Topic::Academics, "Which programs?").await);
    assert_eq!(reply.text, "B.Tech");
}

#[tokio::test]
async fn test_navigation_uses_campus_nav_route() {
    let server = MockServer::start().await;
    mount_reply(&server, "/chat/campus-nav", json!({"reply": "Block C"})).await;

    let backend = HttpBackend::new(format!("{}/", server.uri()));
    let reply = assert_ok!(backend.send_chat(Topic::Navigation, "Library?").await);
    assert_eq!(reply.text, "Block C");
}

#[tokio::test]
async fn test_chat_message_field_fallback() {
    let server = MockServer::start().await;
    mount_reply(&server, "/chat/admissions", json!({"message": "Apply by June"})).await;

    let backend = HttpBackend::new(server.uri());
    let reply = assert_ok!(backend.send_chat(Topic::Admissions, "Deadline?").await);
    assert_eq!(reply.text, "Apply by June");
}

#[tokio::test]
async fn test_chat_empty_reply_uses_fallback_copy() {
    let server = MockServer::start().await;
    mount_reply(&server, "/chat/general", json!({"reply": ""})).await;

    let backend = HttpBackend::new(server.uri());
    let reply = assert_ok!(backend.send_chat(Topic::General, "Hi").await);
    assert_eq!(reply.text, FALLBACK_REPLY);
}

#[tokio::test]
async fn test_chat_non_json_body_uses_fallback_copy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/general"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let reply = assert_ok!(backend.send_chat(Topic::General, "Hi").await);
    assert_eq!(reply.text, FALLBACK_REPLY);
}

#[tokio::test]
async fn test_chat_422_is_client_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/general"))
        .respond_with(ResponseTemplate::new(422).set_body_string("bad input"))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let err = assert_err!(backend.send_chat(Topic::General, "Hi").await);
    assert_eq!(
        err,
        ChatError::ClientRequest {
            status: 422,
            body: "bad input".to_string()
        }
    );
}

#[tokio::test]
async fn test_chat_500_is_server_internal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/general"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let err = assert_err!(backend.send_chat(Topic::General, "Hi").await);
    assert!(matches!(err, ChatError::ServerInternal { status: 500, .. }));
}

#[tokio::test]
async fn test_chat_unreachable_server() {
    let backend = HttpBackend::new(dead_url());
    let err = assert_err!(backend.send_chat(Topic::General, "Hi").await);
    assert!(matches!(err, ChatError::Unreachable(_)), "got {err:?}");
}

// ============================================================================
// Mail relay tests
// ============================================================================

#[tokio::test]
async fn test_mail_posts_message_and_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/mail"))
        .and(body_json(json!({"message": "Library is in Block C", "email": "a@b.co"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "sent"})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    assert_ok!(backend.send_mail("Library is in Block C", "a@b.co").await);
}

#[tokio::test]
async fn test_mail_failure_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/mail"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let err = assert_err!(backend.send_mail("text", "a@b.co").await);
    assert!(matches!(err, ChatError::ServerInternal { status: 503, .. }));
}

// ============================================================================
// Health probe tests
// ============================================================================

#[tokio::test]
async fn test_health_ok_is_connected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    assert_eq!(backend.check_health().await, ConnectionStatus::Connected);
}

#[tokio::test]
async fn test_health_non_200_is_offline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    assert_eq!(backend.check_health().await, ConnectionStatus::Offline);
}

#[tokio::test]
async fn test_health_timeout_is_offline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let backend =
        HttpBackend::new(server.uri()).with_health_timeout(Duration::from_millis(50));
    assert_eq!(backend.check_health().await, ConnectionStatus::Offline);
}

#[tokio::test]
async fn test_health_unreachable_is_offline() {
    let backend = HttpBackend::new(dead_url());
    assert_eq!(backend.check_health().await, ConnectionStatus::Offline);
}

// ============================================================================
// Controller against a live HTTP backend
// ============================================================================

#[tokio::test]
async fn test_switch_topic_clears_conversation_for_every_topic() {
    let server = MockServer::start().await;
    mount_reply(&server, "/chat/general", json!({"reply": "Hello"})).await;
    let backend = HttpBackend::new(server.uri());

    for topic in Topic::ALL {
        let mut controller = controller();
        controller.send_message(&backend, "Hi").await;
        assert!(!controller.app().messages.is_empty());

        controller.switch_topic(topic);
        assert!(controller.app().messages.is_empty());
        assert_eq!(controller.app().active_topic, topic);
    }
}

#[tokio::test]
async fn test_blank_send_is_a_no_op() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "x"})))
        .expect(0)
        .mount(&server)
        .await;
    let backend = HttpBackend::new(server.uri());
    let mut controller = controller();

    assert!(controller.send_message(&backend, "").await.is_none());
    assert!(controller.send_message(&backend, "   \n\t").await.is_none());
    assert!(controller.app().messages.is_empty());
    assert!(!controller.app().is_loading);
}

#[tokio::test]
async fn test_send_appends_user_then_bot() {
    let server = MockServer::start().await;
    mount_reply(&server, "/chat/general", json!({"reply": "Hello"})).await;
    let backend = HttpBackend::new(server.uri());
    let mut controller = controller();

    let result = controller.send_message(&backend, "Hi").await.unwrap();
    assert_ok!(result);

    let messages = &controller.app().messages;
    assert_eq!(messages.len(), 2);
    assert_eq!((messages[0].text.as_str(), messages[0].sender), ("Hi", Source::User));
    assert_eq!((messages[1].text.as_str(), messages[1].sender), ("Hello", Source::Bot));
    assert!(!controller.app().is_loading);
}

#[tokio::test]
async fn test_unreachable_send_records_copy_and_clears_loading() {
    let backend = HttpBackend::new(dead_url());
    let mut controller = controller();

    let result = controller.send_message(&backend, "Hi").await.unwrap();
    assert_err!(result);

    let last = controller.app().messages.last().unwrap();
    assert_eq!(last.text, UNREACHABLE_REPLY);
    assert_eq!(last.sender, Source::Bot);
    assert!(!controller.app().is_loading);
}

#[tokio::test]
async fn test_status_classes_map_to_conversation_copy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/academics"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/admissions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let backend = HttpBackend::new(server.uri());
    let mut controller = controller();

    controller.switch_topic(Topic::Academics);
    controller.send_message(&backend, "Hi").await;
    assert_eq!(controller.app().messages.last().unwrap().text, CLIENT_REQUEST_REPLY);

    controller.switch_topic(Topic::Admissions);
    controller.send_message(&backend, "Hi").await;
    assert_eq!(controller.app().messages.last().unwrap().text, SERVER_INTERNAL_REPLY);
}

#[tokio::test]
async fn test_second_send_while_loading_is_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "x"})))
        .expect(0)
        .mount(&server)
        .await;
    let backend = HttpBackend::new(server.uri());
    let mut controller = controller();

    // First send is in flight: its effect was issued but no reply has arrived
    let effect = controller.dispatch(Action::Submit("first".to_string()));
    assert!(matches!(effect, Effect::SendChat { .. }));
    assert!(controller.app().is_loading);

    assert!(controller.send_message(&backend, "second").await.is_none());
    assert_eq!(controller.app().messages.len(), 1);
    assert_eq!(controller.app().messages[0].text, "first");
}

#[test]
fn test_email_validation_examples() {
    assert_eq!(validate_email("a@b.co"), EmailValidity::Valid);
    assert_eq!(validate_email(""), EmailValidity::Neutral);
    assert_eq!(validate_email("no-at-sign"), EmailValidity::Invalid);
}

#[tokio::test]
async fn test_persistence_round_trip() {
    let server = MockServer::start().await;
    mount_reply(&server, "/chat/campus-nav", json!({"reply": "Block C"})).await;
    let backend = HttpBackend::new(server.uri());

    let mut controller = controller();
    controller.switch_topic(Topic::Navigation);
    controller.send_message(&backend, "Library?").await;
    controller.send_message(&backend, "Canteen?").await;
    let saved = controller.app().messages.clone();
    assert_eq!(saved.len(), 4);

    let store = controller.into_store();
    let snapshot = store.load();
    assert_eq!(snapshot.messages, saved);
    assert_eq!(snapshot.active_topic, Topic::Navigation);

    let restored = SessionController::new(store, 99);
    assert_eq!(restored.app().messages, saved);
    assert_eq!(restored.app().active_topic, Topic::Navigation);
}

#[tokio::test]
async fn test_mail_delivery_through_controller() {
    let server = MockServer::start().await;
    mount_reply(&server, "/chat/general", json!({"reply": "Fees are listed online"})).await;
    Mock::given(method("POST"))
        .and(path("/chat/mail"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let backend = HttpBackend::new(server.uri());
    let mut controller = controller();

    controller.send_message(&backend, "Fees?").await;
    let reply = controller.app().last_bot_message().unwrap().text.clone();

    // Invalid recipient: nothing is sent and the draft stays open
    assert!(
        controller
            .request_email_delivery(&backend, &reply, "not-an-email")
            .await
            .is_none()
    );
    assert!(controller.app().email_draft.is_some());

    let result = controller
        .request_email_delivery(&backend, &reply, "student@college.edu")
        .await
        .unwrap();
    assert_ok!(result);
    assert!(controller.app().email_draft.is_none());
    assert_eq!(controller.app().status_message, "Email sent");
}
