//! Integration tests for the Telegram client using WireMock
//!
//! The Bot API is mocked so request shapes and envelope handling can be
//! checked without a real bot token.

use integration_telegram::{
    BotCommandSpec, EditMessageTextParams, InlineKeyboardButton, InlineKeyboardMarkup,
    SendMessageParams, TelegramClient, TelegramClientConfig, TelegramError,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

const TOKEN: &str = "123456:TEST";

// =============================================================================
// Test Helpers
// =============================================================================

fn client_for(server: &MockServer) -> TelegramClient {
    let config = TelegramClientConfig::new(TOKEN)
        .with_base_url(server.uri())
        .with_poll_timeout(1)
        .with_request_timeout(5);
    TelegramClient::new(config).unwrap()
}

fn api_path(method_name: &str) -> String {
    format!("/bot{TOKEN}/{method_name}")
}

fn ok(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true, "result": result}))
}

fn sample_message(message_id: i64, text: &str) -> serde_json::Value {
    serde_json::json!({
        "message_id": message_id,
        "from": {"id": 999, "is_bot": true, "first_name": "FitCoach", "username": "fitcoach_bot"},
        "chat": {"id": 42, "type": "private"},
        "date": 1716890000,
        "text": text
    })
}

// =============================================================================
// getMe / getUpdates
// =============================================================================

#[tokio::test]
async fn get_me_returns_bot_account() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("getMe")))
        .respond_with(ok(serde_json::json!({
            "id": 999, "is_bot": true, "first_name": "FitCoach", "username": "fitcoach_bot"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let me = client_for(&server).get_me().await.unwrap();
    assert!(me.is_bot);
    assert_eq!(me.username.as_deref(), Some("fitcoach_bot"));
}

#[tokio::test]
async fn get_updates_sends_offset_and_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("getUpdates")))
        .and(body_partial_json(serde_json::json!({
            "offset": 1001,
            "timeout": 1,
            "allowed_updates": ["message", "callback_query"]
        })))
        .respond_with(ok(serde_json::json!([
            {"update_id": 1001, "message": sample_message(7, "/start")},
            {"update_id": 1002, "callback_query": {
                "id": "cb-1",
                "from": {"id": 42, "is_bot": false, "first_name": "Анна"},
                "message": sample_message(8, "Меню"),
                "data": "clients"
            }}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let updates = client_for(&server).get_updates(Some(1001)).await.unwrap();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].message.as_ref().unwrap().text.as_deref(), Some("/start"));
    assert_eq!(
        updates[1].callback_query.as_ref().unwrap().data.as_deref(),
        Some("clients")
    );
}

#[tokio::test]
async fn confirm_updates_does_not_wait() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("getUpdates")))
        .and(body_partial_json(serde_json::json!({"offset": 1003, "timeout": 0, "limit": 1})))
        .respond_with(ok(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).confirm_updates(1003).await.unwrap();
}

#[tokio::test]
async fn empty_poll_returns_no_updates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("getUpdates")))
        .respond_with(ok(serde_json::json!([])))
        .mount(&server)
        .await;

    let updates = client_for(&server).get_updates(None).await.unwrap();
    assert!(updates.is_empty());
}

// =============================================================================
// sendMessage / editMessageText / answerCallbackQuery
// =============================================================================

#[tokio::test]
async fn send_message_posts_html_with_keyboard() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("sendMessage")))
        .and(body_partial_json(serde_json::json!({
            "chat_id": 42,
            "text": "<b>Клиенты</b>",
            "parse_mode": "HTML",
            "reply_markup": {"inline_keyboard": [[{"text": "➕ Добавить", "callback_data": "client_add"}]]}
        })))
        .respond_with(ok(sample_message(10, "Клиенты")))
        .expect(1)
        .mount(&server)
        .await;

    let keyboard = InlineKeyboardMarkup {
        inline_keyboard: vec![vec![InlineKeyboardButton {
            text: "➕ Добавить".to_string(),
            callback_data: "client_add".to_string(),
        }]],
    };
    let sent = client_for(&server)
        .send_message(&SendMessageParams::html(42, "<b>Клиенты</b>").with_keyboard(keyboard))
        .await
        .unwrap();
    assert_eq!(sent.message_id, 10);
}

#[tokio::test]
async fn edit_message_targets_message_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("editMessageText")))
        .and(body_partial_json(serde_json::json!({"chat_id": 42, "message_id": 8})))
        .respond_with(ok(sample_message(8, "Обновлено")))
        .expect(1)
        .mount(&server)
        .await;

    let edited = client_for(&server)
        .edit_message_text(&EditMessageTextParams::html(42, 8, "Обновлено"))
        .await
        .unwrap();
    assert_eq!(edited.text.as_deref(), Some("Обновлено"));
}

#[tokio::test]
async fn unchanged_edit_is_reported_as_not_modified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("editMessageText")))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: message is not modified: specified new message content and reply markup are exactly the same as a current content and reply markup of the message"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .edit_message_text(&EditMessageTextParams::html(42, 8, "same"))
        .await
        .unwrap_err();
    assert!(err.is_message_not_modified());
}

#[tokio::test]
async fn answer_callback_query_sends_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("answerCallbackQuery")))
        .and(body_partial_json(serde_json::json!({"callback_query_id": "cb-1"})))
        .respond_with(ok(serde_json::json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    assert!(
        client_for(&server)
            .answer_callback_query("cb-1", None)
            .await
            .unwrap()
    );
}

// =============================================================================
// Startup calls
// =============================================================================

#[tokio::test]
async fn set_my_commands_posts_menu() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("setMyCommands")))
        .and(body_partial_json(serde_json::json!({
            "commands": [{"command": "start", "description": "🏠 Главное меню"}]
        })))
        .respond_with(ok(serde_json::json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    let commands = vec![BotCommandSpec {
        command: "start".to_string(),
        description: "🏠 Главное меню".to_string(),
    }];
    assert!(client_for(&server).set_my_commands(commands).await.unwrap());
}

#[tokio::test]
async fn delete_webhook_keeps_pending_updates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("deleteWebhook")))
        .and(body_partial_json(serde_json::json!({"drop_pending_updates": false})))
        .respond_with(ok(serde_json::json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client_for(&server).delete_webhook(false).await.unwrap());
}

// =============================================================================
// Error handling
// =============================================================================

#[tokio::test]
async fn unauthorized_token_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("getMe")))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "ok": false, "error_code": 401, "description": "Unauthorized"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).get_me().await.unwrap_err();
    assert!(matches!(
        err,
        TelegramError::Api { error_code: 401, ref description, .. } if description == "Unauthorized"
    ));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn non_json_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("sendMessage")))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send_message(&SendMessageParams::html(42, "hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, TelegramError::InvalidResponse { status: 502, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn slow_server_times_out_without_leaking_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("getMe")))
        .respond_with(ok(serde_json::json!({})).set_delay(std::time::Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = TelegramClientConfig::new(TOKEN)
        .with_base_url(server.uri())
        .with_request_timeout(1);
    let err = TelegramClient::new(config).unwrap().get_me().await.unwrap_err();
    assert!(matches!(err, TelegramError::Http(_)));
    assert!(err.is_retryable());
    assert!(!err.to_string().contains(TOKEN));
}
