//! Message endpoint round trips against a local mock server.

use httpmock::prelude::*;
use nylas::messages::{MessageListParams, MessageUpdate};
use nylas::{Config, Nylas, NylasError};
use serde_json::json;

fn client(server: &MockServer) -> Nylas {
    Nylas::new(Config {
        api_key: "app-key".into(),
        api_uri: Some(server.base_url()),
        access_token: Some("stored-token".into()),
        ..Config::default()
    })
    .unwrap()
}

#[tokio::test]
async fn find_returns_the_decoded_json_mapping() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/messages/m-1")
                .header("authorization", "Bearer stored-token");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"id":"m-1","subject":"Hello","unread":true}"#);
        })
        .await;

    let message = client(&server).messages().find("m-1", None).await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        message,
        json!({ "id": "m-1", "subject": "Hello", "unread": true })
    );
}

#[tokio::test]
async fn list_sends_default_limit_and_offset() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/messages")
                .query_param("limit", "100")
                .query_param("offset", "0");
            then.status(200)
                .header("content-type", "application/json")
                .body("[]");
        })
        .await;

    let messages = client(&server)
        .messages()
        .list(&MessageListParams::default())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(messages, json!([]));
}

#[tokio::test]
async fn per_call_token_wins_over_stored_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/messages/m-1")
                .header("authorization", "Bearer call-token");
            then.status(200)
                .header("content-type", "application/json")
                .body("{}");
        })
        .await;

    client(&server)
        .messages()
        .find("m-1", Some("call-token"))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn validation_failure_makes_no_request() {
    let server = MockServer::start_async().await;
    let spy = server
        .mock_async(|when, then| {
            when.path_contains("/");
            then.status(500);
        })
        .await;

    // No per-call token and no stored token: fails before any I/O.
    let client = Nylas::new(Config {
        api_key: "app-key".into(),
        api_uri: Some(server.base_url()),
        ..Config::default()
    })
    .unwrap();

    let err = client
        .messages()
        .list(&MessageListParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, NylasError::Validation(_)));
    assert_eq!(spy.hits_async().await, 0);
}

#[tokio::test]
async fn bad_filter_params_make_no_request() {
    let server = MockServer::start_async().await;
    let spy = server
        .mock_async(|when, then| {
            when.path_contains("/");
            then.status(500);
        })
        .await;

    let params = MessageListParams {
        view: Some("everything".into()),
        ..MessageListParams::default()
    };
    let err = client(&server).messages().list(&params).await.unwrap_err();

    assert!(matches!(err, NylasError::Validation(_)));
    assert_eq!(spy.hits_async().await, 0);
}

#[tokio::test]
async fn update_puts_flags_as_json_without_auth_material() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/messages/m-1")
                .header("authorization", "Bearer stored-token")
                .json_body(json!({ "unread": false, "starred": true }));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"id":"m-1","unread":false,"starred":true}"#);
        })
        .await;

    let changes = MessageUpdate {
        unread: Some(false),
        starred: Some(true),
        ..MessageUpdate::default()
    };
    let updated = client(&server)
        .messages()
        .update("m-1", &changes, None)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(updated["unread"], false);
}

#[tokio::test]
async fn find_raw_parses_the_rfc822_fixture() {
    const FIXTURE: &[u8] = b"From: Alice Example <alice@example.com>\r\n\
To: Bob <bob@example.com>\r\n\
Subject: Meeting notes\r\n\
Date: Tue, 5 Aug 2025 10:00:00 +0000\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
See you at ten.\r\n";

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/messages/m-1")
                .header("accept", "message/rfc822")
                .header("authorization", "Bearer stored-token");
            then.status(200)
                .header("content-type", "message/rfc822")
                .body(FIXTURE);
        })
        .await;

    let message = client(&server)
        .messages()
        .find_raw("m-1", None)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(message.subject.as_deref(), Some("Meeting notes"));
    assert_eq!(message.from[0].email.as_deref(), Some("alice@example.com"));
    assert_eq!(message.to[0].email.as_deref(), Some("bob@example.com"));
    assert_eq!(message.raw, FIXTURE);
}

#[tokio::test]
async fn non_2xx_surfaces_a_typed_api_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/messages/m-1");
            then.status(401)
                .header("content-type", "application/json")
                .body(r#"{"type":"auth_error","message":"token expired"}"#);
        })
        .await;

    let err = client(&server).messages().find("m-1", None).await.unwrap_err();

    match err {
        NylasError::Api {
            status,
            kind,
            message,
            ..
        } => {
            assert_eq!(status, 401);
            assert_eq!(kind.as_deref(), Some("auth_error"));
            assert_eq!(message, "token expired");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
