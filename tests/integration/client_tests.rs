use crate::common::client_for;
use mockito::Matcher;
use startdeliver::prelude::*;

#[tokio::test]
async fn test_get_sends_raw_api_key_and_decodes_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/users/42")
        .match_header("authorization", "live-key")
        .match_header("user-agent", USER_AGENT)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":42,"name":"Jane"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url(), "live-key");
    let user = client.get("users", 42).await.unwrap();

    mock.assert_async().await;
    assert_eq!(user["name"], json!("Jane"));
}

#[tokio::test]
async fn test_get_encodes_query_parameter() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/customers")
        .match_query(Matcher::UrlEncoded(
            "query".into(),
            r#"{"filter":{"name":"Acme"},"limit":5}"#.into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let client = client_for(&server.url(), "k");
    let list = client
        .find("customers", json!({"name": "Acme", "limit": 5}))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_save_strips_updated_fields_on_the_wire() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/api/v1/widgets/3")
        .match_body(Matcher::Json(json!({"id": 3, "name": "b"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":3,"name":"b"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url(), "k");
    client
        .save(
            "widgets",
            json!({"id": 3, "name": "b", "updatedAt": "2026-10-01", "updatedBy": 1}),
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_login_posts_credentials() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/login")
        .match_body(Matcher::Json(
            json!({"email": "jane@example.com", "password": "secret", "remember": true}),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token":"abc"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url(), "");
    let session = client
        .login(("jane@example.com", "secret", true))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(session["token"], json!("abc"));
}

#[tokio::test]
async fn test_not_found_is_normalized() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/users/99")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"not found"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url(), "k");
    match client.get("users", 99).await.unwrap_err() {
        AppError::Http { status_code, data } => {
            assert_eq!(status_code, 404);
            assert_eq!(data, json!({"error": "not found"}));
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_text_error_body_is_kept_as_string() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/api/v1/widgets/7")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let client = client_for(&server.url(), "k");
    let err = client.delete("widgets", 7).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(err.data(), Some(&json!("Internal Server Error")));
}

#[tokio::test]
async fn test_unreachable_host_is_a_transport_error() {
    let client = client_for("http://127.0.0.1:1", "k");
    let err = client.me().await.unwrap_err();
    assert!(matches!(err, AppError::Transport(_)));
    assert!(err.status_code().is_none());
}
