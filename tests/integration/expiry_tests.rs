use crate::common::client_for;
use chrono::{Duration, Utc};
use startdeliver::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[tokio::test]
async fn test_expiry_header_schedules_notice() {
    let mut server = mockito::Server::new_async().await;
    let expires_at = (Utc::now() + Duration::hours(2)).to_rfc3339();
    server
        .mock("GET", "/api/v1/me")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header(EXPIRES_AT_HEADER, &expires_at)
        .with_body(r#"{"id":1}"#)
        .create_async()
        .await;

    let client = client_for(&server.url(), "k");
    let count = Arc::new(AtomicUsize::new(0));
    let handle = count.clone();
    client.add_expire_fn(move || {
        handle.fetch_add(1, Ordering::SeqCst);
    });

    client.me().await.unwrap();
    assert!(client.expiry().is_pending());
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_imminent_expiry_fires_right_away() {
    let mut server = mockito::Server::new_async().await;
    let expires_at = (Utc::now() + Duration::minutes(1)).to_rfc3339();
    server
        .mock("GET", "/api/v1/me")
        .with_status(200)
        .with_header(EXPIRES_AT_HEADER, &expires_at)
        .with_body("{}")
        .create_async()
        .await;

    let client = client_for(&server.url(), "k");
    let count = Arc::new(AtomicUsize::new(0));
    let handle = count.clone();
    client.add_expire_fn(move || {
        handle.fetch_add(1, Ordering::SeqCst);
    });

    client.me().await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}
