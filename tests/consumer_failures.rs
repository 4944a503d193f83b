//! Failure handling of the consumer against broken or missing producers.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use number_relay::config::ConsumerConfig;
use number_relay::consumer::{FailureKind, NumberClient, NumberSource, Poller};
use number_relay::Shutdown;
use tokio::net::TcpListener;

mod common;

const ERROR_PREFIX: &str = "Error fetching the number: ";

fn client_for(addr: std::net::SocketAddr, timeout_secs: u64) -> NumberClient {
    NumberClient::new(&ConsumerConfig {
        producer_url: format!("http://{addr}"),
        interval_secs: 1,
        timeout_secs,
    })
    .unwrap()
}

#[tokio::test]
async fn test_unreachable_producer_keeps_polling() {
    let addr = common::unused_addr().await;
    let shutdown = Shutdown::new();
    let lines = common::CapturedLines::default();

    let poller = Poller::new(client_for(addr, 2), Duration::from_millis(100), lines.clone());
    let handle = tokio::spawn(poller.run(shutdown.subscribe()));

    let three_errors = lines
        .wait_for(Duration::from_secs(10), |lines| lines.len() >= 3)
        .await;
    assert!(three_errors, "lines so far: {:?}", lines.lines());
    assert!(lines.lines().iter().all(|l| l.starts_with(ERROR_PREFIX)));

    // Still alive, and still responsive to shutdown.
    assert!(!handle.is_finished());
    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("poller did not stop")
        .unwrap();
}

#[tokio::test]
async fn test_consumer_recovers_when_producer_appears() {
    let addr = common::unused_addr().await;
    let shutdown = Shutdown::new();
    let lines = common::CapturedLines::default();

    let poller = Poller::new(client_for(addr, 2), Duration::from_millis(100), lines.clone());
    let handle = tokio::spawn(poller.run(shutdown.subscribe()));

    assert!(
        lines
            .wait_for(Duration::from_secs(10), |lines| lines.len() >= 2)
            .await
    );

    let listener = TcpListener::bind(addr).await.unwrap();
    common::start_producer_on(listener, &shutdown);

    let recovered = lines
        .wait_for(Duration::from_secs(10), |lines| {
            lines.iter().any(|l| common::received_number(l).is_some())
        })
        .await;
    assert!(recovered, "lines so far: {:?}", lines.lines());

    shutdown.trigger();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_connection_refused_is_transport_failure() {
    let addr = common::unused_addr().await;
    let err = client_for(addr, 2).fetch().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Transport);
}

#[tokio::test]
async fn test_non_success_status_is_transport_failure() {
    let addr = common::start_programmable_backend(|| async {
        (503, r#"{"number": 5}"#.to_string())
    })
    .await;

    let err = client_for(addr, 2).fetch().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Transport);
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_malformed_body_is_payload_failure() {
    let addr = common::start_programmable_backend(|| async { (200, "<html>".to_string()) }).await;

    let err = client_for(addr, 2).fetch().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Payload);
}

#[tokio::test]
async fn test_missing_field_is_payload_failure() {
    let addr =
        common::start_programmable_backend(|| async { (200, r#"{"value": 3}"#.to_string()) })
            .await;

    let err = client_for(addr, 2).fetch().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Payload);
    assert!(err.to_string().contains("number"));
}

#[tokio::test]
async fn test_hung_producer_times_out() {
    let addr = common::start_silent_backend().await;

    let started = std::time::Instant::now();
    let err = client_for(addr, 1).fetch().await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err}");
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_flaky_producer_mixed_output() {
    let calls = Arc::new(AtomicU32::new(0));
    let cc = calls.clone();
    let addr = common::start_programmable_backend(move || {
        let cc = cc.clone();
        async move {
            if cc.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
                (500, "oops".to_string())
            } else {
                (200, r#"{"number": 42}"#.to_string())
            }
        }
    })
    .await;

    let shutdown = Shutdown::new();
    let lines = common::CapturedLines::default();
    let poller = Poller::new(client_for(addr, 2), Duration::from_millis(50), lines.clone());
    let handle = tokio::spawn(poller.run(shutdown.subscribe()));

    assert!(
        lines
            .wait_for(Duration::from_secs(10), |lines| lines.len() >= 4)
            .await
    );
    shutdown.trigger();
    handle.await.unwrap();

    let lines = lines.lines();
    assert!(lines[0].starts_with(ERROR_PREFIX));
    assert_eq!(lines[1], "Received number: 42");
    assert!(lines[2].starts_with(ERROR_PREFIX));
    assert_eq!(lines[3], "Received number: 42");
}
