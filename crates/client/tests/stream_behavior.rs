//! End-to-end behavior of the subscription state machine against a scripted
//! transport: connect, project, reconnect on benign termination, stop on
//! genuine errors, and go silent on abort.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures_channel::mpsc;
use futures_util::stream::{self, StreamExt};
use serde_json::json;
use stocklink_client::stream::{BatchStream, StreamClient, StreamTransport};
use stocklink_shared::{StreamError, WatchRequest};
use tokio::time::Instant;

/// One scripted connection attempt.
enum Script {
    /// `open` itself fails.
    Fail(StreamError),
    /// Yield these items, then end the stream (benign EOF) or hang open.
    Batches {
        items: Vec<Result<serde_json::Value, StreamError>>,
        then_pending: bool,
    },
    /// Caller-driven stream; items arrive through the channel.
    Channel(mpsc::UnboundedReceiver<Result<serde_json::Value, StreamError>>),
}

struct ScriptedTransport {
    scripts: Mutex<VecDeque<Script>>,
    opens: AtomicUsize,
}

impl ScriptedTransport {
    fn new(scripts: Vec<Script>) -> Arc<Self> {
        Arc::new(Self {
            scripts: Mutex::new(scripts.into()),
            opens: AtomicUsize::new(0),
        })
    }

    fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StreamTransport for ScriptedTransport {
    async fn open(&self, _request: &WatchRequest) -> Result<BatchStream, StreamError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        let script = self.scripts.lock().unwrap().pop_front();
        match script {
            Some(Script::Fail(e)) => Err(e),
            Some(Script::Batches {
                items,
                then_pending,
            }) => {
                let head = stream::iter(items);
                if then_pending {
                    Ok(Box::pin(head.chain(stream::pending())))
                } else {
                    Ok(Box::pin(head))
                }
            }
            Some(Script::Channel(rx)) => Ok(Box::pin(rx)),
            // Unscripted attempts hang open with no data.
            None => Ok(Box::pin(stream::pending::<Result<serde_json::Value, StreamError>>())),
        }
    }
}

fn price_batch(uuids: &[&str]) -> serde_json::Value {
    let products: Vec<_> = uuids
        .iter()
        .map(|uuid| json!({"uuid": uuid, "title": format!("product {uuid}"), "price": 100}))
        .collect();
    json!({ "products": products })
}

#[tokio::test(start_paused = true)]
async fn accepted_call_clears_loading_and_batches_replace() {
    let transport = ScriptedTransport::new(vec![Script::Batches {
        items: vec![
            Ok(price_batch(&["p-1", "p-2"])),
            Ok(price_batch(&["p-3"])),
        ],
        then_pending: true,
    }]);
    let client = StreamClient::with_transport(transport.clone());
    let sub = client.watch_prices();
    let mut rx = sub.watch();

    // Loading ends when the call is accepted, not when data arrives.
    rx.wait_for(|s| s.is_connected).await.unwrap();
    assert!(!rx.borrow().is_loading);

    rx.wait_for(|s| s.data.iter().any(|p| p.uuid == "p-3"))
        .await
        .unwrap();
    let state = sub.state();
    // Full snapshot replace: p-1 and p-2 are gone, not merged.
    assert_eq!(state.data.len(), 1);
    assert!(state.is_connected);
    assert!(!state.is_loading);
    assert!(state.error.is_none());
    assert_eq!(transport.opens(), 1);
}

#[tokio::test(start_paused = true)]
async fn benign_close_reconnects_once_after_fixed_delay() {
    let transport = ScriptedTransport::new(vec![
        Script::Batches {
            items: vec![Ok(price_batch(&["p-1"]))],
            then_pending: false,
        },
        Script::Batches {
            items: vec![Ok(price_batch(&["p-2"]))],
            then_pending: true,
        },
    ]);
    let client = StreamClient::with_transport(transport.clone());
    let sub = client.watch_prices();
    let mut rx = sub.watch();

    rx.wait_for(|s| !s.is_loading).await.unwrap();
    // The stream ends; last data survives the disconnect.
    rx.wait_for(|s| !s.is_connected && !s.data.is_empty())
        .await
        .unwrap();
    assert!(sub.state().error.is_none());

    let disconnected_at = Instant::now();
    rx.wait_for(|s| s.is_connected).await.unwrap();
    assert!(disconnected_at.elapsed() >= Duration::from_secs(3));
    assert_eq!(transport.opens(), 2);

    rx.wait_for(|s| s.data.iter().any(|p| p.uuid == "p-2"))
        .await
        .unwrap();

    // One disconnect, one reconnect. No further attempts while healthy.
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(transport.opens(), 2);
}

#[tokio::test(start_paused = true)]
async fn stream_error_stops_without_reconnecting() {
    let transport = ScriptedTransport::new(vec![Script::Batches {
        items: vec![
            Ok(price_batch(&["p-1"])),
            Err(StreamError::Fatal("stream protocol violation".into())),
        ],
        then_pending: false,
    }]);
    let client = StreamClient::with_transport(transport.clone());
    let sub = client.watch_prices();
    let mut rx = sub.watch();

    rx.wait_for(|s| s.error.is_some()).await.unwrap();
    let state = sub.state();
    assert!(!state.is_connected);
    assert!(!state.is_loading);
    assert_eq!(state.data.len(), 1);

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(transport.opens(), 1);
}

#[tokio::test(start_paused = true)]
async fn connect_failure_is_terminal() {
    let transport = ScriptedTransport::new(vec![Script::Fail(StreamError::Connect(
        "connection refused".into(),
    ))]);
    let client = StreamClient::with_transport(transport.clone());
    let sub = client.watch_alert_count();
    let mut rx = sub.watch();

    rx.wait_for(|s| s.error.is_some()).await.unwrap();
    assert!(!sub.state().is_connected);

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(transport.opens(), 1);
}

#[tokio::test(start_paused = true)]
async fn abort_silences_all_further_updates() {
    let (tx, rx) = mpsc::unbounded();
    let transport = ScriptedTransport::new(vec![Script::Channel(rx)]);
    let client = StreamClient::with_transport(transport.clone());
    let sub = client.watch_alert_count();
    let mut watch = sub.watch();

    tx.unbounded_send(Ok(json!({"count": 1}))).unwrap();
    watch.wait_for(|s| s.data == 1).await.unwrap();

    sub.abort();
    tx.unbounded_send(Ok(json!({"count": 2}))).unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(sub.state().data, 1);
    assert!(sub.is_finished());
}

#[tokio::test(start_paused = true)]
async fn drop_cancels_the_pending_reconnect() {
    // EOF with no batches: disconnect published, reconnect scheduled.
    let transport = ScriptedTransport::new(vec![Script::Batches {
        items: vec![],
        then_pending: false,
    }]);
    let client = StreamClient::with_transport(transport.clone());
    let sub = client.watch_prices();
    let mut rx = sub.watch();

    rx.changed().await.unwrap();
    assert_eq!(transport.opens(), 1);
    drop(sub);

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(transport.opens(), 1);
}
