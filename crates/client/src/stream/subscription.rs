//! Long-lived watch subscriptions.
//!
//! Each subscription drives one server-streaming call on a background task
//! and publishes its state through a `tokio::sync::watch` channel. The task
//! reconnects after benign terminations, stops on genuine errors, and goes
//! silent the moment the subscription is aborted.

use std::sync::Arc;

use futures_util::StreamExt;
use stocklink_shared::{StreamError, WatchRequest};
use tokio::sync::watch;

use super::retry::RetryPolicy;
use super::transport::StreamTransport;

/// Consumer-facing snapshot of a live subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionState<T> {
    /// Latest full collection pushed by the server. Survives disconnects so
    /// consumers keep showing the last known data while reconnecting.
    pub data: T,
    pub is_connected: bool,
    /// True until the call is first accepted (or fails for good).
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T: Default> Default for SubscriptionState<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            is_connected: false,
            is_loading: true,
            error: None,
        }
    }
}

/// Handle to a running subscription. Dropping it aborts the background task.
pub struct Subscription<T> {
    state: watch::Receiver<SubscriptionState<T>>,
    abort: AbortHandle,
    task: tokio::task::JoinHandle<()>,
}

impl<T: Clone> Subscription<T> {
    /// Current state, cloned out of the channel.
    pub fn state(&self) -> SubscriptionState<T> {
        self.state.borrow().clone()
    }
}

impl<T> Subscription<T> {
    /// A receiver for awaiting state changes alongside other work.
    pub fn watch(&self) -> watch::Receiver<SubscriptionState<T>> {
        self.state.clone()
    }

    /// Stop the subscription. No state updates are published afterwards,
    /// even if the background task is still winding down.
    pub fn abort(&self) {
        self.abort.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

struct AbortHandle {
    tx: watch::Sender<bool>,
}

impl AbortHandle {
    fn abort(&self) {
        self.tx.send_replace(true);
    }
}

#[derive(Clone)]
struct AbortSignal {
    rx: watch::Receiver<bool>,
}

impl AbortSignal {
    fn is_aborted(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once aborted. A dropped handle counts as an abort.
    async fn cancelled(&mut self) {
        let _ = self.rx.wait_for(|aborted| *aborted).await;
    }
}

enum Termination {
    Aborted,
    Benign,
    Fatal(String),
}

/// Spawn a subscription that keeps `request` alive on `transport`, feeding
/// every decoded batch through `project` into the published state.
pub(super) fn spawn<T, F>(
    transport: Arc<dyn StreamTransport>,
    request: WatchRequest,
    retry: RetryPolicy,
    project: F,
) -> Subscription<T>
where
    T: Clone + Default + Send + Sync + 'static,
    F: Fn(serde_json::Value) -> Option<T> + Send + Sync + 'static,
{
    let (state_tx, state_rx) = watch::channel(SubscriptionState::default());
    let (abort_tx, abort_rx) = watch::channel(false);
    let signal = AbortSignal { rx: abort_rx };
    let task = tokio::spawn(run(transport, request, retry, project, state_tx, signal));
    Subscription {
        state: state_rx,
        abort: AbortHandle { tx: abort_tx },
        task,
    }
}

async fn run<T, F>(
    transport: Arc<dyn StreamTransport>,
    request: WatchRequest,
    retry: RetryPolicy,
    project: F,
    state_tx: watch::Sender<SubscriptionState<T>>,
    mut signal: AbortSignal,
) where
    T: Clone + Default + Send + Sync + 'static,
    F: Fn(serde_json::Value) -> Option<T> + Send + Sync + 'static,
{
    let topic = request.topic();
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        // Each call gets its own copy of the signal so a late update from a
        // superseded call can never clobber fresher state.
        let call_signal = signal.clone();
        match connect_once(&*transport, &request, &project, &state_tx, call_signal).await {
            Termination::Aborted => {
                tracing::debug!(topic, "subscription aborted");
                return;
            }
            Termination::Fatal(message) => {
                tracing::warn!(topic, error = %message, "stream failed, giving up");
                publish(&state_tx, &signal, |s| {
                    s.is_connected = false;
                    s.is_loading = false;
                    s.error = Some(message.clone());
                });
                return;
            }
            Termination::Benign => {
                publish(&state_tx, &signal, |s| s.is_connected = false);
                if !retry.should_retry(attempt) {
                    tracing::debug!(topic, attempt, "retry budget exhausted");
                    publish(&state_tx, &signal, |s| s.is_loading = false);
                    return;
                }
                tracing::debug!(topic, delay = ?retry.delay, "stream ended, reconnecting");
                tokio::select! {
                    _ = signal.cancelled() => return,
                    _ = tokio::time::sleep(retry.delay) => {}
                }
            }
        }
    }
}

async fn connect_once<T, F>(
    transport: &dyn StreamTransport,
    request: &WatchRequest,
    project: &F,
    state_tx: &watch::Sender<SubscriptionState<T>>,
    mut signal: AbortSignal,
) -> Termination
where
    T: Clone + Default + Send + Sync + 'static,
    F: Fn(serde_json::Value) -> Option<T>,
{
    let opened = tokio::select! {
        _ = signal.cancelled() => return Termination::Aborted,
        opened = transport.open(request) => opened,
    };
    let mut batches = match opened {
        Ok(batches) => batches,
        Err(e) if e.is_benign() => return Termination::Benign,
        Err(e) => return Termination::Fatal(e.to_string()),
    };
    publish(state_tx, &signal, |s| {
        s.is_connected = true;
        s.is_loading = false;
        s.error = None;
    });

    loop {
        let item = tokio::select! {
            _ = signal.cancelled() => return Termination::Aborted,
            item = batches.next() => item,
        };
        match item {
            Some(Ok(value)) => {
                if let Some(data) = project(value) {
                    publish(state_tx, &signal, move |s| {
                        s.data = data;
                        s.error = None;
                    });
                }
            }
            Some(Err(StreamError::Closed)) | None => return Termination::Benign,
            Some(Err(e)) => return Termination::Fatal(e.to_string()),
        }
    }
}

/// Every state write goes through here so an aborted call stays silent.
fn publish<T>(
    tx: &watch::Sender<SubscriptionState<T>>,
    signal: &AbortSignal,
    f: impl FnOnce(&mut SubscriptionState<T>),
) {
    if signal.is_aborted() {
        return;
    }
    tx.send_modify(f);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_loading_and_disconnected() {
        let state = SubscriptionState::<Vec<u32>>::default();
        assert!(state.is_loading);
        assert!(!state.is_connected);
        assert!(state.error.is_none());
        assert!(state.data.is_empty());
    }

    #[test]
    fn publish_is_silent_after_abort() {
        let (state_tx, state_rx) = watch::channel(SubscriptionState::<u64>::default());
        let (abort_tx, abort_rx) = watch::channel(false);
        let signal = AbortSignal { rx: abort_rx };

        abort_tx.send_replace(true);
        publish(&state_tx, &signal, |s| s.data = 7);
        assert_eq!(state_rx.borrow().data, 0);
    }
}
