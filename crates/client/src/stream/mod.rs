//! Live subscription layer: transport, retry policy, and the subscription
//! state machine behind the typed watchers.

mod project;
mod retry;
mod subscription;
mod transport;
mod watchers;

pub use retry::RetryPolicy;
pub use subscription::{Subscription, SubscriptionState};
pub use transport::{BatchStream, StreamTransport, WsTransport};
pub use watchers::StreamClient;
