//! Client SDK for the stocklink inventory server.
//!
//! Two transports, one data model: REST for queries and mutations, and a
//! streaming endpoint for live collection watches. On top sit the pure
//! pre-check helpers and the client-side caching stores.

pub mod api;
pub mod api_client;
pub mod config;
pub mod logging;
pub mod precheck;
pub mod stores;
pub mod stream;

pub use api::{Page, PageQuery};
pub use api_client::ApiClient;
pub use stream::{RetryPolicy, StreamClient, Subscription, SubscriptionState};

pub use stocklink_shared as shared;
