//! Typed entry points for the six live watch topics.

use std::sync::Arc;

use stocklink_shared::{Product, StockAlert, StockMovement, Warehouse, WatchRequest};

use super::retry::RetryPolicy;
use super::subscription::{self, Subscription};
use super::transport::{StreamTransport, WsTransport};
use crate::config::CONFIG;

/// Default top-products window when the caller passes 0.
const DEFAULT_TOP_PRODUCTS: u32 = 5;

/// Factory for live subscriptions. One client can drive any number of
/// concurrent watches; each gets its own connection and retry loop.
pub struct StreamClient {
    transport: Arc<dyn StreamTransport>,
    retry: RetryPolicy,
}

impl StreamClient {
    /// Client against the configured stream endpoint.
    pub fn new() -> Result<Self, stocklink_shared::StreamError> {
        Ok(Self::with_transport(Arc::new(WsTransport::new(
            &CONFIG.stream_url,
        )?)))
    }

    pub fn with_transport(transport: Arc<dyn StreamTransport>) -> Self {
        Self {
            transport,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn subscribe<T, F>(&self, request: WatchRequest, project: F) -> Subscription<T>
    where
        T: Clone + Default + Send + Sync + 'static,
        F: Fn(serde_json::Value) -> Option<T> + Send + Sync + 'static,
    {
        subscription::spawn(Arc::clone(&self.transport), request, self.retry, project)
    }

    /// All product prices, pushed on every price change.
    pub fn watch_prices(&self) -> Subscription<Vec<Product>> {
        self.subscribe(WatchRequest::Prices, super::project::prices)
    }

    /// Products at or below their low-stock threshold.
    pub fn watch_stock_alerts(&self) -> Subscription<Vec<StockAlert>> {
        self.subscribe(WatchRequest::StockAlerts, super::project::stock_alerts)
    }

    /// Top products by price. A zero `limit` asks for the default window of
    /// five.
    pub fn watch_top_products(&self, limit: u32) -> Subscription<Vec<Product>> {
        let limit = if limit == 0 { DEFAULT_TOP_PRODUCTS } else { limit };
        self.subscribe(WatchRequest::TopProducts { limit }, super::project::prices)
    }

    /// Warehouse list; with `include_metrics` the server attaches total stock
    /// and utilization to every row. A zero `limit` means all warehouses.
    pub fn watch_warehouses(&self, include_metrics: bool, limit: u32) -> Subscription<Vec<Warehouse>> {
        self.subscribe(
            WatchRequest::Warehouses {
                include_metrics,
                limit,
            },
            super::project::warehouses,
        )
    }

    /// Most recent stock movements, newest first, server-sorted. A zero
    /// `limit` means the server default.
    pub fn watch_movements(&self, limit: u32) -> Subscription<Vec<StockMovement>> {
        self.subscribe(WatchRequest::Movements { limit }, super::project::movements)
    }

    /// Running count of active stock alerts, for badge displays.
    pub fn watch_alert_count(&self) -> Subscription<u64> {
        self.subscribe(WatchRequest::AlertCount, super::project::alert_count)
    }
}
