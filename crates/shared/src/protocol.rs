//! Wire protocol definitions: the REST response envelope, the two legal list
//! shapes, and the server-push watch topics with their batch payloads.

use serde::{Deserialize, Serialize};

use crate::models::{AdjustmentReason, MovementType};

/// Envelope every REST response is wrapped in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    pub data: T,
}

/// Paginated list envelope nested inside `ApiResponse.data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// The two shapes a list endpoint may legally return: the paginated envelope,
/// or a bare array from legacy unpaginated endpoints. Consumers normalize
/// through `stocklink-client`'s page façade rather than matching on this.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListData<T> {
    Paginated(PageEnvelope<T>),
    Plain(Vec<T>),
}

// --- Watch topics ---

/// A live-subscription request. Each topic is one long-lived server-streamed
/// call yielding repeated full-snapshot batches; `limit = 0` means "server
/// default/unbounded". The server is the sole sort and limit authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchRequest {
    /// All product prices.
    Prices,
    /// Products at or below their low-stock threshold.
    StockAlerts,
    /// Top N products by price.
    TopProducts { limit: u32 },
    /// Warehouse list, optionally with derived stock/utilization metrics.
    Warehouses { include_metrics: bool, limit: u32 },
    /// Most recent stock movements.
    Movements { limit: u32 },
    /// Running count of active stock alerts.
    AlertCount,
}

impl WatchRequest {
    /// Endpoint path for this topic on the streaming transport.
    pub fn path(&self) -> &'static str {
        match self {
            WatchRequest::Prices => "/watch/prices",
            WatchRequest::StockAlerts => "/watch/stock-alerts",
            WatchRequest::TopProducts { .. } => "/watch/top-products",
            WatchRequest::Warehouses { .. } => "/watch/warehouses",
            WatchRequest::Movements { .. } => "/watch/movements",
            WatchRequest::AlertCount => "/watch/alert-count",
        }
    }

    /// Short topic name for logging.
    pub fn topic(&self) -> &'static str {
        match self {
            WatchRequest::Prices => "prices",
            WatchRequest::StockAlerts => "stock-alerts",
            WatchRequest::TopProducts { .. } => "top-products",
            WatchRequest::Warehouses { .. } => "warehouses",
            WatchRequest::Movements { .. } => "movements",
            WatchRequest::AlertCount => "alert-count",
        }
    }

    /// Query parameters carried by the subscription request. A zero limit is
    /// omitted rather than sent.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        match self {
            WatchRequest::TopProducts { limit } | WatchRequest::Movements { limit } => {
                if *limit > 0 {
                    params.push(("limit", limit.to_string()));
                }
            }
            WatchRequest::Warehouses {
                include_metrics,
                limit,
            } => {
                if *include_metrics {
                    params.push(("metrics", "true".to_string()));
                }
                if *limit > 0 {
                    params.push(("limit", limit.to_string()));
                }
            }
            WatchRequest::Prices | WatchRequest::StockAlerts | WatchRequest::AlertCount => {}
        }
        params
    }
}

// --- Batch payloads ---
//
// Streamed records arrive partially populated; every field is optional here
// and the client's projector maps them into fully-defaulted domain records.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductSnapshot {
    pub uuid: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i64>,
    pub low_stock_threshold: Option<i64>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockAlertSnapshot {
    pub product_uuid: Option<String>,
    pub product_title: Option<String>,
    pub current_stock: Option<i64>,
    pub threshold: Option<i64>,
    pub alert_type: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WarehouseSnapshot {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub manager_name: Option<String>,
    pub manager_email: Option<String>,
    pub manager_phone: Option<String>,
    pub capacity: Option<i64>,
    pub is_active: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Warehouse plus the derived metrics attached in metrics-enabled streams.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WarehouseStatusSnapshot {
    pub warehouse: Option<WarehouseSnapshot>,
    pub total_stock: Option<i64>,
    pub utilization: Option<f64>,
}

/// Abbreviated entity reference embedded in movement records.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityRef {
    pub uuid: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MovementSnapshot {
    pub uuid: Option<String>,
    pub product_uuid: Option<String>,
    pub warehouse_uuid: Option<String>,
    pub product: Option<EntityRef>,
    pub warehouse: Option<EntityRef>,
    pub movement_type: Option<MovementType>,
    pub quantity: Option<i64>,
    pub previous_qty: Option<i64>,
    pub new_qty: Option<i64>,
    pub reference_number: Option<String>,
    pub to_warehouse_uuid: Option<String>,
    pub adjustment_reason: Option<AdjustmentReason>,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub movement_date: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceBatch {
    pub products: Vec<ProductSnapshot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockAlertBatch {
    pub alerts: Vec<StockAlertSnapshot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WarehouseBatch {
    pub warehouses: Vec<WarehouseStatusSnapshot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MovementBatch {
    pub movements: Vec<MovementSnapshot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertCountBatch {
    pub count: Option<u64>,
}
