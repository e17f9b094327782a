//! Domain models for the stocklink inventory system.
//!
//! Every record the server returns is camelCase JSON. Struct-level serde
//! defaults keep decoding total when the server omits a field: text defaults
//! to the empty string, counters to zero, associations to `None`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit-trail movement kinds. Only the server assigns these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    StockIn,
    StockOut,
    Transfer,
    Adjustment,
    Reservation,
    Release,
}

impl MovementType {
    /// Wire value, as used by the `type` filter on movement list endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::StockIn => "STOCK_IN",
            MovementType::StockOut => "STOCK_OUT",
            MovementType::Transfer => "TRANSFER",
            MovementType::Adjustment => "ADJUSTMENT",
            MovementType::Reservation => "RESERVATION",
            MovementType::Release => "RELEASE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentReason {
    Damage,
    Loss,
    Expired,
    Correction,
    Theft,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    pub uuid: String,
    pub name: String,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Supplier {
    pub uuid: String,
    pub name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A catalog product. `stock` is the master-data pool: allocating units into
/// a warehouse draws it down.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub uuid: String,
    pub title: String,
    pub description: String,
    /// Monetary price in integer minor units.
    pub price: i64,
    /// Catalog stock, distinct from per-warehouse stock.
    pub stock: i64,
    pub low_stock_threshold: i64,
    pub sku: String,
    pub barcode: String,
    pub image_url: String,
    pub category_uuid: Option<String>,
    pub supplier_uuid: Option<String>,
    pub category: Option<Category>,
    pub supplier: Option<Supplier>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockAlert {
    pub product_uuid: String,
    pub product_title: String,
    pub current_stock: i64,
    pub threshold: i64,
    pub alert_type: String,
    pub timestamp: String,
}

/// A warehouse. `capacity` of zero means unlimited. `total_stock` and
/// `utilization` are derived fields present only in metrics-enabled views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Warehouse {
    pub uuid: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub manager_name: String,
    pub manager_email: String,
    pub manager_phone: String,
    /// Unit capacity; 0 = unlimited.
    pub capacity: i64,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Sum of stock quantities currently in the warehouse (metrics views).
    pub total_stock: i64,
    /// Percentage of capacity in use, 0-100, capped at 100 (metrics views).
    pub utilization: f64,
}

/// A (product, warehouse) stock association row. The authoritative copy
/// lives server-side; clients hold a read-through cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WarehouseStock {
    pub uuid: String,
    pub product_uuid: String,
    pub warehouse_uuid: String,
    pub quantity: i64,
    pub reserved_qty: i64,
    pub available_qty: Option<i64>,
    pub aisle: String,
    pub rack: String,
    pub shelf: String,
    pub product: Option<Product>,
    pub warehouse: Option<Warehouse>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl WarehouseStock {
    /// Units free to ship or transfer. The server derives this as quantity
    /// minus reservations; when omitted, fall back to the raw quantity.
    pub fn available(&self) -> i64 {
        self.available_qty.unwrap_or(self.quantity)
    }
}

/// Immutable audit record for any stock-affecting operation. `previous_qty`
/// and `new_qty` are computed by the server only; client-side projections of
/// post-operation values are advisory estimates, never committed state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockMovement {
    pub uuid: String,
    pub product_uuid: String,
    pub warehouse_uuid: String,
    pub product: Option<Product>,
    pub warehouse: Option<Warehouse>,
    pub movement_type: Option<MovementType>,
    pub quantity: i64,
    pub previous_qty: i64,
    pub new_qty: i64,
    pub reference_number: String,
    pub to_warehouse_uuid: String,
    pub adjustment_reason: Option<AdjustmentReason>,
    pub notes: String,
    pub created_by: String,
    pub movement_date: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockIn {
    pub uuid: String,
    pub product_uuid: String,
    pub warehouse_uuid: String,
    pub product: Option<Product>,
    pub warehouse: Option<Warehouse>,
    pub quantity: i64,
    pub purchase_order_no: String,
    pub supplier_uuid: Option<String>,
    pub supplier: Option<Supplier>,
    pub received_date: String,
    pub received_by: String,
    pub notes: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockOut {
    pub uuid: String,
    pub product_uuid: String,
    pub warehouse_uuid: String,
    pub product: Option<Product>,
    pub warehouse: Option<Warehouse>,
    pub quantity: i64,
    pub sales_order_no: String,
    pub customer_name: String,
    pub shipped_date: String,
    pub shipped_by: String,
    pub notes: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockAdjustment {
    pub uuid: String,
    pub product_uuid: String,
    pub warehouse_uuid: String,
    pub product: Option<Product>,
    pub warehouse: Option<Warehouse>,
    pub quantity: i64,
    pub previous_qty: i64,
    pub new_qty: i64,
    pub reason: Option<AdjustmentReason>,
    pub adjusted_by: String,
    pub adjustment_date: String,
    pub notes: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockTransfer {
    pub uuid: String,
    pub product_uuid: String,
    pub from_warehouse_uuid: String,
    pub to_warehouse_uuid: String,
    pub quantity: i64,
    pub transfer_date: String,
    pub notes: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// --- Mutation request payloads ---
//
// Create/update requests are the record shapes minus server-assigned fields
// (uuid, timestamps, ledger quantities). Optional fields are omitted from
// the JSON body entirely rather than sent as null.

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: i64,
    pub stock: i64,
    pub low_stock_threshold: i64,
    pub sku: String,
    pub barcode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_uuid: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplier {
    pub name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWarehouse {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub manager_name: String,
    pub manager_email: String,
    pub manager_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    pub is_active: bool,
}

/// Allocate catalog units into a warehouse (reduces catalog stock).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWarehouseStock {
    pub product_uuid: String,
    pub warehouse_uuid: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStockTransfer {
    pub product_uuid: String,
    pub from_warehouse_uuid: String,
    pub to_warehouse_uuid: String,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStockIn {
    pub product_uuid: String,
    pub warehouse_uuid: String,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_order_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStockOut {
    pub product_uuid: String,
    pub warehouse_uuid: String,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_order_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipped_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Signed adjustment: positive adds units, negative removes them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStockAdjustment {
    pub product_uuid: String,
    pub warehouse_uuid: String,
    pub quantity: i64,
    pub reason: AdjustmentReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_decodes_with_missing_fields() {
        let p: Product = serde_json::from_str(r#"{"uuid":"p-1","title":"Widget"}"#).unwrap();
        assert_eq!(p.uuid, "p-1");
        assert_eq!(p.price, 0);
        assert_eq!(p.sku, "");
        assert!(p.category.is_none());
    }

    #[test]
    fn movement_type_round_trips_wire_names() {
        let t: MovementType = serde_json::from_str("\"STOCK_IN\"").unwrap();
        assert_eq!(t, MovementType::StockIn);
        assert_eq!(t.as_str(), "STOCK_IN");
        assert_eq!(serde_json::to_string(&MovementType::Release).unwrap(), "\"RELEASE\"");
    }

    #[test]
    fn available_falls_back_to_quantity() {
        let row: WarehouseStock =
            serde_json::from_str(r#"{"uuid":"s-1","quantity":10,"reservedQty":3}"#).unwrap();
        assert_eq!(row.available(), 10);

        let explicit: WarehouseStock =
            serde_json::from_str(r#"{"uuid":"s-2","quantity":10,"availableQty":9}"#).unwrap();
        assert_eq!(explicit.available(), 9);
    }

    #[test]
    fn optional_request_fields_are_omitted() {
        let body = serde_json::to_value(NewStockIn {
            product_uuid: "p-1".into(),
            warehouse_uuid: "w-1".into(),
            quantity: 5,
            ..Default::default()
        })
        .unwrap();
        assert!(body.get("purchaseOrderNo").is_none());
        assert_eq!(body["productUuid"], "p-1");
    }
}
