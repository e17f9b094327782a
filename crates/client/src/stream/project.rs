//! Batch projection: raw JSON frames into domain collections.
//!
//! Each batch carries a full snapshot of its collection; projection replaces
//! the previous data wholesale, never merges. Missing fields default the
//! same way REST decoding does, and a batch that fails to decode is logged
//! and dropped without touching the current state.

use chrono::{DateTime, Utc};
use stocklink_shared::{
    EntityRef, MovementBatch, PriceBatch, Product, StockAlert, StockAlertBatch, StockMovement,
    Warehouse, WarehouseBatch,
};
use stocklink_shared::{AlertCountBatch, MovementSnapshot, WarehouseStatusSnapshot};

fn decode<T: serde::de::DeserializeOwned>(topic: &str, value: serde_json::Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(batch) => Some(batch),
        Err(e) => {
            tracing::warn!(topic, error = %e, "dropping undecodable batch");
            None
        }
    }
}

fn parse_ts(raw: Option<String>) -> Option<DateTime<Utc>> {
    raw.as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

pub(super) fn prices(value: serde_json::Value) -> Option<Vec<Product>> {
    let batch: PriceBatch = decode("prices", value)?;
    let products = batch
        .products
        .into_iter()
        .map(|snap| Product {
            uuid: snap.uuid.unwrap_or_default(),
            title: snap.title.unwrap_or_default(),
            description: snap.description.unwrap_or_default(),
            price: snap.price.unwrap_or_default(),
            stock: snap.stock.unwrap_or_default(),
            low_stock_threshold: snap.low_stock_threshold.unwrap_or_default(),
            sku: snap.sku.unwrap_or_default(),
            barcode: snap.barcode.unwrap_or_default(),
            updated_at: parse_ts(snap.updated_at),
            ..Default::default()
        })
        .collect();
    Some(products)
}

pub(super) fn stock_alerts(value: serde_json::Value) -> Option<Vec<StockAlert>> {
    let batch: StockAlertBatch = decode("stock-alerts", value)?;
    let alerts = batch
        .alerts
        .into_iter()
        .map(|snap| StockAlert {
            product_uuid: snap.product_uuid.unwrap_or_default(),
            product_title: snap.product_title.unwrap_or_default(),
            current_stock: snap.current_stock.unwrap_or_default(),
            threshold: snap.threshold.unwrap_or_default(),
            alert_type: snap.alert_type.unwrap_or_default(),
            timestamp: snap.timestamp.unwrap_or_default(),
        })
        .collect();
    Some(alerts)
}

pub(super) fn warehouses(value: serde_json::Value) -> Option<Vec<Warehouse>> {
    let batch: WarehouseBatch = decode("warehouses", value)?;
    Some(batch.warehouses.into_iter().map(warehouse_status).collect())
}

fn warehouse_status(snap: WarehouseStatusSnapshot) -> Warehouse {
    let inner = snap.warehouse.unwrap_or_default();
    Warehouse {
        uuid: inner.uuid.unwrap_or_default(),
        name: inner.name.unwrap_or_default(),
        address: inner.address.unwrap_or_default(),
        city: inner.city.unwrap_or_default(),
        state: inner.state.unwrap_or_default(),
        country: inner.country.unwrap_or_default(),
        postal_code: inner.postal_code.unwrap_or_default(),
        manager_name: inner.manager_name.unwrap_or_default(),
        manager_email: inner.manager_email.unwrap_or_default(),
        manager_phone: inner.manager_phone.unwrap_or_default(),
        capacity: inner.capacity.unwrap_or_default(),
        // An absent flag means the warehouse was never deactivated.
        is_active: inner.is_active.unwrap_or(true),
        created_at: parse_ts(inner.created_at),
        updated_at: parse_ts(inner.updated_at),
        total_stock: snap.total_stock.unwrap_or_default(),
        utilization: snap.utilization.unwrap_or_default(),
    }
}

pub(super) fn movements(value: serde_json::Value) -> Option<Vec<StockMovement>> {
    let batch: MovementBatch = decode("movements", value)?;
    Some(batch.movements.into_iter().map(movement).collect())
}

fn movement(snap: MovementSnapshot) -> StockMovement {
    StockMovement {
        uuid: snap.uuid.unwrap_or_default(),
        product_uuid: snap.product_uuid.unwrap_or_default(),
        warehouse_uuid: snap.warehouse_uuid.unwrap_or_default(),
        product: snap.product.map(product_ref),
        warehouse: snap.warehouse.map(warehouse_ref),
        movement_type: snap.movement_type,
        quantity: snap.quantity.unwrap_or_default(),
        previous_qty: snap.previous_qty.unwrap_or_default(),
        new_qty: snap.new_qty.unwrap_or_default(),
        reference_number: snap.reference_number.unwrap_or_default(),
        to_warehouse_uuid: snap.to_warehouse_uuid.unwrap_or_default(),
        adjustment_reason: snap.adjustment_reason,
        notes: snap.notes.unwrap_or_default(),
        created_by: snap.created_by.unwrap_or_default(),
        movement_date: snap.movement_date.unwrap_or_default(),
        created_at: parse_ts(snap.created_at),
        updated_at: parse_ts(snap.updated_at),
    }
}

// Movement rows embed abbreviated references, not full records. Project them
// into partial domain records so consumers get one shape everywhere.

fn product_ref(r: EntityRef) -> Product {
    Product {
        uuid: r.uuid.unwrap_or_default(),
        title: r.title.unwrap_or_default(),
        ..Default::default()
    }
}

fn warehouse_ref(r: EntityRef) -> Warehouse {
    Warehouse {
        uuid: r.uuid.unwrap_or_default(),
        name: r.name.unwrap_or_default(),
        is_active: true,
        ..Default::default()
    }
}

pub(super) fn alert_count(value: serde_json::Value) -> Option<u64> {
    let batch: AlertCountBatch = decode("alert-count", value)?;
    Some(batch.count.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn warehouse_defaults_active_when_flag_absent() {
        let value = json!({
            "warehouses": [
                {"warehouse": {"uuid": "w-1", "name": "Main"}, "totalStock": 40, "utilization": 80.0},
                {"warehouse": {"uuid": "w-2", "isActive": false}}
            ]
        });
        let list = warehouses(value).unwrap();
        assert!(list[0].is_active);
        assert_eq!(list[0].total_stock, 40);
        assert_eq!(list[0].utilization, 80.0);
        assert!(!list[1].is_active);
        assert_eq!(list[1].total_stock, 0);
    }

    #[test]
    fn movement_refs_become_partial_records() {
        let value = json!({
            "movements": [{
                "uuid": "m-1",
                "movementType": "TRANSFER",
                "quantity": 5,
                "product": {"uuid": "p-1", "title": "Widget"},
                "warehouse": {"uuid": "w-1", "name": "Main"},
                "createdAt": "2026-08-30T12:00:00Z"
            }]
        });
        let list = movements(value).unwrap();
        let m = &list[0];
        assert_eq!(m.product.as_ref().unwrap().title, "Widget");
        assert_eq!(m.warehouse.as_ref().unwrap().name, "Main");
        assert!(m.created_at.is_some());
        assert_eq!(m.movement_type, Some(stocklink_shared::MovementType::Transfer));
    }

    #[test]
    fn undecodable_batch_is_dropped() {
        assert!(prices(json!({"products": "nope"})).is_none());
        assert_eq!(alert_count(json!({})), Some(0));
    }
}
