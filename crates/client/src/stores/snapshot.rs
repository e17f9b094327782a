//! Per-warehouse stock snapshot cache.

use std::collections::HashMap;

use stocklink_shared::{ApiError, WarehouseStock};

use crate::api_client::ApiClient;

/// Read-through cache of warehouse stock rows, keyed by warehouse uuid.
/// Pre-check math runs against these snapshots; a committed mutation must
/// invalidate the warehouses it touched so the next read refetches.
#[derive(Debug, Default)]
pub struct StockSnapshotCache {
    rows: HashMap<String, Vec<WarehouseStock>>,
}

impl StockSnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot for `warehouse_uuid`, fetching on first access. A warehouse
    /// with no stock caches as an empty snapshot rather than refetching.
    pub async fn load(
        &mut self,
        api: &ApiClient,
        warehouse_uuid: &str,
    ) -> Result<&[WarehouseStock], ApiError> {
        if !self.rows.contains_key(warehouse_uuid) {
            let fetched = api.get_warehouse_stock(warehouse_uuid).await?;
            self.rows.insert(warehouse_uuid.to_string(), fetched);
        }
        Ok(self
            .rows
            .get(warehouse_uuid)
            .map(|rows| rows.as_slice())
            .unwrap_or(&[]))
    }

    /// Cached snapshot, if any, without fetching.
    pub fn get(&self, warehouse_uuid: &str) -> Option<&[WarehouseStock]> {
        self.rows.get(warehouse_uuid).map(|rows| rows.as_slice())
    }

    pub fn invalidate(&mut self, warehouse_uuid: &str) {
        self.rows.remove(warehouse_uuid);
    }

    pub fn invalidate_all(&mut self) {
        self.rows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidate_drops_only_the_named_warehouse() {
        let mut cache = StockSnapshotCache::new();
        cache.rows.insert("w-1".into(), vec![WarehouseStock::default()]);
        cache.rows.insert("w-2".into(), vec![]);

        cache.invalidate("w-1");
        assert!(cache.get("w-1").is_none());
        assert!(cache.get("w-2").is_some());

        cache.invalidate_all();
        assert!(cache.get("w-2").is_none());
    }
}
