//! Cached-collection invalidation.
//!
//! Each REST collection a view may cache has a version number; a committed
//! mutation bumps the versions of every collection it touches. Consumers
//! compare versions to decide when to refetch. Stock ledger mutations fan
//! out widely because the server updates warehouse stock, product totals,
//! and the combined movement ledger as side effects.

use std::collections::HashMap;

/// The cacheable REST collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Products,
    Categories,
    Suppliers,
    Warehouses,
    WarehouseStock,
    StockMovements,
    StockIns,
    StockOuts,
    StockAdjustments,
}

/// A committed mutation, by what it invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    StockIn,
    StockOut,
    StockAdjustment,
    /// Catalog units allocated into a warehouse.
    AddStock,
    StockTransfer,
    ProductChange,
    CategoryChange,
    SupplierChange,
    WarehouseChange,
}

impl MutationKind {
    /// Collections stale after this mutation commits.
    pub fn invalidates(self) -> &'static [CollectionKey] {
        use CollectionKey::*;
        match self {
            MutationKind::StockIn => &[StockIns, StockMovements, WarehouseStock, Products],
            MutationKind::StockOut => &[StockOuts, StockMovements, WarehouseStock, Products],
            MutationKind::StockAdjustment => {
                &[StockAdjustments, StockMovements, WarehouseStock, Products]
            }
            MutationKind::AddStock | MutationKind::StockTransfer => &[WarehouseStock, Products],
            MutationKind::ProductChange => &[Products],
            MutationKind::CategoryChange => &[Categories],
            MutationKind::SupplierChange => &[Suppliers],
            MutationKind::WarehouseChange => &[Warehouses],
        }
    }
}

/// Version counter per collection. Starts at zero for every key.
#[derive(Debug, Default)]
pub struct InvalidationTracker {
    versions: HashMap<CollectionKey, u64>,
}

impl InvalidationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a committed mutation, bumping every affected collection.
    pub fn record(&mut self, mutation: MutationKind) {
        for key in mutation.invalidates() {
            *self.versions.entry(*key).or_insert(0) += 1;
        }
    }

    pub fn version(&self, key: CollectionKey) -> u64 {
        self.versions.get(&key).copied().unwrap_or(0)
    }

    /// Whether `key` has changed since the caller last observed `seen`.
    pub fn is_stale(&self, key: CollectionKey, seen: u64) -> bool {
        self.version(key) != seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_mutations_fan_out() {
        let mut tracker = InvalidationTracker::new();
        tracker.record(MutationKind::StockIn);
        assert_eq!(tracker.version(CollectionKey::StockIns), 1);
        assert_eq!(tracker.version(CollectionKey::StockMovements), 1);
        assert_eq!(tracker.version(CollectionKey::WarehouseStock), 1);
        assert_eq!(tracker.version(CollectionKey::Products), 1);
        assert_eq!(tracker.version(CollectionKey::StockOuts), 0);
        assert_eq!(tracker.version(CollectionKey::Warehouses), 0);
    }

    #[test]
    fn crud_touches_only_its_collection() {
        let mut tracker = InvalidationTracker::new();
        tracker.record(MutationKind::CategoryChange);
        assert_eq!(tracker.version(CollectionKey::Categories), 1);
        assert_eq!(tracker.version(CollectionKey::Products), 0);
        assert!(tracker.is_stale(CollectionKey::Categories, 0));
        assert!(!tracker.is_stale(CollectionKey::Categories, 1));
    }

    #[test]
    fn transfer_refreshes_stock_and_products() {
        let mut tracker = InvalidationTracker::new();
        tracker.record(MutationKind::StockTransfer);
        assert_eq!(tracker.version(CollectionKey::WarehouseStock), 1);
        assert_eq!(tracker.version(CollectionKey::Products), 1);
        assert_eq!(tracker.version(CollectionKey::StockMovements), 0);
    }
}
