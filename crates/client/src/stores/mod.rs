//! Client-side state: selections, cache invalidation, stock snapshots.

pub mod cache;
pub mod selection;
pub mod snapshot;

pub use cache::{CollectionKey, InvalidationTracker, MutationKind};
pub use selection::{Selection, WarehouseSelection};
pub use snapshot::StockSnapshotCache;
