//! Optimistic pre-checks for stock mutations.
//!
//! Everything here is pure arithmetic over data the caller already holds: a
//! warehouse's stock snapshot, its capacity, and a pending quantity. The
//! results gate form submission and drive previews; they are advisory only.
//! The server revalidates every mutation and its rejection is authoritative.

use std::fmt;

use stocklink_shared::WarehouseStock;

/// The four stock-affecting operations a pre-check can model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockOperation {
    /// Stock-in: units arrive at the warehouse.
    Receive,
    /// Stock-out: units leave the warehouse.
    Ship,
    /// Transfer out of this warehouse to another.
    Transfer,
    /// Signed adjustment: positive adds units, negative removes them.
    Adjust,
}

impl StockOperation {
    /// Net change to warehouse stock for a pending `quantity`. Receive adds,
    /// Ship and Transfer subtract, Adjust carries its own sign.
    pub fn signed_delta(self, quantity: i64) -> i64 {
        match self {
            StockOperation::Receive => quantity,
            StockOperation::Ship | StockOperation::Transfer => -quantity,
            StockOperation::Adjust => quantity,
        }
    }

    fn draws_down_product_stock(self) -> bool {
        matches!(self, StockOperation::Ship | StockOperation::Transfer)
    }
}

/// Why a pending operation must not be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    MissingQuantity,
    ExceedsCapacity,
    InsufficientStock,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::MissingQuantity => write!(f, "quantity is required"),
            BlockReason::ExceedsCapacity => write!(f, "operation would exceed warehouse capacity"),
            BlockReason::InsufficientStock => write!(f, "insufficient stock available"),
        }
    }
}

/// What a warehouse would look like after a pending operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockProjection {
    /// Units of the pending product currently in the warehouse; 0 when the
    /// warehouse holds no row for it.
    pub current_product_stock: i64,
    /// Sum of all product quantities currently in the warehouse.
    pub total_warehouse_stock: i64,
    /// Warehouse total after the operation. Not clamped; a negative value
    /// simply means the operation cannot happen.
    pub projected_total: i64,
    /// Product quantity after the operation, clamped at zero for display.
    /// The clamp never authorizes submission; the unclamped shortfall still
    /// blocks it.
    pub projected_product_stock: i64,
    /// True when the warehouse has a finite capacity, the operation adds
    /// stock, and the projected total overshoots. Subtractive operations
    /// never trigger this even in an over-capacity warehouse.
    pub would_exceed_capacity: bool,
}

impl StockProjection {
    /// Project `operation` of `quantity` units of `product_uuid` against a
    /// warehouse snapshot. `capacity` of zero (or less) means unlimited.
    pub fn compute(
        operation: StockOperation,
        quantity: i64,
        rows: &[WarehouseStock],
        product_uuid: &str,
        capacity: i64,
    ) -> Self {
        let current_product_stock = rows
            .iter()
            .find(|row| row.product_uuid == product_uuid)
            .map(|row| row.quantity)
            .unwrap_or(0);
        let total_warehouse_stock: i64 = rows.iter().map(|row| row.quantity).sum();
        let delta = operation.signed_delta(quantity);
        let projected_total = total_warehouse_stock + delta;
        let would_exceed_capacity = capacity > 0 && delta > 0 && projected_total > capacity;
        Self {
            current_product_stock,
            total_warehouse_stock,
            projected_total,
            projected_product_stock: (current_product_stock + delta).max(0),
            would_exceed_capacity,
        }
    }

    /// First reason the pending operation may not be submitted, if any.
    pub fn blocks_submission(
        &self,
        operation: StockOperation,
        quantity: i64,
    ) -> Option<BlockReason> {
        match operation {
            StockOperation::Adjust => {
                if quantity == 0 {
                    return Some(BlockReason::MissingQuantity);
                }
                if quantity < 0 && -quantity > self.current_product_stock {
                    return Some(BlockReason::InsufficientStock);
                }
            }
            _ => {
                if quantity <= 0 {
                    return Some(BlockReason::MissingQuantity);
                }
                if operation.draws_down_product_stock() && quantity > self.current_product_stock {
                    return Some(BlockReason::InsufficientStock);
                }
            }
        }
        if self.would_exceed_capacity {
            return Some(BlockReason::ExceedsCapacity);
        }
        None
    }
}

/// Pre-check for allocating catalog units into a warehouse. Catalog stock is
/// the product's master-data pool; the allocation draws it down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogAllocation {
    pub available: i64,
    pub requested: i64,
    /// Catalog units left after the allocation. May be negative when the
    /// request overshoots; callers show the shortfall.
    pub remaining: i64,
    pub exceeds_available: bool,
}

impl CatalogAllocation {
    pub fn check(available: i64, requested: i64) -> Self {
        Self {
            available,
            requested,
            remaining: available - requested,
            exceeds_available: requested > available,
        }
    }

    pub fn blocks_submission(&self) -> Option<BlockReason> {
        if self.requested <= 0 {
            Some(BlockReason::MissingQuantity)
        } else if self.exceeds_available {
            Some(BlockReason::InsufficientStock)
        } else {
            None
        }
    }
}

/// Percentage of capacity in use, capped at 100. `None` for unlimited
/// warehouses, which have no meaningful utilization.
pub fn utilization(total_stock: i64, capacity: i64) -> Option<f64> {
    if capacity <= 0 {
        return None;
    }
    let pct = total_stock as f64 / capacity as f64 * 100.0;
    Some(pct.min(100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(product: &str, quantity: i64) -> WarehouseStock {
        WarehouseStock {
            uuid: format!("s-{product}"),
            product_uuid: product.to_string(),
            warehouse_uuid: "w-1".to_string(),
            quantity,
            ..Default::default()
        }
    }

    #[test]
    fn receive_projects_against_capacity() {
        let rows = [row("p-1", 40), row("p-2", 50)];
        let p = StockProjection::compute(StockOperation::Receive, 15, &rows, "p-1", 100);
        assert_eq!(p.current_product_stock, 40);
        assert_eq!(p.total_warehouse_stock, 90);
        assert_eq!(p.projected_total, 105);
        assert!(p.would_exceed_capacity);
        assert_eq!(
            p.blocks_submission(StockOperation::Receive, 15),
            Some(BlockReason::ExceedsCapacity)
        );

        let fits = StockProjection::compute(StockOperation::Receive, 10, &rows, "p-1", 100);
        assert!(!fits.would_exceed_capacity);
        assert_eq!(fits.blocks_submission(StockOperation::Receive, 10), None);
    }

    #[test]
    fn unlimited_capacity_never_exceeds() {
        let rows = [row("p-1", 1_000_000)];
        let p = StockProjection::compute(StockOperation::Receive, 1_000_000, &rows, "p-1", 0);
        assert!(!p.would_exceed_capacity);
        assert_eq!(p.blocks_submission(StockOperation::Receive, 1_000_000), None);
    }

    #[test]
    fn shipping_from_over_capacity_warehouse_is_allowed() {
        // Subtractive operations never trip the capacity check, even when
        // the warehouse is already past its limit.
        let rows = [row("p-1", 150)];
        let p = StockProjection::compute(StockOperation::Ship, 20, &rows, "p-1", 100);
        assert!(!p.would_exceed_capacity);
        assert_eq!(p.blocks_submission(StockOperation::Ship, 20), None);
    }

    #[test]
    fn ship_more_than_on_hand_is_blocked() {
        let rows = [row("p-1", 8)];
        let p = StockProjection::compute(StockOperation::Ship, 12, &rows, "p-1", 0);
        assert_eq!(p.projected_product_stock, 0); // clamped for display
        assert_eq!(
            p.blocks_submission(StockOperation::Ship, 12),
            Some(BlockReason::InsufficientStock)
        );
    }

    #[test]
    fn missing_row_counts_as_zero_stock() {
        let rows = [row("p-2", 30)];
        let p = StockProjection::compute(StockOperation::Transfer, 1, &rows, "p-1", 0);
        assert_eq!(p.current_product_stock, 0);
        assert_eq!(
            p.blocks_submission(StockOperation::Transfer, 1),
            Some(BlockReason::InsufficientStock)
        );
    }

    #[test]
    fn zero_quantity_is_always_blocked() {
        let rows = [row("p-1", 10)];
        for op in [
            StockOperation::Receive,
            StockOperation::Ship,
            StockOperation::Transfer,
            StockOperation::Adjust,
        ] {
            let p = StockProjection::compute(op, 0, &rows, "p-1", 100);
            assert_eq!(
                p.blocks_submission(op, 0),
                Some(BlockReason::MissingQuantity),
                "{op:?}"
            );
        }
    }

    #[test]
    fn signed_adjustments() {
        let rows = [row("p-1", 10)];
        let down = StockProjection::compute(StockOperation::Adjust, -4, &rows, "p-1", 100);
        assert_eq!(down.projected_product_stock, 6);
        assert_eq!(down.blocks_submission(StockOperation::Adjust, -4), None);

        let too_far = StockProjection::compute(StockOperation::Adjust, -11, &rows, "p-1", 100);
        assert_eq!(
            too_far.blocks_submission(StockOperation::Adjust, -11),
            Some(BlockReason::InsufficientStock)
        );

        let up = StockProjection::compute(StockOperation::Adjust, 95, &rows, "p-1", 100);
        assert!(up.would_exceed_capacity);
        assert_eq!(
            up.blocks_submission(StockOperation::Adjust, 95),
            Some(BlockReason::ExceedsCapacity)
        );
    }

    #[test]
    fn catalog_allocation_limits() {
        let ok = CatalogAllocation::check(50, 20);
        assert_eq!(ok.remaining, 30);
        assert!(!ok.exceeds_available);
        assert_eq!(ok.blocks_submission(), None);

        let over = CatalogAllocation::check(50, 60);
        assert_eq!(over.remaining, -10);
        assert!(over.exceeds_available);
        assert_eq!(over.blocks_submission(), Some(BlockReason::InsufficientStock));

        assert_eq!(
            CatalogAllocation::check(50, 0).blocks_submission(),
            Some(BlockReason::MissingQuantity)
        );
    }

    #[test]
    fn utilization_caps_at_hundred() {
        assert_eq!(utilization(50, 200), Some(25.0));
        assert_eq!(utilization(300, 200), Some(100.0));
        assert_eq!(utilization(10, 0), None);
    }
}
