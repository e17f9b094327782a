//! Modal/selection state for CRUD flows.

use stocklink_shared::{Warehouse, WarehouseStock};

/// Which record, if any, a CRUD view is currently acting on. At most one
/// flow is open at a time; assigning a new variant replaces the old one.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection<T> {
    #[default]
    None,
    Editing(T),
    Deleting(T),
}

impl<T> Selection<T> {
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    /// The record under selection, whatever the flow.
    pub fn record(&self) -> Option<&T> {
        match self {
            Selection::None => None,
            Selection::Editing(r) | Selection::Deleting(r) => Some(r),
        }
    }

    pub fn clear(&mut self) {
        *self = Selection::None;
    }
}

/// Warehouse views have two extra flows on top of edit/delete: managing a
/// warehouse's stock, and transferring one stock row out of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum WarehouseSelection {
    #[default]
    None,
    Editing(Warehouse),
    Deleting(Warehouse),
    ManagingStock(Warehouse),
    Transferring {
        warehouse: Warehouse,
        stock: WarehouseStock,
    },
}

impl WarehouseSelection {
    pub fn is_none(&self) -> bool {
        matches!(self, WarehouseSelection::None)
    }

    pub fn warehouse(&self) -> Option<&Warehouse> {
        match self {
            WarehouseSelection::None => None,
            WarehouseSelection::Editing(w)
            | WarehouseSelection::Deleting(w)
            | WarehouseSelection::ManagingStock(w)
            | WarehouseSelection::Transferring { warehouse: w, .. } => Some(w),
        }
    }

    pub fn clear(&mut self) {
        *self = WarehouseSelection::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_replaces_and_clears() {
        let mut sel: Selection<String> = Selection::None;
        assert!(sel.is_none());
        sel = Selection::Editing("a".into());
        assert_eq!(sel.record(), Some(&"a".to_string()));
        sel = Selection::Deleting("b".into());
        assert_eq!(sel.record(), Some(&"b".to_string()));
        sel.clear();
        assert!(sel.is_none());
    }

    #[test]
    fn transferring_exposes_its_warehouse() {
        let sel = WarehouseSelection::Transferring {
            warehouse: Warehouse {
                uuid: "w-1".into(),
                ..Default::default()
            },
            stock: WarehouseStock::default(),
        };
        assert_eq!(sel.warehouse().map(|w| w.uuid.as_str()), Some("w-1"));
    }
}
