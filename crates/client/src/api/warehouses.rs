//! Warehouse endpoints, including the per-warehouse stock snapshot and the
//! two allocation mutations (catalog → warehouse, warehouse → warehouse).

use stocklink_shared::{
    ApiError, NewStockTransfer, NewWarehouse, NewWarehouseStock, StockTransfer, Warehouse,
    WarehouseStock,
};

use crate::api_client::ApiClient;

impl ApiClient {
    pub async fn create_warehouse(&self, warehouse: &NewWarehouse) -> Result<Warehouse, ApiError> {
        self.post_data("/warehouses", warehouse).await
    }

    /// List warehouses. With `include_metrics` the server attaches derived
    /// `totalStock`/`utilization`; a positive `limit` caps the result count
    /// (sorted by utilization server-side), zero means all.
    pub async fn get_warehouses(
        &self,
        include_metrics: bool,
        limit: u32,
    ) -> Result<Vec<Warehouse>, ApiError> {
        let mut params = Vec::new();
        if include_metrics {
            params.push("metrics=true".to_string());
        }
        if limit > 0 {
            params.push(format!("limit={limit}"));
        }
        let path = if params.is_empty() {
            "/warehouses".to_string()
        } else {
            format!("/warehouses?{}", params.join("&"))
        };
        self.get_data(&path).await
    }

    pub async fn get_warehouse(&self, uuid: &str) -> Result<Warehouse, ApiError> {
        self.get_data(&format!("/warehouses/{}", urlencoding::encode(uuid)))
            .await
    }

    pub async fn update_warehouse(
        &self,
        uuid: &str,
        warehouse: &NewWarehouse,
    ) -> Result<Warehouse, ApiError> {
        self.put_data(
            &format!("/warehouses/{}", urlencoding::encode(uuid)),
            warehouse,
        )
        .await
    }

    pub async fn delete_warehouse(&self, uuid: &str) -> Result<(), ApiError> {
        self.delete(&format!("/warehouses/{}", urlencoding::encode(uuid)))
            .await
    }

    /// Current stock rows for one warehouse. This is the snapshot the
    /// pre-check engine reads; it is fetched on warehouse selection and
    /// refreshed by invalidation after mutations.
    pub async fn get_warehouse_stock(&self, uuid: &str) -> Result<Vec<WarehouseStock>, ApiError> {
        self.get_data(&format!(
            "/warehouses/{}/stock",
            urlencoding::encode(uuid)
        ))
        .await
    }

    /// Allocate catalog units into a warehouse; the server reduces the
    /// product's catalog stock accordingly.
    pub async fn add_stock(&self, stock: &NewWarehouseStock) -> Result<WarehouseStock, ApiError> {
        self.post_data("/warehouses/stock", stock).await
    }

    pub async fn transfer_stock(
        &self,
        transfer: &NewStockTransfer,
    ) -> Result<StockTransfer, ApiError> {
        self.post_data("/warehouses/transfer", transfer).await
    }
}
