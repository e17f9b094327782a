//! Stock movement audit trail and the three movement-creating endpoints
//! (receive, ship, adjust).

use stocklink_shared::{
    ApiError, ListData, MovementType, NewStockAdjustment, NewStockIn, NewStockOut,
    StockAdjustment, StockIn, StockMovement, StockOut,
};

use super::page::{Page, PageQuery};
use crate::api_client::ApiClient;

fn limit_suffix(limit: u32) -> String {
    if limit > 0 {
        format!("?limit={limit}")
    } else {
        String::new()
    }
}

impl ApiClient {
    // --- Audit trail ---

    pub async fn get_stock_movements(&self, limit: u32) -> Result<Vec<StockMovement>, ApiError> {
        self.get_data(&format!("/stock-movements{}", limit_suffix(limit)))
            .await
    }

    /// Paginated movement history; `query.movement_type` narrows by kind.
    pub async fn get_stock_movements_paginated(
        &self,
        query: &PageQuery,
    ) -> Result<Page<StockMovement>, ApiError> {
        let data: ListData<StockMovement> = self
            .get_data(&format!("/stock-movements?{}", query.to_query()))
            .await?;
        Ok(data.into())
    }

    pub async fn get_stock_movements_by_warehouse(
        &self,
        warehouse_uuid: &str,
        limit: u32,
    ) -> Result<Vec<StockMovement>, ApiError> {
        self.get_data(&format!(
            "/stock-movements/warehouse/{}{}",
            urlencoding::encode(warehouse_uuid),
            limit_suffix(limit)
        ))
        .await
    }

    pub async fn get_stock_movements_by_product(
        &self,
        product_uuid: &str,
        limit: u32,
    ) -> Result<Vec<StockMovement>, ApiError> {
        self.get_data(&format!(
            "/stock-movements/product/{}{}",
            urlencoding::encode(product_uuid),
            limit_suffix(limit)
        ))
        .await
    }

    pub async fn get_stock_movements_by_date_range(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<StockMovement>, ApiError> {
        self.get_data(&format!(
            "/stock-movements/date-range?startDate={}&endDate={}",
            urlencoding::encode(start_date),
            urlencoding::encode(end_date)
        ))
        .await
    }

    pub async fn get_stock_movements_by_type(
        &self,
        movement_type: MovementType,
        limit: u32,
    ) -> Result<Vec<StockMovement>, ApiError> {
        let mut path = format!("/stock-movements/type?type={}", movement_type.as_str());
        if limit > 0 {
            path.push_str(&format!("&limit={limit}"));
        }
        self.get_data(&path).await
    }

    // --- Stock IN (receiving) ---

    pub async fn create_stock_in(&self, stock_in: &NewStockIn) -> Result<StockIn, ApiError> {
        self.post_data("/stock-in", stock_in).await
    }

    pub async fn get_stock_ins(&self) -> Result<Vec<StockIn>, ApiError> {
        self.get_data("/stock-in").await
    }

    pub async fn get_stock_ins_by_warehouse(
        &self,
        warehouse_uuid: &str,
    ) -> Result<Vec<StockIn>, ApiError> {
        self.get_data(&format!(
            "/stock-in/warehouse/{}",
            urlencoding::encode(warehouse_uuid)
        ))
        .await
    }

    // --- Stock OUT (shipments) ---

    pub async fn create_stock_out(&self, stock_out: &NewStockOut) -> Result<StockOut, ApiError> {
        self.post_data("/stock-out", stock_out).await
    }

    pub async fn get_stock_outs(&self) -> Result<Vec<StockOut>, ApiError> {
        self.get_data("/stock-out").await
    }

    pub async fn get_stock_outs_by_warehouse(
        &self,
        warehouse_uuid: &str,
    ) -> Result<Vec<StockOut>, ApiError> {
        self.get_data(&format!(
            "/stock-out/warehouse/{}",
            urlencoding::encode(warehouse_uuid)
        ))
        .await
    }

    // --- Adjustments ---

    pub async fn create_stock_adjustment(
        &self,
        adjustment: &NewStockAdjustment,
    ) -> Result<StockAdjustment, ApiError> {
        self.post_data("/stock-adjustments", adjustment).await
    }

    pub async fn get_stock_adjustments(&self) -> Result<Vec<StockAdjustment>, ApiError> {
        self.get_data("/stock-adjustments").await
    }

    pub async fn get_stock_adjustments_by_warehouse(
        &self,
        warehouse_uuid: &str,
    ) -> Result<Vec<StockAdjustment>, ApiError> {
        self.get_data(&format!(
            "/stock-adjustments/warehouse/{}",
            urlencoding::encode(warehouse_uuid)
        ))
        .await
    }
}
