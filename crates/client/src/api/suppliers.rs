//! Supplier reference-data endpoints.

use stocklink_shared::{ApiError, ListData, NewSupplier, Supplier};

use super::page::{Page, PageQuery};
use crate::api_client::ApiClient;

impl ApiClient {
    pub async fn create_supplier(&self, supplier: &NewSupplier) -> Result<Supplier, ApiError> {
        self.post_data("/suppliers", supplier).await
    }

    pub async fn get_suppliers(&self) -> Result<Vec<Supplier>, ApiError> {
        self.get_data("/suppliers").await
    }

    pub async fn get_suppliers_paginated(
        &self,
        query: &PageQuery,
    ) -> Result<Page<Supplier>, ApiError> {
        let data: ListData<Supplier> = self
            .get_data(&format!("/suppliers?{}", query.to_query()))
            .await?;
        Ok(data.into())
    }

    pub async fn get_supplier(&self, uuid: &str) -> Result<Supplier, ApiError> {
        self.get_data(&format!("/suppliers/{}", urlencoding::encode(uuid)))
            .await
    }

    pub async fn update_supplier(
        &self,
        uuid: &str,
        supplier: &NewSupplier,
    ) -> Result<Supplier, ApiError> {
        self.put_data(
            &format!("/suppliers/{}", urlencoding::encode(uuid)),
            supplier,
        )
        .await
    }

    pub async fn delete_supplier(&self, uuid: &str) -> Result<(), ApiError> {
        self.delete(&format!("/suppliers/{}", urlencoding::encode(uuid)))
            .await
    }
}
