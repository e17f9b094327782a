//! Product catalog endpoints.

use stocklink_shared::{ApiError, ListData, NewProduct, Product};

use super::page::{Page, PageQuery};
use crate::api_client::ApiClient;

impl ApiClient {
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        self.post_data("/products", product).await
    }

    pub async fn get_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_data("/products").await
    }

    pub async fn get_products_paginated(&self, query: &PageQuery) -> Result<Page<Product>, ApiError> {
        let data: ListData<Product> = self
            .get_data(&format!("/products?{}", query.to_query()))
            .await?;
        Ok(data.into())
    }

    pub async fn get_product(&self, uuid: &str) -> Result<Product, ApiError> {
        self.get_data(&format!("/products/{}", urlencoding::encode(uuid)))
            .await
    }

    pub async fn update_product(&self, uuid: &str, product: &NewProduct) -> Result<Product, ApiError> {
        self.put_data(&format!("/products/{}", urlencoding::encode(uuid)), product)
            .await
    }

    pub async fn delete_product(&self, uuid: &str) -> Result<(), ApiError> {
        self.delete(&format!("/products/{}", urlencoding::encode(uuid)))
            .await
    }

    /// Top N products by catalog stock (dashboard widget fallback for when
    /// the live stream is unavailable).
    pub async fn get_top_products_by_stock(&self, limit: u32) -> Result<Vec<Product>, ApiError> {
        self.get_data(&format!("/products/top-by-stock?limit={limit}"))
            .await
    }
}
