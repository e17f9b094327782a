//! Category reference-data endpoints.

use stocklink_shared::{ApiError, Category, ListData, NewCategory};

use super::page::{Page, PageQuery};
use crate::api_client::ApiClient;

impl ApiClient {
    pub async fn create_category(&self, category: &NewCategory) -> Result<Category, ApiError> {
        self.post_data("/categories", category).await
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_data("/categories").await
    }

    pub async fn get_categories_paginated(
        &self,
        query: &PageQuery,
    ) -> Result<Page<Category>, ApiError> {
        let data: ListData<Category> = self
            .get_data(&format!("/categories?{}", query.to_query()))
            .await?;
        Ok(data.into())
    }

    pub async fn get_category(&self, uuid: &str) -> Result<Category, ApiError> {
        self.get_data(&format!("/categories/{}", urlencoding::encode(uuid)))
            .await
    }

    pub async fn update_category(
        &self,
        uuid: &str,
        category: &NewCategory,
    ) -> Result<Category, ApiError> {
        self.put_data(
            &format!("/categories/{}", urlencoding::encode(uuid)),
            category,
        )
        .await
    }

    pub async fn delete_category(&self, uuid: &str) -> Result<(), ApiError> {
        self.delete(&format!("/categories/{}", urlencoding::encode(uuid)))
            .await
    }
}
