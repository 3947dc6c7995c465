use serde_json::Value;

use crate::{
    client::Client,
    error::CatalogError,
    resources::{clamp_limit, segment},
};

/// API resource for the `/categories` endpoints
pub struct Categories<'c> {
    client: &'c Client,
}

impl<'c> Categories<'c> {
    /// Creates a new Categories resource
    #[must_use]
    pub const fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// All categories, `GET /categories`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list(&self) -> Result<Value, CatalogError> {
        self.client.get("/categories", &[]).await
    }

    /// Items within one category, `GET /categories/{id}/items?limit=`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn items(&self, category_id: &str, limit: u32) -> Result<Value, CatalogError> {
        let limit = clamp_limit(limit);
        self.client
            .get(
                &format!("/categories/{}/items", segment(category_id)),
                &[("limit", limit.to_string())],
            )
            .await
    }
}

impl Client {
    /// Returns the Categories API resource
    #[must_use]
    pub const fn categories(&self) -> Categories<'_> {
        Categories::new(self)
    }
}
