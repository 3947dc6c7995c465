use serde_json::Value;

use crate::{client::Client, error::CatalogError, resources::segment};

/// API resource for the `/items` endpoint
pub struct Items<'c> {
    client: &'c Client,
}

impl<'c> Items<'c> {
    /// Creates a new Items resource
    #[must_use]
    pub const fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Full record for one item, `GET /items/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get(&self, id: &str) -> Result<Value, CatalogError> {
        self.client
            .get(&format!("/items/{}", segment(id)), &[])
            .await
    }
}

impl Client {
    /// Returns the Items API resource
    #[must_use]
    pub const fn items(&self) -> Items<'_> {
        Items::new(self)
    }
}
