use serde_json::Value;

use crate::{client::Client, error::CatalogError, resources::clamp_limit};

/// API resource for the `/popular` endpoint
pub struct Popular<'c> {
    client: &'c Client,
}

impl<'c> Popular<'c> {
    /// Creates a new Popular resource
    #[must_use]
    pub const fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Trending items, `GET /popular?limit=`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list(&self, limit: u32) -> Result<Value, CatalogError> {
        let limit = clamp_limit(limit);
        self.client
            .get("/popular", &[("limit", limit.to_string())])
            .await
    }
}

impl Client {
    /// Returns the Popular API resource
    #[must_use]
    pub const fn popular(&self) -> Popular<'_> {
        Popular::new(self)
    }
}
