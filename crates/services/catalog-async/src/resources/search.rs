use serde_json::Value;

use crate::{client::Client, error::CatalogError, resources::clamp_limit};

/// API resource for the `/search` endpoint
pub struct Search<'c> {
    client: &'c Client,
}

impl<'c> Search<'c> {
    /// Creates a new Search resource
    #[must_use]
    pub const fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Free-text search, `GET /search?q=&limit=`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn query(&self, q: &str, limit: u32) -> Result<Value, CatalogError> {
        let limit = clamp_limit(limit);
        self.client
            .get("/search", &[("q", q.to_string()), ("limit", limit.to_string())])
            .await
    }
}

impl Client {
    /// Returns the Search API resource
    #[must_use]
    pub const fn search(&self) -> Search<'_> {
        Search::new(self)
    }
}
