//! Category listing.

use tracing::error;

use crate::mapping::{CATEGORY, Record, reshape_results};
use crate::types::ListReply;
use crate::{CatalogTools, Failure};

/// List every category the catalog offers.
pub async fn list_categories(tools: &CatalogTools) -> ListReply {
    match run(tools).await {
        Ok(records) => ListReply::Records(records),
        Err(e) => {
            error!(error = %e, "category listing failed");
            ListReply::failed(format!("Failed to list categories: {e}"))
        }
    }
}

async fn run(tools: &CatalogTools) -> Result<Vec<Record>, Failure> {
    let payload = tools.client().await.categories().list().await?;
    Ok(reshape_results(&payload, CATEGORY)?)
}
