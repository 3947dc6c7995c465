//! Free-text item search.

use tracing::error;

use crate::mapping::{ITEM_SUMMARY, Record, reshape_results};
use crate::types::{ListReply, SearchItemsInput};
use crate::{CatalogTools, Failure};

/// Search the catalog and reshape each hit into an item summary.
///
/// Never fails: upstream or shape errors become `[{"error": "Search failed: ..."}]`.
pub async fn search_items(tools: &CatalogTools, input: SearchItemsInput) -> ListReply {
    match run(tools, &input).await {
        Ok(records) => ListReply::Records(records),
        Err(e) => {
            error!(query = %input.query, error = %e, "search failed");
            ListReply::failed(format!("Search failed: {e}"))
        }
    }
}

async fn run(tools: &CatalogTools, input: &SearchItemsInput) -> Result<Vec<Record>, Failure> {
    let payload = tools
        .client()
        .await
        .search()
        .query(&input.query, input.limit)
        .await?;
    Ok(reshape_results(&payload, ITEM_SUMMARY)?)
}
