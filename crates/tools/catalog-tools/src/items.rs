//! Single-item lookup.

use tracing::error;

use crate::mapping::{ITEM_DETAILS, Record, reshape_object};
use crate::types::{ItemDetailsInput, ObjectReply};
use crate::{CatalogTools, Failure};

/// Fetch one item and reshape it into the full detail record.
pub async fn get_item_details(tools: &CatalogTools, input: ItemDetailsInput) -> ObjectReply {
    match run(tools, &input.item_id).await {
        Ok(record) => ObjectReply::Record(record),
        Err(e) => {
            error!(item_id = %input.item_id, error = %e, "item lookup failed");
            ObjectReply::failed(format!("Failed to get item details: {e}"))
        }
    }
}

async fn run(tools: &CatalogTools, item_id: &str) -> Result<Record, Failure> {
    let payload = tools.client().await.items().get(item_id).await?;
    Ok(reshape_object(&payload, ITEM_DETAILS)?)
}
