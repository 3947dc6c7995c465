//! Popular items, optionally narrowed to one category.

use serde_json::Value;
use tracing::{error, warn};

use crate::mapping::{POPULAR_ITEM, ReshapeError, is_truthy, reshape_results, results_of};
use crate::types::{ListReply, PopularItemsInput};
use crate::{CatalogTools, Failure};

/// Fetch popular items.
///
/// With a non-empty `category`, the category list is consulted first and the
/// items come from that category; an unknown name short-circuits with
/// `[{"error": "Category '<name>' not found"}]` and no items request is made.
pub async fn get_popular_items(tools: &CatalogTools, input: PopularItemsInput) -> ListReply {
    match run(tools, &input).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(category = ?input.category, error = %e, "popular items failed");
            ListReply::failed(format!("Failed to get popular items: {e}"))
        }
    }
}

async fn run(tools: &CatalogTools, input: &PopularItemsInput) -> Result<ListReply, Failure> {
    let client = tools.client().await;

    let payload = match input.category.as_deref().filter(|c| !c.is_empty()) {
        None => client.popular().list(input.limit).await?,
        Some(name) => {
            let categories = client.categories().list().await?;
            let Some(id) = find_category_id(&categories, name)? else {
                warn!(category = name, "category not found");
                return Ok(ListReply::failed(format!("Category '{name}' not found")));
            };
            client.categories().items(&id, input.limit).await?
        }
    };

    Ok(ListReply::Records(reshape_results(&payload, POPULAR_ITEM)?))
}

/// Id of the first category whose name matches `name` case-insensitively.
///
/// `None` when nothing matches or the matching entry has a falsy id. Non-string
/// ids are rendered as their JSON text.
fn find_category_id(payload: &Value, name: &str) -> Result<Option<String>, ReshapeError> {
    let wanted = name.to_lowercase();
    let matched = results_of(payload)?.into_iter().find(|cat| {
        cat.get("name")
            .and_then(Value::as_str)
            .is_some_and(|n| n.to_lowercase() == wanted)
    });

    Ok(matched
        .and_then(|cat| cat.get("id"))
        .filter(|id| is_truthy(id))
        .map(|id| match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
}
