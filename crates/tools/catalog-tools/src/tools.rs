//! Tool wrappers over the catalog operations.
//!
//! Each tool delegates to the matching operation module. Operations swallow
//! their own failures into error records, so these wrappers never return
//! `Err`; only argument decoding can fail, and that happens in the registry.

use catalog_tool_core::{BoxFuture, Tool, ToolError, ToolRegistry};

use crate::CatalogTools;
use crate::types::{
    ItemDetailsInput, ListCategoriesInput, ListReply, ObjectReply, PopularItemsInput,
    SearchItemsInput,
};

// ============================================================================
// SearchItems Tool
// ============================================================================

/// Tool for free-text catalog search.
#[derive(Clone)]
pub struct SearchItemsTool {
    tools: CatalogTools,
}

impl SearchItemsTool {
    #[must_use]
    pub const fn new(tools: CatalogTools) -> Self {
        Self { tools }
    }
}

impl Tool for SearchItemsTool {
    type Input = SearchItemsInput;
    type Output = ListReply;
    const NAME: &'static str = "search_items";
    const DESCRIPTION: &'static str = "Search the catalog for items matching a query. Returns up to `limit` items (default 10, max 50), each with id, title, description, url and tags.";

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let tools = self.tools.clone();
        Box::pin(async move { Ok(crate::search::search_items(&tools, input).await) })
    }
}

// ============================================================================
// GetItemDetails Tool
// ============================================================================

/// Tool for fetching one item's full record.
#[derive(Clone)]
pub struct GetItemDetailsTool {
    tools: CatalogTools,
}

impl GetItemDetailsTool {
    #[must_use]
    pub const fn new(tools: CatalogTools) -> Self {
        Self { tools }
    }
}

impl Tool for GetItemDetailsTool {
    type Input = ItemDetailsInput;
    type Output = ObjectReply;
    const NAME: &'static str = "get_item_details";
    const DESCRIPTION: &'static str = "Get full details for one item by id, including its long description, author, creation date, category and metadata.";

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let tools = self.tools.clone();
        Box::pin(async move { Ok(crate::items::get_item_details(&tools, input).await) })
    }
}

// ============================================================================
// ListCategories Tool
// ============================================================================

/// Tool for listing catalog categories.
#[derive(Clone)]
pub struct ListCategoriesTool {
    tools: CatalogTools,
}

impl ListCategoriesTool {
    #[must_use]
    pub const fn new(tools: CatalogTools) -> Self {
        Self { tools }
    }
}

impl Tool for ListCategoriesTool {
    type Input = ListCategoriesInput;
    type Output = ListReply;
    const NAME: &'static str = "list_categories";
    const DESCRIPTION: &'static str = "List the catalog's categories with their id, name, description, item count and icon. Use a category name with get_popular_items to browse it.";

    fn call(&self, _input: Self::Input) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let tools = self.tools.clone();
        Box::pin(async move { Ok(crate::categories::list_categories(&tools).await) })
    }
}

// ============================================================================
// GetPopularItems Tool
// ============================================================================

/// Tool for browsing popular items.
#[derive(Clone)]
pub struct GetPopularItemsTool {
    tools: CatalogTools,
}

impl GetPopularItemsTool {
    #[must_use]
    pub const fn new(tools: CatalogTools) -> Self {
        Self { tools }
    }
}

impl Tool for GetPopularItemsTool {
    type Input = PopularItemsInput;
    type Output = ListReply;
    const NAME: &'static str = "get_popular_items";
    const DESCRIPTION: &'static str = "Get trending or popular items (default 10, max 50), optionally restricted to a category by name. Items carry the search fields plus a popularity score.";

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let tools = self.tools.clone();
        Box::pin(async move { Ok(crate::popular::get_popular_items(&tools, input).await) })
    }
}

// ============================================================================
// Registry Builder
// ============================================================================

/// Build a `ToolRegistry` containing all catalog tools.
#[must_use]
pub fn build_registry(tools: CatalogTools) -> ToolRegistry {
    ToolRegistry::builder()
        .register(SearchItemsTool::new(tools.clone()))
        .register(GetItemDetailsTool::new(tools.clone()))
        .register(ListCategoriesTool::new(tools.clone()))
        .register(GetPopularItemsTool::new(tools))
        .finish()
}
