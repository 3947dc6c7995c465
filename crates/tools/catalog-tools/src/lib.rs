#![deny(warnings)]
#![deny(clippy::all)]

//! Catalog search, detail, category, and popularity MCP tools.

pub mod categories;
pub mod items;
pub mod mapping;
pub mod popular;
pub mod search;
pub mod tools;
pub mod types;

use std::sync::Arc;

use catalog_async::{CatalogError, Client, ClientLifecycle};
use thiserror::Error;

use crate::mapping::ReshapeError;

/// Shared state for the catalog tools.
///
/// Holds the lifecycle that owns the process's catalog client; every tool call
/// borrows the live client from it, creating one on first demand.
#[derive(Clone)]
pub struct CatalogTools {
    lifecycle: Arc<ClientLifecycle>,
}

impl CatalogTools {
    /// Create tools that borrow their client from `lifecycle`.
    #[must_use]
    pub const fn new(lifecycle: Arc<ClientLifecycle>) -> Self {
        Self { lifecycle }
    }

    /// The lifecycle backing these tools.
    #[must_use]
    pub const fn lifecycle(&self) -> &Arc<ClientLifecycle> {
        &self.lifecycle
    }

    pub(crate) async fn client(&self) -> Arc<Client> {
        self.lifecycle.get_or_create().await
    }
}

/// Anything that can go wrong inside a tool before it becomes an error record.
#[derive(Debug, Error)]
pub(crate) enum Failure {
    #[error(transparent)]
    Api(#[from] CatalogError),
    #[error(transparent)]
    Reshape(#[from] ReshapeError),
}

pub use tools::build_registry;
