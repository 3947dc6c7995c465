//! Core traits and types for exposing async functions as named tools.
//!
//! This crate provides:
//! - [`Tool`] trait: a named async operation with typed input and output
//! - [`ToolError`]: failures at the dispatch boundary
//! - [`ToolRegistry`]: name-keyed storage with JSON dispatch and input schemas

pub mod error;
pub mod registry;
pub mod schema;
pub mod tool;

pub use error::ToolError;
pub use registry::{ErasedTool, ToolRegistry, ToolRegistryBuilder};
pub use tool::Tool;

// Re-export BoxFuture so tool crates don't need a direct futures dependency
pub use futures::future::BoxFuture;
