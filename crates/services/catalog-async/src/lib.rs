#![deny(warnings)]
#![deny(clippy::all)]
#![deny(missing_docs)]

//! Async client for the upstream catalog API: environment-driven settings, a single
//! pooled HTTP handle with explicit release, and translation of every transport or
//! status failure into [`CatalogError`].

/// HTTP client wrapper
pub mod client;
/// Environment-backed settings
pub mod config;
/// Error types
pub mod error;
/// Process-wide client ownership
pub mod lifecycle;
/// API resource implementations
pub mod resources;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;

pub use crate::client::{Client, HttpPool};
pub use crate::config::Settings;
pub use crate::error::CatalogError;
pub use crate::lifecycle::ClientLifecycle;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::resources::clamp_limit;
    pub use crate::{CatalogError, Client, ClientLifecycle, Settings};
}
