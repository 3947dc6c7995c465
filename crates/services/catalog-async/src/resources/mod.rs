//! API resource implementations for the catalog client

/// Categories API resource
pub mod categories;
/// Items API resource
pub mod items;
/// Popular-items API resource
pub mod popular;
/// Search API resource
pub mod search;

pub use categories::Categories;
pub use items::Items;
pub use popular::Popular;
pub use search::Search;

/// Hard ceiling on any result-count parameter sent upstream.
pub const MAX_LIMIT: u32 = 50;

/// Clamps a caller-supplied result count to [`MAX_LIMIT`].
#[must_use]
pub const fn clamp_limit(limit: u32) -> u32 {
    if limit > MAX_LIMIT { MAX_LIMIT } else { limit }
}

/// Percent-encodes a caller-supplied id for use as one path segment.
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
