//! Error types for catalogs and sessions.

use derive_more::Display;

/// Error building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum CatalogError {
    /// A catalog needs at least one item.
    #[display("Catalog is empty")]
    Empty,
}

impl std::error::Error for CatalogError {}

/// Error from a playback request that the session refused.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PlaybackError {
    /// Direct selection of an index the catalog does not have.
    #[display("Item {} is out of range (catalog has {} items)", index, len)]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Catalog length.
        len: usize,
    },
}

impl std::error::Error for PlaybackError {}
