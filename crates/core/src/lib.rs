//! Core tile logic module - pure, deterministic, and testable
//!
//! This crate contains catalog generation, lookup queries and the storage seam.
//! The catalog and query layers have **zero dependencies** on networking or
//! I/O, making them:
//!
//! - **Deterministic**: `generate()` always yields the same 136 tiles in the same order
//! - **Total**: no-match queries return empty results, never errors
//! - **Portable**: usable over any collection, stored or in memory
//!
//! # Module Structure
//!
//! - [`catalog`]: 136-tile generation, idempotent initialization, invariant check
//! - [`query`]: filtering, counting and grouping over a tile slice
//! - [`store`]: the [`TileStore`] seam and the in-memory fallback store
//! - [`service`]: [`TileService`], orchestration of a store and the catalog
//! - [`error`]: [`StoreError`] raised by storage collaborators
//!
//! # Example
//!
//! ```
//! use mahjong_tiles_core::{catalog, query, InMemoryStore, TileService};
//! use mahjong_tiles_core::types::Suit;
//!
//! let tiles = catalog::generate();
//! assert_eq!(tiles.len(), 136);
//! assert_eq!(query::count_by_suit(&tiles, Suit::Honors), 28);
//!
//! let mut service = TileService::new(InMemoryStore::new());
//! assert_eq!(service.initialize_if_empty().unwrap(), 136);
//! assert_eq!(service.initialize_if_empty().unwrap(), 0);
//! ```

pub mod catalog;
pub mod error;
pub mod query;
pub mod service;
pub mod store;

pub use mahjong_tiles_types as types;

// Re-export commonly used types for convenience
pub use catalog::{ensure_initialized, generate, verify_catalog, CatalogViolation};
pub use error::StoreError;
pub use query::{
    by_suit, by_suit_and_value, count_by_suit, count_by_suit_and_value, group_by_suit_and_value,
};
pub use service::TileService;
pub use store::{InMemoryStore, TileStore};
