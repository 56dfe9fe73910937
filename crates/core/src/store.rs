//! Store module - persistence seam and the in-memory fallback
//!
//! [`TileStore`] is the contract a storage collaborator fulfils. Its finders
//! have the same semantics as the functions in [`crate::query`]; a store may
//! answer them natively or delegate to those functions.

use crate::error::StoreError;
use crate::query;
use crate::types::{Suit, TileInstance};

pub trait TileStore {
    /// Number of stored tiles
    fn count(&self) -> Result<usize, StoreError>;

    /// Append tiles to the store
    fn save_all(&mut self, tiles: Vec<TileInstance>) -> Result<(), StoreError>;

    /// All stored tiles in insertion order
    fn find_all(&self) -> Result<Vec<TileInstance>, StoreError>;

    fn find_by_suit(&self, suit: Suit) -> Result<Vec<TileInstance>, StoreError>;

    fn find_by_suit_and_value(&self, suit: Suit, value: u8) -> Result<Vec<TileInstance>, StoreError>;
}

/// Non-persistent store backed by a vector
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tiles: Vec<TileInstance>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with `tiles`
    pub fn with_tiles(tiles: Vec<TileInstance>) -> Self {
        Self { tiles }
    }

    pub fn tiles(&self) -> &[TileInstance] {
        &self.tiles
    }
}

impl TileStore for InMemoryStore {
    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.tiles.len())
    }

    fn save_all(&mut self, tiles: Vec<TileInstance>) -> Result<(), StoreError> {
        log::debug!("in-memory store: saving {} tiles", tiles.len());
        self.tiles.extend(tiles);
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<TileInstance>, StoreError> {
        Ok(self.tiles.clone())
    }

    fn find_by_suit(&self, suit: Suit) -> Result<Vec<TileInstance>, StoreError> {
        Ok(query::by_suit(&self.tiles, suit))
    }

    fn find_by_suit_and_value(&self, suit: Suit, value: u8) -> Result<Vec<TileInstance>, StoreError> {
        Ok(query::by_suit_and_value(&self.tiles, suit, value))
    }
}
