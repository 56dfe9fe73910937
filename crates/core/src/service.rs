//! Service module - catalog lifecycle over a store
//!
//! [`TileService`] is what outer layers talk to. Initialization is an explicit
//! call rather than a startup hook, so tests and the server drive it the same
//! way. Concurrent callers must serialize `initialize_if_empty` themselves
//! (the adapter holds a write lock across it).

use std::collections::BTreeMap;

use crate::catalog;
use crate::error::StoreError;
use crate::query;
use crate::store::TileStore;
use crate::types::{Suit, TileInstance, TileKind};

#[derive(Debug)]
pub struct TileService<S> {
    store: S,
}

impl<S: TileStore> TileService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Generate and persist the catalog if the store is empty
    ///
    /// Returns the number of tiles created: 136 on first call, 0 afterwards.
    pub fn initialize_if_empty(&mut self) -> Result<usize, StoreError> {
        let existing = self.store.count()?;
        match catalog::ensure_initialized(existing) {
            Some(tiles) => {
                let created = tiles.len();
                self.store.save_all(tiles)?;
                log::info!("created tile catalog ({} tiles)", created);
                Ok(created)
            }
            None => {
                log::debug!("store already holds {} tiles, skipping initialization", existing);
                Ok(0)
            }
        }
    }

    /// Startup sequence: optional initialization, then an integrity check
    ///
    /// A store left empty (initialization disabled) passes the check. Any
    /// other content must be exactly one complete catalog, otherwise this
    /// returns [`StoreError::Corrupt`] and nothing is written.
    pub fn prepare(&mut self, initialize: bool) -> Result<usize, StoreError> {
        let created = if initialize {
            self.initialize_if_empty()?
        } else {
            0
        };
        if self.store.count()? > 0 {
            self.verify()?;
        }
        Ok(created)
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        self.store.count()
    }

    pub fn all_tiles(&self) -> Result<Vec<TileInstance>, StoreError> {
        self.store.find_all()
    }

    pub fn tiles_by_suit(&self, suit: Suit) -> Result<Vec<TileInstance>, StoreError> {
        self.store.find_by_suit(suit)
    }

    pub fn tiles_by_suit_and_value(
        &self,
        suit: Suit,
        value: u8,
    ) -> Result<Vec<TileInstance>, StoreError> {
        self.store.find_by_suit_and_value(suit, value)
    }

    pub fn tiles_grouped(&self) -> Result<BTreeMap<TileKind, Vec<TileInstance>>, StoreError> {
        Ok(query::group_by_suit_and_value(&self.store.find_all()?))
    }

    /// Check that the store holds exactly one complete catalog
    pub fn verify(&self) -> Result<(), StoreError> {
        let tiles = self.store.find_all()?;
        catalog::verify_catalog(&tiles).map_err(|e| StoreError::Corrupt(e.to_string()))
    }
}
