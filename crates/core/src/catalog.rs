//! Catalog module - canonical 136-tile generation
//!
//! Produces the standard tile multiset: every numeric suit 1-9 and the honor
//! suit 1-7, four copies each. Order is suit-major, then value ascending, then
//! copy index, so the output is stable across calls.

use std::collections::{HashMap, HashSet};

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::types::{
    IdentityKey, Suit, TileInstance, TileKind, COPIES_PER_KIND, KIND_COUNT, NUMERIC_MAX_VALUE,
    TOTAL_TILES,
};

/// Standard kinds of one suit in value order
pub fn kinds_of_suit(suit: Suit) -> ArrayVec<TileKind, { NUMERIC_MAX_VALUE as usize }> {
    (1..=suit.max_value())
        .map(|value| TileKind::new(suit, value))
        .collect()
}

/// All 34 standard kinds in catalog order
pub fn standard_kinds() -> Vec<TileKind> {
    let mut kinds = Vec::with_capacity(KIND_COUNT);
    for suit in Suit::ALL {
        kinds.extend(kinds_of_suit(suit));
    }
    kinds
}

/// Generate the full 136-tile catalog
pub fn generate() -> Vec<TileInstance> {
    let mut tiles = Vec::with_capacity(TOTAL_TILES);
    for kind in standard_kinds() {
        for copy in 0..COPIES_PER_KIND {
            tiles.push(TileInstance::new(kind, IdentityKey::for_copy(kind, copy)));
        }
    }
    tiles
}

/// Catalog to persist when a store currently holds `existing_count` tiles
///
/// Returns `None` for a non-empty store so callers can run this unconditionally.
pub fn ensure_initialized(existing_count: usize) -> Option<Vec<TileInstance>> {
    if existing_count == 0 {
        Some(generate())
    } else {
        None
    }
}

/// First way a collection fails to be a complete standard catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogViolation {
    #[error("expected {expected} tiles, found {found}")]
    WrongTotal { expected: usize, found: usize },
    #[error("tile {key} has non-standard kind {kind}")]
    NonStandardKind { kind: TileKind, key: IdentityKey },
    #[error("kind {kind} has {found} copies, expected {expected}")]
    WrongCopyCount {
        kind: TileKind,
        expected: usize,
        found: usize,
    },
    #[error("identity key {0} appears more than once")]
    DuplicateKey(IdentityKey),
}

/// Check the multiset invariant of a loaded collection
pub fn verify_catalog(tiles: &[TileInstance]) -> Result<(), CatalogViolation> {
    if tiles.len() != TOTAL_TILES {
        return Err(CatalogViolation::WrongTotal {
            expected: TOTAL_TILES,
            found: tiles.len(),
        });
    }

    let mut copies: HashMap<TileKind, usize> = HashMap::with_capacity(KIND_COUNT);
    let mut keys: HashSet<&IdentityKey> = HashSet::with_capacity(TOTAL_TILES);
    for tile in tiles {
        if !tile.kind().is_standard() {
            return Err(CatalogViolation::NonStandardKind {
                kind: tile.kind(),
                key: tile.key().clone(),
            });
        }
        if !keys.insert(tile.key()) {
            return Err(CatalogViolation::DuplicateKey(tile.key().clone()));
        }
        *copies.entry(tile.kind()).or_insert(0) += 1;
    }

    // Total is right and every kind is standard, so a miscount shows up as a
    // kind with the wrong number of copies.
    for kind in standard_kinds() {
        let found = copies.get(&kind).copied().unwrap_or(0);
        if found != COPIES_PER_KIND {
            return Err(CatalogViolation::WrongCopyCount {
                kind,
                expected: COPIES_PER_KIND,
                found,
            });
        }
    }

    Ok(())
}
