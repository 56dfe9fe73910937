//! Query module - read-only lookups over a tile collection
//!
//! Every function is total over its input: a query that matches nothing
//! returns an empty vector or zero, and values outside the standard ranges are
//! not rejected. Input order is preserved in every result.

use std::collections::BTreeMap;

use crate::types::{Suit, TileInstance, TileKind};

/// Tiles of one suit
pub fn by_suit(tiles: &[TileInstance], suit: Suit) -> Vec<TileInstance> {
    tiles.iter().filter(|t| t.suit() == suit).cloned().collect()
}

/// Tiles of one kind
pub fn by_suit_and_value(tiles: &[TileInstance], suit: Suit, value: u8) -> Vec<TileInstance> {
    let kind = TileKind::new(suit, value);
    tiles.iter().filter(|t| t.kind() == kind).cloned().collect()
}

pub fn count_by_suit(tiles: &[TileInstance], suit: Suit) -> usize {
    tiles.iter().filter(|t| t.suit() == suit).count()
}

pub fn count_by_suit_and_value(tiles: &[TileInstance], suit: Suit, value: u8) -> usize {
    let kind = TileKind::new(suit, value);
    tiles.iter().filter(|t| t.kind() == kind).count()
}

/// Partition tiles into buckets keyed by kind
///
/// Buckets iterate in kind order (suit, then value).
pub fn group_by_suit_and_value(tiles: &[TileInstance]) -> BTreeMap<TileKind, Vec<TileInstance>> {
    let mut groups: BTreeMap<TileKind, Vec<TileInstance>> = BTreeMap::new();
    for tile in tiles {
        groups.entry(tile.kind()).or_default().push(tile.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::generate;
    use crate::types::IdentityKey;

    fn tile(suit: Suit, value: u8, copy: usize) -> TileInstance {
        let kind = TileKind::new(suit, value);
        TileInstance::new(kind, IdentityKey::for_copy(kind, copy))
    }

    #[test]
    fn by_suit_preserves_input_order() {
        let tiles = vec![
            tile(Suit::Honors, 3, 0),
            tile(Suit::Circles, 1, 0),
            tile(Suit::Honors, 1, 0),
            tile(Suit::Honors, 3, 1),
        ];
        let honors = by_suit(&tiles, Suit::Honors);
        let keys: Vec<&str> = honors.iter().map(|t| t.key().as_str()).collect();
        assert_eq!(keys, vec!["honors_3_0", "honors_1_0", "honors_3_1"]);
    }

    #[test]
    fn empty_input_yields_empty_results() {
        assert!(by_suit(&[], Suit::Bamboos).is_empty());
        assert!(by_suit_and_value(&[], Suit::Bamboos, 1).is_empty());
        assert_eq!(count_by_suit(&[], Suit::Bamboos), 0);
        assert!(group_by_suit_and_value(&[]).is_empty());
    }

    #[test]
    fn out_of_range_values_match_nothing() {
        let tiles = generate();
        assert!(by_suit_and_value(&tiles, Suit::Honors, 8).is_empty());
        assert!(by_suit_and_value(&tiles, Suit::Characters, 0).is_empty());
        assert_eq!(count_by_suit_and_value(&tiles, Suit::Bamboos, 255), 0);
    }

    #[test]
    fn grouping_keeps_non_standard_kinds() {
        let tiles = vec![tile(Suit::Honors, 9, 0), tile(Suit::Honors, 9, 1)];
        let groups = group_by_suit_and_value(&tiles);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[&TileKind::new(Suit::Honors, 9)].len(), 2);
    }
}
