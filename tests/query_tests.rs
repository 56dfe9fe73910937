//! Query tests - filtering and grouping over the standard catalog

use std::collections::HashMap;

use mahjong_tiles::core::catalog::generate;
use mahjong_tiles::core::query::{
    by_suit, by_suit_and_value, count_by_suit, count_by_suit_and_value, group_by_suit_and_value,
};
use mahjong_tiles::types::{Suit, TileKind};

#[test]
fn test_documented_counts() {
    let tiles = generate();
    assert_eq!(count_by_suit_and_value(&tiles, Suit::Characters, 5), 4);
    assert_eq!(count_by_suit(&tiles, Suit::Honors), 28);
}

#[test]
fn test_by_suit_returns_only_that_suit() {
    let tiles = generate();
    let bamboos = by_suit(&tiles, Suit::Bamboos);
    assert_eq!(bamboos.len(), 36);
    assert!(bamboos.iter().all(|t| t.suit() == Suit::Bamboos));
    // Input order is kept.
    assert_eq!(bamboos[0].key().as_str(), "bamboos_1_0");
    assert_eq!(bamboos[35].key().as_str(), "bamboos_9_3");
}

#[test]
fn test_by_suit_and_value() {
    let tiles = generate();
    let east = by_suit_and_value(&tiles, Suit::Honors, 1);
    assert_eq!(east.len(), 4);
    assert!(east
        .iter()
        .all(|t| t.kind() == TileKind::new(Suit::Honors, 1)));
    assert_eq!(east[0].kind().honor_name(), Some("east"));
}

#[test]
fn test_out_of_range_honor_is_empty_not_error() {
    let tiles = generate();
    assert!(by_suit_and_value(&tiles, Suit::Honors, 8).is_empty());
    assert_eq!(count_by_suit_and_value(&tiles, Suit::Honors, 8), 0);
}

#[test]
fn test_grouping_completeness() {
    let tiles = generate();
    let groups = group_by_suit_and_value(&tiles);

    assert_eq!(groups.len(), 34);
    for (kind, bucket) in &groups {
        assert_eq!(bucket.len(), 4, "bucket {} should have 4 tiles", kind);
        assert!(bucket.iter().all(|t| t.kind() == *kind));
    }

    // Union of the buckets equals the input as a multiset.
    let mut expected: HashMap<&str, usize> = HashMap::new();
    for tile in &tiles {
        *expected.entry(tile.key().as_str()).or_insert(0) += 1;
    }
    let mut actual: HashMap<&str, usize> = HashMap::new();
    for tile in groups.values().flatten() {
        *actual.entry(tile.key().as_str()).or_insert(0) += 1;
    }
    assert_eq!(actual, expected);
    assert_eq!(groups.values().map(Vec::len).sum::<usize>(), 136);
}

#[test]
fn test_grouping_key_order() {
    let groups = group_by_suit_and_value(&generate());
    let kinds: Vec<TileKind> = groups.keys().copied().collect();
    assert_eq!(kinds.first(), Some(&TileKind::new(Suit::Characters, 1)));
    assert_eq!(kinds.last(), Some(&TileKind::new(Suit::Honors, 7)));
    assert_eq!(kinds[9], TileKind::new(Suit::Circles, 1));
}

#[test]
fn test_queries_do_not_mutate_input() {
    let tiles = generate();
    let before = tiles.clone();
    let _ = by_suit(&tiles, Suit::Circles);
    let _ = group_by_suit_and_value(&tiles);
    assert_eq!(tiles, before);
}
