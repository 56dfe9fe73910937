//! Core types module - shared data structures and constants
//!
//! This module defines the tile model used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (catalog generation, storage, network protocol).
//!
//! # Tile Set Composition
//!
//! A standard four-player set without flowers:
//!
//! | Suit | Values | Kinds | Tiles |
//! |------|--------|-------|-------|
//! | Characters | 1-9 | 9 | 36 |
//! | Circles | 1-9 | 9 | 36 |
//! | Bamboos | 1-9 | 9 | 36 |
//! | Honors | 1-7 | 7 | 28 |
//! | **Total** | | **34** | **136** |
//!
//! Honor values 1-4 are the winds (east, south, west, north) and 5-7 the
//! dragons (red, green, white).
//!
//! # Kind vs. Instance
//!
//! [`TileKind`] is the value type: two tiles are the same kind iff suit and
//! value match. [`TileInstance`] adds an [`IdentityKey`] that addresses one
//! physical tile in storage. The key never takes part in kind comparison.
//!
//! # Examples
//!
//! ```
//! use mahjong_tiles_types::{IdentityKey, Suit, TileInstance, TileKind, TOTAL_TILES};
//!
//! // Parse from string (case-insensitive)
//! let suit = Suit::from_str("Honors").unwrap();
//! assert_eq!(suit, Suit::Honors);
//! assert_eq!(Suit::from_str("wan"), Some(Suit::Characters));
//!
//! // Two physical copies of the same kind
//! let kind = TileKind::new(Suit::Characters, 5);
//! let a = TileInstance::new(kind, IdentityKey::for_copy(kind, 0));
//! let b = TileInstance::new(kind, IdentityKey::for_copy(kind, 1));
//! assert!(a.same_kind(&b));
//! assert_ne!(a.key(), b.key());
//!
//! assert_eq!(TOTAL_TILES, 136);
//! ```

use std::fmt;

/// Physical copies of every tile kind (4)
pub const COPIES_PER_KIND: usize = 4;

/// Highest value of the numeric suits (1-9)
pub const NUMERIC_MAX_VALUE: u8 = 9;

/// Highest value of the honor suit (1-7)
pub const HONOR_MAX_VALUE: u8 = 7;

/// Distinct tile kinds in a standard set (9 + 9 + 9 + 7)
pub const KIND_COUNT: usize = 34;

/// Tiles in a complete standard set (34 kinds x 4 copies)
pub const TOTAL_TILES: usize = KIND_COUNT * COPIES_PER_KIND;

/// Honor names indexed by `value - 1`
const HONOR_NAMES: [&str; 7] = ["east", "south", "west", "north", "red", "green", "white"];


/// The four tile suits
///
/// - **Characters**: numeric suit 1-9 (wan)
/// - **Circles**: numeric suit 1-9 (tong)
/// - **Bamboos**: numeric suit 1-9 (tiao)
/// - **Honors**: winds and dragons 1-7 (zi)
///
/// Declaration order is the catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Characters,
    Circles,
    Bamboos,
    Honors,
}

impl Suit {
    /// All suits in catalog order
    pub const ALL: [Suit; 4] = [Suit::Characters, Suit::Circles, Suit::Bamboos, Suit::Honors];

    /// Parse suit from string (case-insensitive)
    ///
    /// Accepts the English names and the transliterated names:
    /// "characters" | "wan", "circles" | "tong", "bamboos" | "tiao", "honors" | "zi"
    ///
    /// # Examples
    ///
    /// ```
    /// use mahjong_tiles_types::Suit;
    ///
    /// assert_eq!(Suit::from_str("characters"), Some(Suit::Characters));
    /// assert_eq!(Suit::from_str("TONG"), Some(Suit::Circles));
    /// assert_eq!(Suit::from_str("tiao"), Some(Suit::Bamboos));
    /// assert_eq!(Suit::from_str("flowers"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "characters" | "wan" => Some(Suit::Characters),
            "circles" | "tong" => Some(Suit::Circles),
            "bamboos" | "tiao" => Some(Suit::Bamboos),
            "honors" | "zi" => Some(Suit::Honors),
            _ => None,
        }
    }

    /// Convert to lowercase wire token
    ///
    /// # Examples
    ///
    /// ```
    /// use mahjong_tiles_types::Suit;
    ///
    /// assert_eq!(Suit::Characters.as_str(), "characters");
    /// assert_eq!(Suit::Honors.as_str(), "honors");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Suit::Characters => "characters",
            Suit::Circles => "circles",
            Suit::Bamboos => "bamboos",
            Suit::Honors => "honors",
        }
    }

    /// Highest valid value in this suit (9 for numeric suits, 7 for honors)
    pub fn max_value(&self) -> u8 {
        match self {
            Suit::Honors => HONOR_MAX_VALUE,
            _ => NUMERIC_MAX_VALUE,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Suit::Honors)
    }

    /// Single-letter notation suffix for numeric suits
    fn letter(&self) -> Option<char> {
        match self {
            Suit::Characters => Some('m'),
            Suit::Circles => Some('p'),
            Suit::Bamboos => Some('s'),
            Suit::Honors => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tile kind: the equivalence class of tiles sharing `(suit, value)`
///
/// Construction does not validate the value; queries accept any value and
/// simply match nothing when it is out of range. Use [`TileKind::is_standard`]
/// to check membership in the standard set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileKind {
    pub suit: Suit,
    pub value: u8,
}

impl TileKind {
    pub const fn new(suit: Suit, value: u8) -> Self {
        Self { suit, value }
    }

    /// Whether this kind belongs to the standard 34-kind set
    ///
    /// # Examples
    ///
    /// ```
    /// use mahjong_tiles_types::{Suit, TileKind};
    ///
    /// assert!(TileKind::new(Suit::Circles, 9).is_standard());
    /// assert!(!TileKind::new(Suit::Honors, 8).is_standard());
    /// assert!(!TileKind::new(Suit::Bamboos, 0).is_standard());
    /// ```
    pub fn is_standard(&self) -> bool {
        (1..=self.suit.max_value()).contains(&self.value)
    }

    /// Wind or dragon name of a standard honor kind
    ///
    /// Returns `None` for numeric suits and out-of-range values.
    pub fn honor_name(&self) -> Option<&'static str> {
        if self.suit != Suit::Honors || !self.is_standard() {
            return None;
        }
        HONOR_NAMES.get(self.value as usize - 1).copied()
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.honor_name() {
            return f.write_str(name);
        }
        match self.suit.letter() {
            Some(letter) if self.is_standard() => write!(f, "{}{}", self.value, letter),
            _ => write!(f, "{}:{}", self.suit.as_str(), self.value),
        }
    }
}

/// Storage identity of one physical tile
///
/// Opaque to every classification rule. Keys produced by
/// [`IdentityKey::for_copy`] have the form `<suit>_<value>_<copy>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Key for the `copy`-th physical tile of `kind`
    ///
    /// # Examples
    ///
    /// ```
    /// use mahjong_tiles_types::{IdentityKey, Suit, TileKind};
    ///
    /// let key = IdentityKey::for_copy(TileKind::new(Suit::Characters, 1), 2);
    /// assert_eq!(key.as_str(), "characters_1_2");
    /// ```
    pub fn for_copy(kind: TileKind, copy: usize) -> Self {
        Self(format!("{}_{}_{}", kind.suit.as_str(), kind.value, copy))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for IdentityKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One physical tile: a kind plus the key a store addresses it by
///
/// `==` and `Hash` are entity identity: they compare the kind **and** the
/// key, so the four copies of `5m` are four distinct values and a
/// `HashSet<TileInstance>` of a full set holds 136 entries, not 34. This is
/// not the mahjong notion of "same tile". For that, use
/// [`TileInstance::same_kind`] or key collections by [`TileInstance::kind`].
///
/// ```
/// use std::collections::HashSet;
/// use mahjong_tiles_types::{IdentityKey, Suit, TileInstance, TileKind};
///
/// let kind = TileKind::new(Suit::Circles, 5);
/// let a = TileInstance::new(kind, IdentityKey::for_copy(kind, 0));
/// let b = TileInstance::new(kind, IdentityKey::for_copy(kind, 1));
///
/// assert!(a != b && a.same_kind(&b));
/// let kinds: HashSet<TileKind> = [&a, &b].iter().map(|t| t.kind()).collect();
/// assert_eq!(kinds.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileInstance {
    kind: TileKind,
    key: IdentityKey,
}

impl TileInstance {
    pub fn new(kind: TileKind, key: IdentityKey) -> Self {
        Self { kind, key }
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn suit(&self) -> Suit {
        self.kind.suit
    }

    pub fn value(&self) -> u8 {
        self.kind.value
    }

    pub fn key(&self) -> &IdentityKey {
        &self.key
    }

    /// Same suit and value, regardless of identity
    pub fn same_kind(&self, other: &TileInstance) -> bool {
        self.kind == other.kind
    }
}
