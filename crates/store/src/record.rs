//! Serialized tile record

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{IdentityKey, Suit, TileInstance, TileKind};

/// One tile as written to disk and sent over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    pub suit: String,
    pub value: u8,
    pub identity_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("unknown suit {0:?}")]
    UnknownSuit(String),
}

impl From<&TileInstance> for TileRecord {
    fn from(tile: &TileInstance) -> Self {
        Self {
            suit: tile.suit().as_str().to_string(),
            value: tile.value(),
            identity_key: tile.key().as_str().to_string(),
        }
    }
}

impl TryFrom<TileRecord> for TileInstance {
    type Error = RecordError;

    fn try_from(record: TileRecord) -> Result<Self, Self::Error> {
        let suit = Suit::from_str(&record.suit).ok_or(RecordError::UnknownSuit(record.suit))?;
        Ok(TileInstance::new(
            TileKind::new(suit, record.value),
            IdentityKey::from(record.identity_key),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uses_lowercase_suit_token() {
        let kind = TileKind::new(Suit::Honors, 5);
        let tile = TileInstance::new(kind, IdentityKey::for_copy(kind, 2));
        let json = serde_json::to_string(&TileRecord::from(&tile)).unwrap();
        assert_eq!(
            json,
            r#"{"suit":"honors","value":5,"identity_key":"honors_5_2"}"#
        );
    }

    #[test]
    fn record_accepts_transliterated_suit() {
        let record = TileRecord {
            suit: "WAN".to_string(),
            value: 3,
            identity_key: "wan_3_1700000000000_42".to_string(),
        };
        let tile = TileInstance::try_from(record).unwrap();
        assert_eq!(tile.kind(), TileKind::new(Suit::Characters, 3));
        assert_eq!(tile.key().as_str(), "wan_3_1700000000000_42");
    }

    #[test]
    fn record_rejects_unknown_suit() {
        let record = TileRecord {
            suit: "flowers".to_string(),
            value: 1,
            identity_key: "flowers_1_0".to_string(),
        };
        assert_eq!(
            TileInstance::try_from(record),
            Err(RecordError::UnknownSuit("flowers".to_string()))
        );
    }
}
