//! Protocol module - JSON message types for the tile adapter
//!
//! Line-delimited JSON. Requests carry `type` and `seq`; every response also
//! carries `ts` (timestamp in ms) and echoes the request's `seq`.

use serde::{Deserialize, Serialize};

use crate::store::TileRecord;
use crate::types::TileInstance;

// ============== Client -> Server Messages ==============

/// `list_tiles`: every stored tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTilesRequest {
    pub seq: u64,
}

/// `tiles_by_suit`: tiles of one suit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TilesBySuitRequest {
    pub seq: u64,
    pub suit: String,
}

/// `tiles_by_suit_and_value`: tiles of one kind
///
/// `value` is any JSON integer, including ones beyond the 64-bit range;
/// values that do not fit a tile value match nothing rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TilesBySuitAndValueRequest {
    pub seq: u64,
    pub suit: String,
    pub value: serde_json::Number,
}

impl TilesBySuitAndValueRequest {
    pub fn requested_value(&self) -> RequestedValue {
        RequestedValue::from_number(&self.value)
    }
}

/// How a request's numeric `value` maps onto tile values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestedValue {
    /// Fits a tile value (it may still be outside the suit's range)
    Tile(u8),
    /// An integer no tile can carry
    OutOfRange,
    /// Has a fractional part, or is not finite
    NotInteger,
}

impl RequestedValue {
    /// Classify a JSON number
    ///
    /// Integers past the 64-bit range arrive as floats; an integral float
    /// counts as an integer, matching JSON Schema's `integer`.
    pub fn from_number(n: &serde_json::Number) -> Self {
        if let Some(u) = n.as_u64() {
            return u8::try_from(u).map_or(RequestedValue::OutOfRange, RequestedValue::Tile);
        }
        if n.as_i64().is_some() {
            // Only negatives miss `as_u64`.
            return RequestedValue::OutOfRange;
        }
        match n.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 => {
                if (0.0..=f64::from(u8::MAX)).contains(&f) {
                    RequestedValue::Tile(f as u8)
                } else {
                    RequestedValue::OutOfRange
                }
            }
            _ => RequestedValue::NotInteger,
        }
    }
}

/// `initialize`: generate and persist the catalog if the store is empty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeRequest {
    pub seq: u64,
}

// ============== Server -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TilesType {
    #[serde(rename = "tiles")]
    Tiles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InitializedType {
    #[serde(rename = "initialized")]
    Initialized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Malformed JSON, missing fields or unknown message type
    #[serde(rename = "invalid_request")]
    InvalidRequest,
    /// Suit token is not one of the four suits
    #[serde(rename = "unknown_suit")]
    UnknownSuit,
    /// The store failed
    #[serde(rename = "storage_error")]
    StorageError,
}

impl ErrorCode {
    /// Whether the client is at fault (as opposed to the server)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ErrorCode::StorageError)
    }
}

/// Tile list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TilesMessage {
    #[serde(rename = "type")]
    pub msg_type: TilesType,
    pub seq: u64,
    pub ts: u64,
    pub count: usize,
    pub tiles: Vec<TileRecord>,
}

/// Initialization result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializedMessage {
    #[serde(rename = "type")]
    pub msg_type: InitializedType,
    pub seq: u64,
    pub ts: u64,
    /// Tiles created by this request (0 when the store was already populated)
    pub created: usize,
    /// Tiles in the store afterwards
    pub total: usize,
    pub message: String,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// Any server -> client message
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Tiles(TilesMessage),
    Initialized(InitializedMessage),
    Error(ErrorMessage),
}

impl Response {
    pub fn seq(&self) -> u64 {
        match self {
            Response::Tiles(m) => m.seq,
            Response::Initialized(m) => m.seq,
            Response::Error(m) => m.seq,
        }
    }
}

// ============== Parsing ==============

#[derive(Debug, Clone)]
pub enum ParsedMessage {
    ListTiles(ListTilesRequest),
    TilesBySuit(TilesBySuitRequest),
    TilesBySuitAndValue(TilesBySuitAndValueRequest),
    Initialize(InitializeRequest),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
    pub msg_type: String,
}

const KNOWN_TYPES: [&str; 4] = [
    "list_tiles",
    "tiles_by_suit",
    "tiles_by_suit_and_value",
    "initialize",
];

/// Parse a request line
///
/// An unrecognized `type` is not a parse error; it yields
/// [`ParsedMessage::Unknown`] so the caller can answer with the right `seq`.
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "list_tiles")]
        ListTiles(ListTilesRequest),
        #[serde(rename = "tiles_by_suit")]
        TilesBySuit(TilesBySuitRequest),
        #[serde(rename = "tiles_by_suit_and_value")]
        TilesBySuitAndValue(TilesBySuitAndValueRequest),
        #[serde(rename = "initialize")]
        Initialize(InitializeRequest),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::ListTiles(m)) => Ok(ParsedMessage::ListTiles(m)),
        Ok(InboundMessage::TilesBySuit(m)) => Ok(ParsedMessage::TilesBySuit(m)),
        Ok(InboundMessage::TilesBySuitAndValue(m)) => Ok(ParsedMessage::TilesBySuitAndValue(m)),
        Ok(InboundMessage::Initialize(m)) => Ok(ParsedMessage::Initialize(m)),
        Err(e) => {
            #[derive(Debug, Deserialize)]
            struct Envelope {
                #[serde(rename = "type")]
                msg_type: Option<String>,
                seq: Option<u64>,
            }
            let envelope = serde_json::from_str::<Envelope>(json)?;
            let msg_type = envelope.msg_type.unwrap_or_default();
            if !KNOWN_TYPES.contains(&msg_type.as_str()) {
                return Ok(ParsedMessage::Unknown(UnknownMessage {
                    seq: envelope.seq.unwrap_or(0),
                    msg_type,
                }));
            }
            Err(e)
        }
    }
}

/// Pull `seq` out of a line that failed to parse, if it is there at all
pub fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let after_key = &s[start + 5..];
    let colon = after_key.find(':')?;
    let rest = after_key[colon + 1..].trim_start();
    let end = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u64>().ok()
}

// ============== Utility Functions ==============

/// Create a tile list response
pub fn create_tiles(seq: u64, tiles: &[TileInstance]) -> TilesMessage {
    TilesMessage {
        msg_type: TilesType::Tiles,
        seq,
        ts: current_timestamp_ms(),
        count: tiles.len(),
        tiles: tiles.iter().map(TileRecord::from).collect(),
    }
}

/// Create an initialization result
pub fn create_initialized(seq: u64, created: usize, total: usize) -> InitializedMessage {
    let message = if created > 0 {
        format!("created {} tiles", created)
    } else {
        format!("already initialized with {} tiles", total)
    };
    InitializedMessage {
        msg_type: InitializedType::Initialized,
        seq,
        ts: current_timestamp_ms(),
        created,
        total,
        message,
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
