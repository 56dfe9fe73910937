//! Persistent tile storage
//!
//! Implements [`TileStore`](mahjong_tiles_core::TileStore) over a JSON snapshot
//! file and defines [`TileRecord`], the serialized shape of a tile shared with
//! the network protocol.
//!
//! # File Format
//!
//! A single JSON array of records, in insertion order:
//!
//! ```text
//! [
//!   {"suit":"characters","value":1,"identity_key":"characters_1_0"},
//!   {"suit":"characters","value":1,"identity_key":"characters_1_1"},
//!   ...
//! ]
//! ```
//!
//! Writes go to a sibling `<path>.tmp` file, which is fsynced and then renamed
//! over the target, so a crash mid-write leaves the previous snapshot intact.
//! A failed write removes the staging file.

pub mod file_store;
pub mod record;

pub use mahjong_tiles_core as core;
pub use mahjong_tiles_types as types;

pub use file_store::JsonFileStore;
pub use record::{RecordError, TileRecord};
