//! Adapter module - tile lookups over a TCP socket with a JSON protocol
//!
//! This crate exposes the tile service to external clients. It is a thin
//! pass-through: every request maps onto one [`TileService`] call and no tile
//! logic lives here.
//!
//! # Protocol Overview
//!
//! The adapter implements a **line-delimited JSON protocol** over TCP:
//!
//! 1. **Connection**: Client connects to TCP socket (default: 127.0.0.1:7878)
//! 2. **Request**: Client sends one JSON object per line
//! 3. **Response**: Server answers each line with exactly one JSON line, in order
//!
//! # Message Types
//!
//! ## Client → Server
//!
//! - **list_tiles**: all stored tiles
//! - **tiles_by_suit**: tiles of one suit (`suit`)
//! - **tiles_by_suit_and_value**: tiles of one kind (`suit`, `value`)
//! - **initialize**: generate and persist the 136-tile catalog if the store is empty
//!
//! ## Server → Client
//!
//! - **tiles**: `count` plus an array of `{suit, value, identity_key}` records
//! - **initialized**: tiles `created` by this request and `total` afterwards
//! - **error**: `code` (`invalid_request`, `unknown_suit`, `storage_error`) and message
//!
//! Suit tokens are case-insensitive and accept both `characters`/`circles`/
//! `bamboos`/`honors` and `wan`/`tong`/`tiao`/`zi`.
//!
//! # Environment Variables
//!
//! - `MAHJONG_TILES_HOST`: Bind address (default: "127.0.0.1")
//! - `MAHJONG_TILES_PORT`: Port number (default: 7878)
//! - `MAHJONG_TILES_STORE_PATH`: JSON snapshot file (default: in-memory store)
//! - `MAHJONG_TILES_INIT_ON_START`: Set to "0" or "false" to skip startup initialization
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"initialize","seq":1}
//! Server -> Client: {"type":"initialized","seq":1,"ts":1700000000000,"created":0,"total":136,"message":"already initialized with 136 tiles"}
//! Client -> Server: {"type":"tiles_by_suit_and_value","seq":2,"suit":"honors","value":5}
//! Server -> Client: {"type":"tiles","seq":2,"ts":1700000000001,"count":4,"tiles":[{"suit":"honors","value":5,"identity_key":"honors_5_0"},...]}
//! Client -> Server: {"type":"tiles_by_suit","seq":3,"suit":"flowers"}
//! Server -> Client: {"type":"error","seq":3,"ts":1700000000002,"code":"unknown_suit","message":"unknown suit \"flowers\""}
//! ```
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"type":"list_tiles","seq":1}
//! ```

pub mod protocol;
pub mod server;

pub use mahjong_tiles_core as core;
pub use mahjong_tiles_store as store;
pub use mahjong_tiles_types as types;

pub use crate::core::TileService;

// Re-export protocol types for convenience
pub use protocol::*;
pub use server::*;
