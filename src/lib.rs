//! Mahjong tiles (workspace facade crate).
//!
//! Re-exports the member crates as `mahjong_tiles::{types,core,store,adapter}`
//! while the implementation lives in dedicated crates under `crates/`.

pub use mahjong_tiles_adapter as adapter;
pub use mahjong_tiles_core as core;
pub use mahjong_tiles_store as store;
pub use mahjong_tiles_types as types;
