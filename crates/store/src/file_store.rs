//! JSON snapshot file store

use std::fs;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::core::{query, StoreError, TileStore};
use crate::record::TileRecord;
use crate::types::{Suit, TileInstance};

/// Tile store persisted as a JSON array of [`TileRecord`]s
///
/// The whole set is held in memory and reads are served from it; every
/// `save_all` rewrites the snapshot.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    tiles: Vec<TileInstance>,
}

impl JsonFileStore {
    /// Open the snapshot at `path`, starting empty if it does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tiles = match fs::File::open(&path) {
            Ok(file) => load(BufReader::new(file))?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(StoreError::Io(e)),
        };
        log::info!("opened tile store {} ({} tiles)", path.display(), tiles.len());
        Ok(Self { path, tiles })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path the snapshot is staged at: `<path>.tmp`
    fn staging_path(&self) -> PathBuf {
        let mut staged = self.path.clone().into_os_string();
        staged.push(".tmp");
        PathBuf::from(staged)
    }

    fn write_snapshot(&self) -> Result<(), StoreError> {
        let tmp = self.staging_path();
        let result = self
            .write_staged(&tmp)
            .and_then(|()| fs::rename(&tmp, &self.path).map_err(StoreError::from));
        match result {
            Ok(()) => {
                log::debug!("wrote {} tiles to {}", self.tiles.len(), self.path.display());
                Ok(())
            }
            Err(e) => {
                if let Err(cleanup) = fs::remove_file(&tmp) {
                    if cleanup.kind() != ErrorKind::NotFound {
                        log::warn!("could not remove {}: {}", tmp.display(), cleanup);
                    }
                }
                Err(e)
            }
        }
    }

    /// Write and fsync the snapshot at `tmp`
    fn write_staged(&self, tmp: &Path) -> Result<(), StoreError> {
        let mut writer = BufWriter::new(fs::File::create(tmp)?);
        let records: Vec<TileRecord> = self.tiles.iter().map(TileRecord::from).collect();
        serde_json::to_writer(&mut writer, &records)
            .map_err(|e| StoreError::Corrupt(format!("failed to encode snapshot: {e}")))?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    }
}

fn load<R: std::io::Read>(reader: R) -> Result<Vec<TileInstance>, StoreError> {
    let records: Vec<TileRecord> = serde_json::from_reader(reader)
        .map_err(|e| StoreError::Corrupt(format!("malformed snapshot: {e}")))?;
    records
        .into_iter()
        .map(|r| TileInstance::try_from(r).map_err(|e| StoreError::Corrupt(e.to_string())))
        .collect()
}

impl TileStore for JsonFileStore {
    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.tiles.len())
    }

    fn save_all(&mut self, tiles: Vec<TileInstance>) -> Result<(), StoreError> {
        let previous_len = self.tiles.len();
        self.tiles.extend(tiles);
        if let Err(e) = self.write_snapshot() {
            self.tiles.truncate(previous_len);
            log::error!("tile store write failed: {}", e);
            return Err(e);
        }
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<TileInstance>, StoreError> {
        Ok(self.tiles.clone())
    }

    fn find_by_suit(&self, suit: Suit) -> Result<Vec<TileInstance>, StoreError> {
        Ok(query::by_suit(&self.tiles, suit))
    }

    fn find_by_suit_and_value(&self, suit: Suit, value: u8) -> Result<Vec<TileInstance>, StoreError> {
        Ok(query::by_suit_and_value(&self.tiles, suit, value))
    }
}
