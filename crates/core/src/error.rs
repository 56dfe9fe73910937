use thiserror::Error;

/// Failure raised by a storage collaborator
///
/// Catalog and query operations never fail; only the store behind them can.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored tiles are corrupt: {0}")]
    Corrupt(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
