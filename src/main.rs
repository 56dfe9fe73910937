//! Tile server (default binary).
//!
//! Opens the configured store, initializes the catalog if requested and serves
//! the JSON line protocol until killed. A store holding anything other than
//! one complete catalog stops startup with an error. Configuration comes from the
//! `MAHJONG_TILES_*` environment variables, log filtering from `RUST_LOG`.

use anyhow::{Context, Result};

use mahjong_tiles::adapter::{check_tcp_listen_available, run_server, ServerConfig};
use mahjong_tiles::core::{InMemoryStore, TileService, TileStore};
use mahjong_tiles::store::JsonFileStore;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();
    check_tcp_listen_available(&config.host, config.port)
        .with_context(|| format!("cannot listen on {}:{}", config.host, config.port))?;

    let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
    match config.store_path.clone() {
        Some(path) => {
            let store = JsonFileStore::open(&path)
                .with_context(|| format!("failed to open tile store {}", path.display()))?;
            rt.block_on(serve(config, store))
        }
        None => {
            log::warn!("MAHJONG_TILES_STORE_PATH not set, tiles will not be persisted");
            rt.block_on(serve(config, InMemoryStore::new()))
        }
    }
}

async fn serve<S>(config: ServerConfig, store: S) -> Result<()>
where
    S: TileStore + Send + Sync + 'static,
{
    let mut service = TileService::new(store);
    let created = service
        .prepare(config.init_on_start)
        .context("stored tile catalog is unusable")?;
    if created == 0 {
        log::info!("serving existing tile catalog ({} tiles)", service.count()?);
    }
    run_server(config, service, None).await
}
