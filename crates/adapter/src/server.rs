//! TCP server for the tile adapter
//!
//! Handles incoming connections and answers one response line per request line.
//! Uses tokio for async networking.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, RwLock};

use crate::core::{StoreError, TileService, TileStore};
use crate::protocol::*;
use crate::types::Suit;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Snapshot file for the JSON store; in-memory when `None`
    pub store_path: Option<PathBuf>,
    /// Run `initialize_if_empty` before accepting clients
    pub init_on_start: bool,
    /// Longest accepted request line in bytes, newline excluded
    pub max_line_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            store_path: None,
            init_on_start: true,
            max_line_bytes: 64 * 1024,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    ///
    /// - `MAHJONG_TILES_HOST`: bind address (default "127.0.0.1")
    /// - `MAHJONG_TILES_PORT`: port (default 7878)
    /// - `MAHJONG_TILES_STORE_PATH`: JSON snapshot path (default: in-memory)
    /// - `MAHJONG_TILES_INIT_ON_START`: "0" or "false" to skip startup initialization
    /// - `MAHJONG_TILES_MAX_LINE_BYTES`: request line cap (default 65536)
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let host = env::var("MAHJONG_TILES_HOST").unwrap_or(defaults.host);
        let port = env::var("MAHJONG_TILES_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let store_path = env::var("MAHJONG_TILES_STORE_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        let init_on_start = env::var("MAHJONG_TILES_INIT_ON_START")
            .map(|v| !(v == "0" || v.eq_ignore_ascii_case("false")))
            .unwrap_or(defaults.init_on_start);

        let max_line_bytes = env::var("MAHJONG_TILES_MAX_LINE_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.max_line_bytes);

        Self {
            host,
            port,
            store_path,
            init_on_start,
            max_line_bytes,
        }
    }
}

/// Fail fast if `host:port` cannot be bound (e.g. already in use)
pub fn check_tcp_listen_available(host: &str, port: u16) -> std::io::Result<()> {
    std::net::TcpListener::bind((host, port)).map(|_| ())
}

/// Start the TCP server
///
/// Sends the bound address on `ready_tx` once listening (useful with port 0).
pub async fn run_server<S>(
    config: ServerConfig,
    service: TileService<S>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()>
where
    S: TileStore + Send + Sync + 'static,
{
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    let bound = listener.local_addr()?;
    log::info!("tile server listening on {}", bound);
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let service = Arc::new(RwLock::new(service));
    let max_line_bytes = config.max_line_bytes;
    let mut client_id_counter = 0usize;

    // Accept incoming connections
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;

        log::info!("client {} connected from {}", client_id, addr);

        let service = Arc::clone(&service);
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, service, max_line_bytes).await {
                log::error!("client {} error: {}", client_id, e);
            }
            log::info!("client {} disconnected", client_id);
        });
    }
}

/// Handle a single client connection
async fn handle_client<S>(
    socket: TcpStream,
    client_id: usize,
    service: Arc<RwLock<TileService<S>>>,
    max_line_bytes: usize,
) -> anyhow::Result<()>
where
    S: TileStore + Send + Sync + 'static,
{
    let (reader, mut writer) = tokio::io::split(socket);
    let mut reader = BufReader::new(reader);

    let mut raw: Vec<u8> = Vec::with_capacity(4096);
    let mut buf: Vec<u8> = Vec::with_capacity(4096);

    loop {
        let response = match read_request_line(&mut reader, &mut raw, max_line_bytes).await? {
            LineRead::Closed => break,
            LineRead::Oversized => {
                log::warn!("client {} sent a line over {} bytes", client_id, max_line_bytes);
                let seq = extract_seq_best_effort(&String::from_utf8_lossy(&raw)).unwrap_or(0);
                Response::Error(create_error(
                    seq,
                    ErrorCode::InvalidRequest,
                    &format!("request line exceeds {} bytes", max_line_bytes),
                ))
            }
            LineRead::Line => match std::str::from_utf8(&raw) {
                Ok(text) => {
                    let trimmed = text.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    handle_line(&service, trimmed).await
                }
                Err(_) => Response::Error(create_error(
                    0,
                    ErrorCode::InvalidRequest,
                    "request line is not valid UTF-8",
                )),
            },
        };
        log::debug!("client {} seq {} answered", client_id, response.seq());
        write_response(&mut writer, &mut buf, &response).await?;
    }

    Ok(())
}

/// Result of reading one request line
#[derive(Debug, PartialEq, Eq)]
enum LineRead {
    /// `raw` holds a complete line (or the tail before EOF)
    Line,
    /// The line ran past the cap; `raw` holds its first bytes and the rest
    /// was discarded up to and including the newline
    Oversized,
    Closed,
}

/// Read one line into `raw` without buffering more than `max_line_bytes + 1`
async fn read_request_line<R>(
    reader: &mut R,
    raw: &mut Vec<u8>,
    max_line_bytes: usize,
) -> std::io::Result<LineRead>
where
    R: AsyncBufRead + Unpin,
{
    raw.clear();
    let limit = max_line_bytes as u64 + 1;
    let bytes_read = (&mut *reader).take(limit).read_until(b'\n', raw).await?;
    if bytes_read == 0 {
        return Ok(LineRead::Closed);
    }
    if raw.last() == Some(&b'\n') || raw.len() <= max_line_bytes {
        return Ok(LineRead::Line);
    }

    loop {
        let (consumed, found_newline) = {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                return Ok(LineRead::Oversized);
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(pos) => (pos + 1, true),
                None => (available.len(), false),
            }
        };
        reader.consume(consumed);
        if found_newline {
            return Ok(LineRead::Oversized);
        }
    }
}

async fn write_response<W>(
    writer: &mut W,
    buf: &mut Vec<u8>,
    response: &Response,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    buf.clear();
    serde_json::to_writer(&mut *buf, response)?;
    buf.push(b'\n');
    writer.write_all(&buf[..]).await?;
    writer.flush().await?;
    Ok(())
}

/// Parse one request line and produce its response
///
/// Reads share the lock. `initialize` takes it exclusively across the
/// count-check-save sequence so racing clients generate the catalog once, and
/// runs on the blocking pool since a persistent store writes to disk.
pub async fn handle_line<S>(service: &Arc<RwLock<TileService<S>>>, line: &str) -> Response
where
    S: TileStore + Send + Sync + 'static,
{
    let request = match parse_message(line) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("rejected malformed request: {}", e);
            let seq = extract_seq_best_effort(line).unwrap_or(0);
            return Response::Error(create_error(
                seq,
                ErrorCode::InvalidRequest,
                &format!("malformed request: {}", e),
            ));
        }
    };

    match request {
        ParsedMessage::Initialize(req) => {
            let mut guard = Arc::clone(service).write_owned().await;
            let seq = req.seq;
            let outcome =
                tokio::task::spawn_blocking(move || respond_initialize(&mut *guard, seq)).await;
            match outcome {
                Ok(response) => response,
                Err(e) => {
                    log::error!("initialize task for seq {} failed: {}", seq, e);
                    Response::Error(create_error(
                        seq,
                        ErrorCode::StorageError,
                        "initialization did not complete",
                    ))
                }
            }
        }
        other => {
            let service = service.read().await;
            respond_query(&service, other)
        }
    }
}

/// Answer an `initialize` request
pub fn respond_initialize<S: TileStore>(service: &mut TileService<S>, seq: u64) -> Response {
    let result = service
        .initialize_if_empty()
        .and_then(|created| service.count().map(|total| (created, total)));
    match result {
        Ok((created, total)) => Response::Initialized(create_initialized(seq, created, total)),
        Err(e) => storage_error(seq, e),
    }
}

/// Answer a read-only request
///
/// `Initialize` is never routed here by [`handle_line`]; it is answered as an
/// invalid request if it is.
pub fn respond_query<S: TileStore>(service: &TileService<S>, request: ParsedMessage) -> Response {
    match request {
        ParsedMessage::ListTiles(req) => tiles_response(req.seq, service.all_tiles()),
        ParsedMessage::TilesBySuit(req) => match parse_suit(req.seq, &req.suit) {
            Ok(suit) => tiles_response(req.seq, service.tiles_by_suit(suit)),
            Err(response) => response,
        },
        ParsedMessage::TilesBySuitAndValue(req) => match parse_suit(req.seq, &req.suit) {
            // Integers that cannot be a tile value simply match nothing.
            Ok(suit) => match req.requested_value() {
                RequestedValue::Tile(value) => {
                    tiles_response(req.seq, service.tiles_by_suit_and_value(suit, value))
                }
                RequestedValue::OutOfRange => tiles_response(req.seq, Ok(Vec::new())),
                RequestedValue::NotInteger => Response::Error(create_error(
                    req.seq,
                    ErrorCode::InvalidRequest,
                    &format!("value {} is not an integer", req.value),
                )),
            },
            Err(response) => response,
        },
        ParsedMessage::Initialize(req) => Response::Error(create_error(
            req.seq,
            ErrorCode::InvalidRequest,
            "initialize is not a read-only request",
        )),
        ParsedMessage::Unknown(msg) => {
            log::warn!("rejected unknown request type {:?}", msg.msg_type);
            Response::Error(create_error(
                msg.seq,
                ErrorCode::InvalidRequest,
                &format!("unknown request type {:?}", msg.msg_type),
            ))
        }
    }
}

fn parse_suit(seq: u64, token: &str) -> Result<Suit, Response> {
    Suit::from_str(token).ok_or_else(|| {
        log::warn!("rejected unknown suit {:?}", token);
        Response::Error(create_error(
            seq,
            ErrorCode::UnknownSuit,
            &format!("unknown suit {:?}", token),
        ))
    })
}

fn tiles_response(
    seq: u64,
    tiles: Result<Vec<crate::types::TileInstance>, StoreError>,
) -> Response {
    match tiles {
        Ok(tiles) => Response::Tiles(create_tiles(seq, &tiles)),
        Err(e) => storage_error(seq, e),
    }
}

fn storage_error(seq: u64, e: StoreError) -> Response {
    log::error!("storage failure answering seq {}: {}", seq, e);
    Response::Error(create_error(seq, ErrorCode::StorageError, &e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InMemoryStore;

    fn initialized() -> TileService<InMemoryStore> {
        let mut service = TileService::new(InMemoryStore::new());
        service.initialize_if_empty().unwrap();
        service
    }

    #[test]
    fn config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 7878);
        assert!(config.store_path.is_none());
        assert!(config.init_on_start);
        assert_eq!(config.max_line_bytes, 65536);
    }

    async fn read_all_lines(input: &[u8], max: usize) -> Vec<(LineRead, Vec<u8>)> {
        let mut reader = BufReader::with_capacity(8, input);
        let mut raw = Vec::new();
        let mut out = Vec::new();
        loop {
            let read = read_request_line(&mut reader, &mut raw, max).await.unwrap();
            if read == LineRead::Closed {
                return out;
            }
            out.push((read, raw.clone()));
        }
    }

    #[tokio::test]
    async fn line_reader_discards_oversized_line() {
        let input = b"short\n0123456789abcdef\nnext\ntail";
        let lines = read_all_lines(input, 10).await;
        assert_eq!(
            lines,
            vec![
                (LineRead::Line, b"short\n".to_vec()),
                (LineRead::Oversized, b"0123456789a".to_vec()),
                (LineRead::Line, b"next\n".to_vec()),
                (LineRead::Line, b"tail".to_vec()),
            ]
        );
    }

    #[tokio::test]
    async fn line_reader_accepts_line_at_cap() {
        let lines = read_all_lines(b"0123456789\n", 10).await;
        assert_eq!(lines, vec![(LineRead::Line, b"0123456789\n".to_vec())]);
    }

    #[test]
    fn fractional_value_is_invalid_request() {
        let service = initialized();
        let req = TilesBySuitAndValueRequest {
            seq: 6,
            suit: "circles".to_string(),
            value: serde_json::Number::from_f64(2.5).unwrap(),
        };
        match respond_query(&service, ParsedMessage::TilesBySuitAndValue(req)) {
            Response::Error(err) => assert_eq!(err.code, ErrorCode::InvalidRequest),
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn suit_query_accepts_transliterated_token() {
        let service = initialized();
        let req = TilesBySuitRequest {
            seq: 4,
            suit: "ZI".to_string(),
        };
        match respond_query(&service, ParsedMessage::TilesBySuit(req)) {
            Response::Tiles(msg) => {
                assert_eq!(msg.seq, 4);
                assert_eq!(msg.count, 28);
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn negative_value_yields_empty_tiles() {
        let service = initialized();
        let req = TilesBySuitAndValueRequest {
            seq: 5,
            suit: "characters".to_string(),
            value: serde_json::Number::from(-1),
        };
        match respond_query(&service, ParsedMessage::TilesBySuitAndValue(req)) {
            Response::Tiles(msg) => assert_eq!(msg.count, 0),
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn initialize_reports_created_then_zero() {
        let mut service = TileService::new(InMemoryStore::new());
        match respond_initialize(&mut service, 1) {
            Response::Initialized(msg) => {
                assert_eq!(msg.created, 136);
                assert_eq!(msg.total, 136);
            }
            other => panic!("unexpected response {:?}", other),
        }
        match respond_initialize(&mut service, 2) {
            Response::Initialized(msg) => {
                assert_eq!(msg.created, 0);
                assert_eq!(msg.total, 136);
            }
            other => panic!("unexpected response {:?}", other),
        }
    }
}
