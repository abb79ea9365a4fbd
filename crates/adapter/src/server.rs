//! TCP server for the presentation adapter
//!
//! Handles incoming connections and manages client lifecycle.
//! Uses tokio for async networking; every connection gets its own game.

use std::net::SocketAddr;

use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use crate::core::GridConfig;
use crate::protocol::PROTOCOL_VERSION;
use crate::session::AdapterSession;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub protocol_version: String,
    pub grid: GridConfig,
    /// Seed for each connection's cube spawner
    pub seed: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7788,
            protocol_version: PROTOCOL_VERSION.to_string(),
            grid: GridConfig::default(),
            seed: 1,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("CUBE_DROP_HOST")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = env::var("CUBE_DROP_PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let seed = env::var("CUBE_DROP_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        Self {
            host,
            port,
            protocol_version: defaults.protocol_version,
            grid: GridConfig::from_env(),
            seed,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("invalid socket address {}: {}", addr, e))
    }

    /// Check if the adapter is disabled via environment
    pub fn is_disabled() -> bool {
        std::env::var("CUBE_DROP_DISABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}

/// Start the TCP server.
///
/// `ready_tx` receives the bound address once the listener is up, which lets
/// callers bind to port 0.
pub async fn run_server(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    config.grid.validate()?;

    let listener = TcpListener::bind(config.socket_addr()?).await?;
    let bound = listener.local_addr()?;
    info!(
        "listening on {} ({}x{} grid, seed {})",
        bound, config.grid.width, config.grid.height, config.seed
    );
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut client_id_counter = 0usize;

    // Accept incoming connections
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;

        info!("client {} connected from {}", client_id, addr);

        let session = AdapterSession::new(&config)?;
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, session).await {
                warn!("client {} error: {}", client_id, e);
            }
            info!("client {} disconnected", client_id);
        });
    }
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    mut session: AdapterSession,
) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);

    let mut line = String::new();
    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            // Client disconnected
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        debug!("client {} -> {}", client_id, trimmed);

        for msg in session.handle_line(trimmed) {
            let mut buf = serde_json::to_vec(&msg)?;
            buf.push(b'\n');
            writer.write_all(&buf).await?;
        }
        writer.flush().await?;
    }

    Ok(())
}
