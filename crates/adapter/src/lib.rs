//! Adapter module - presentation control via TCP socket with JSON protocol
//!
//! This crate lets an external presentation layer (a renderer, a bot, a test
//! harness) drive the cascade engine over a line-delimited JSON protocol and
//! report animation completion back to it.
//!
//! # Protocol Overview
//!
//! 1. **Connection**: Client connects to TCP socket (default: 127.0.0.1:7788)
//! 2. **Handshake**: Client sends `hello`, server responds with `welcome`
//! 3. **Commanding**: Client sends `insert`, `animation_finished`, `new_game`
//!    or `observe`; every command is answered
//!
//! Each connection owns an independent game.
//!
//! # Message Types
//!
//! ## Client → Server
//!
//! - **hello**: Handshake; `auto_animations: true` resolves every insertion
//!   immediately instead of waiting for animation signals
//! - **insert**: Drop a cube into a column (value drawn from the spawner if omitted)
//! - **animation_finished**: `insertion`, `collect` or `compaction`
//! - **new_game**: Clear the grid
//! - **observe**: Request a grid snapshot
//!
//! ## Server → Client
//!
//! - **welcome**: Response to hello with grid dimensions
//! - **event**: One board event produced by the command (sent before its ack)
//! - **ack**: Command accepted
//! - **error**: Error response with code and message
//! - **observation**: Grid snapshot
//!
//! # Environment Variables
//!
//! - `CUBE_DROP_HOST`: Bind address (default: "127.0.0.1")
//! - `CUBE_DROP_PORT`: Port number (default: 7788)
//! - `CUBE_DROP_SEED`: Spawner seed for new connections (default: 1)
//! - `CUBE_DROP_WIDTH` / `CUBE_DROP_HEIGHT`: Grid size (default: 5x7)
//! - `CUBE_DROP_DISABLED`: Set to "1" or "true" to disable the adapter entirely
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"hello","seq":1,"client":{"name":"viewer","version":"1.0.0"},"protocol_version":"1.0.0"}
//! Server -> Client: {"type":"welcome","seq":1,"ts":...,"protocol_version":"1.0.0","width":5,"height":7}
//! Client -> Server: {"type":"insert","seq":2,"column":0,"value":2}
//! Server -> Client: {"type":"event","seq":2,"ts":...,"event":{"kind":"cube_added",...}}
//! Server -> Client: {"type":"ack","seq":2,"ts":...,"status":"ok"}
//! Client -> Server: {"type":"animation_finished","seq":3,"animation":"insertion"}
//! Server -> Client: {"type":"ack","seq":3,"ts":...,"status":"ok"}
//! ```

pub mod protocol;
pub mod server;
pub mod session;

pub use cube_drop_core as core;
pub use cube_drop_engine as engine;
pub use cube_drop_types as types;

pub use protocol::*;
pub use server::{run_server, ServerConfig};
pub use session::AdapterSession;
