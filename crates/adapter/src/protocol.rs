//! Protocol module - JSON message types for the presentation adapter
//!
//! Line-delimited JSON. Every message carries `type` and `seq`; server
//! messages also carry `ts` (milliseconds since the Unix epoch).

use serde::{Deserialize, Serialize};

use crate::core::{CascadeError, GridError, GridSnapshot};
use crate::types::{AnimationKind, BoardEvent, Cell, CubeMove, CubeValue, Slot};

/// Version string exchanged in hello/welcome
pub const PROTOCOL_VERSION: &str = "1.0.0";

// ============== Shared Payloads ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WireSlot {
    pub column: u8,
    pub index: u8,
}

impl From<Slot> for WireSlot {
    fn from(value: Slot) -> Self {
        Self {
            column: value.column,
            index: value.index,
        }
    }
}

impl From<WireSlot> for Slot {
    fn from(value: WireSlot) -> Self {
        Slot::new(value.column, value.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WireMove {
    pub from: WireSlot,
    pub to: WireSlot,
    pub value: CubeValue,
}

impl From<CubeMove> for WireMove {
    fn from(value: CubeMove) -> Self {
        Self {
            from: value.from.into(),
            to: value.to.into(),
            value: value.value,
        }
    }
}

/// Board event as sent to the presentation layer, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WireEvent {
    CubeAdded {
        destination: WireSlot,
        entry: WireSlot,
        value: CubeValue,
    },
    CubesCollected {
        origin: WireSlot,
        cleared: Vec<WireSlot>,
        original_value: CubeValue,
        merged_value: CubeValue,
    },
    CompactionComplete {
        moves: Vec<WireMove>,
    },
    GameOver,
}

impl From<&BoardEvent> for WireEvent {
    fn from(value: &BoardEvent) -> Self {
        match value {
            BoardEvent::CubeAddedToBoard {
                destination,
                entry,
                value,
            } => WireEvent::CubeAdded {
                destination: (*destination).into(),
                entry: (*entry).into(),
                value: *value,
            },
            BoardEvent::CubesCollected {
                origin,
                cleared,
                original_value,
                merged_value,
            } => WireEvent::CubesCollected {
                origin: (*origin).into(),
                cleared: cleared.iter().copied().map(WireSlot::from).collect(),
                original_value: *original_value,
                merged_value: *merged_value,
            },
            BoardEvent::BoardCompactionComplete { moves } => WireEvent::CompactionComplete {
                moves: moves.iter().copied().map(WireMove::from).collect(),
            },
            BoardEvent::GameOver => WireEvent::GameOver,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationName {
    Insertion,
    Collect,
    Compaction,
}

impl From<AnimationName> for AnimationKind {
    fn from(value: AnimationName) -> Self {
        match value {
            AnimationName::Insertion => AnimationKind::Insertion,
            AnimationName::Collect => AnimationKind::Collect,
            AnimationName::Compaction => AnimationKind::Compaction,
        }
    }
}

// ============== Client -> Engine Messages ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

/// Client hello message (first message to establish a session)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloMessage {
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
    pub client: ClientInfo,
    pub protocol_version: String,
    /// Resolve every insertion instantly instead of waiting for animation signals
    #[serde(default)]
    pub auto_animations: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertMessage {
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
    pub column: u8,
    /// Missing value draws from the session's spawner
    #[serde(default)]
    pub value: Option<CubeValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationFinishedMessage {
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
    pub animation: AnimationName,
}

/// Payload for messages that carry nothing but their sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BareMessage {
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedMessage {
    Hello(HelloMessage),
    Insert(InsertMessage),
    AnimationFinished(AnimationFinishedMessage),
    NewGame(BareMessage),
    Observe(BareMessage),
}

impl ParsedMessage {
    pub fn seq(&self) -> u64 {
        match self {
            ParsedMessage::Hello(m) => m.seq,
            ParsedMessage::Insert(m) => m.seq,
            ParsedMessage::AnimationFinished(m) => m.seq,
            ParsedMessage::NewGame(m) | ParsedMessage::Observe(m) => m.seq,
        }
    }
}

/// Parse one inbound line
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type", rename_all = "snake_case")]
    enum InboundMessage {
        Hello(HelloMessage),
        Insert(InsertMessage),
        AnimationFinished(AnimationFinishedMessage),
        NewGame(BareMessage),
        Observe(BareMessage),
    }

    Ok(match serde_json::from_str::<InboundMessage>(json)? {
        InboundMessage::Hello(m) => ParsedMessage::Hello(m),
        InboundMessage::Insert(m) => ParsedMessage::Insert(m),
        InboundMessage::AnimationFinished(m) => ParsedMessage::AnimationFinished(m),
        InboundMessage::NewGame(m) => ParsedMessage::NewGame(m),
        InboundMessage::Observe(m) => ParsedMessage::Observe(m),
    })
}

/// Best-effort `seq` from a line that failed to parse, for error replies
pub fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let v: serde_json::Value = serde_json::from_str(s).ok()?;
    v.get("seq")?.as_u64()
}

// ============== Engine -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AckStatus {
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidMessage,
    HandshakeRequired,
    UnsupportedVersion,
    InvalidSeq,
    ColumnFull,
    InvalidTransition,
    InvalidSlot,
    InvalidGrid,
}

impl From<CascadeError> for ErrorCode {
    fn from(value: CascadeError) -> Self {
        match value {
            CascadeError::ColumnFull { .. } => ErrorCode::ColumnFull,
            CascadeError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            CascadeError::Grid(GridError::InvalidSlot { .. }) => ErrorCode::InvalidSlot,
            CascadeError::Grid(GridError::InvalidGrid { .. }) => ErrorCode::InvalidGrid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationMessage {
    pub seq: u64,
    pub ts: u64,
    pub width: u8,
    pub height: u8,
    /// Columns left to right, each anchor first; `null` is an empty slot
    pub columns: Vec<Vec<Cell>>,
    pub state: String,
    pub chain: u32,
    pub game_over: bool,
    pub next_value: CubeValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        seq: u64,
        ts: u64,
        protocol_version: String,
        width: u8,
        height: u8,
    },
    Ack {
        seq: u64,
        ts: u64,
        status: AckStatus,
    },
    Error {
        seq: u64,
        ts: u64,
        code: ErrorCode,
        message: String,
    },
    Event {
        seq: u64,
        ts: u64,
        event: WireEvent,
    },
    Observation(ObservationMessage),
}

impl ServerMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::Welcome { .. } => "welcome",
            ServerMessage::Ack { .. } => "ack",
            ServerMessage::Error { .. } => "error",
            ServerMessage::Event { .. } => "event",
            ServerMessage::Observation(_) => "observation",
        }
    }
}

// ============== Utility Functions ==============

/// Create a hello message
pub fn create_hello(seq: u64, client_name: &str, protocol_version: &str) -> HelloMessage {
    HelloMessage {
        seq,
        ts: current_timestamp_ms(),
        client: ClientInfo {
            name: client_name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        protocol_version: protocol_version.to_string(),
        auto_animations: false,
    }
}

pub fn create_welcome(seq: u64, protocol_version: &str, width: u8, height: u8) -> ServerMessage {
    ServerMessage::Welcome {
        seq,
        ts: current_timestamp_ms(),
        protocol_version: protocol_version.to_string(),
        width,
        height,
    }
}

pub fn create_ack(seq: u64) -> ServerMessage {
    ServerMessage::Ack {
        seq,
        ts: current_timestamp_ms(),
        status: AckStatus::Ok,
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ServerMessage {
    ServerMessage::Error {
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

pub fn create_event(seq: u64, event: &BoardEvent) -> ServerMessage {
    ServerMessage::Event {
        seq,
        ts: current_timestamp_ms(),
        event: event.into(),
    }
}

pub fn create_observation(seq: u64, snapshot: GridSnapshot, next_value: CubeValue) -> ServerMessage {
    ServerMessage::Observation(ObservationMessage {
        seq,
        ts: current_timestamp_ms(),
        width: snapshot.width,
        height: snapshot.height,
        columns: snapshot.columns,
        state: snapshot.state.as_str().to_string(),
        chain: snapshot.chain,
        game_over: snapshot.game_over,
        next_value,
    })
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
