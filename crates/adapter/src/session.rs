//! Per-connection protocol state.
//!
//! Each connection owns one game. The session is synchronous so the whole
//! protocol can be exercised without sockets; the TCP server only moves
//! lines in and out.

use log::debug;

use crate::core::{CascadeError, GridError};
use crate::engine::{settle, GameSession};
use crate::protocol::*;
use crate::server::ServerConfig;
use crate::types::BoardEvent;

#[derive(Debug)]
pub struct AdapterSession {
    game: GameSession,
    protocol_version: String,
    handshaken: bool,
    auto_animations: bool,
    last_seq: Option<u64>,
}

impl AdapterSession {
    pub fn new(config: &ServerConfig) -> Result<Self, GridError> {
        Ok(Self {
            game: GameSession::new(config.grid, config.seed)?,
            protocol_version: config.protocol_version.clone(),
            handshaken: false,
            auto_animations: false,
            last_seq: None,
        })
    }

    pub fn game(&self) -> &GameSession {
        &self.game
    }

    pub fn is_handshaken(&self) -> bool {
        self.handshaken
    }

    /// Handle one raw inbound line
    pub fn handle_line(&mut self, line: &str) -> Vec<ServerMessage> {
        match parse_message(line) {
            Ok(msg) => self.handle(msg),
            Err(e) => {
                let seq = extract_seq_best_effort(line).unwrap_or(0);
                debug!("unparseable message (seq {}): {}", seq, e);
                vec![create_error(seq, ErrorCode::InvalidMessage, &e.to_string())]
            }
        }
    }

    /// Handle one parsed message, returning replies in send order
    pub fn handle(&mut self, msg: ParsedMessage) -> Vec<ServerMessage> {
        let seq = msg.seq();

        // Sequencing: enforce monotonic seq per connection.
        if let Some(prev) = self.last_seq {
            if seq <= prev {
                return vec![create_error(
                    seq,
                    ErrorCode::InvalidSeq,
                    &format!("seq {} is not greater than {}", seq, prev),
                )];
            }
        }
        self.last_seq = Some(seq);

        let result = match msg {
            ParsedMessage::Hello(hello) => return vec![self.hello(hello)],
            _ if !self.handshaken => {
                return vec![create_error(
                    seq,
                    ErrorCode::HandshakeRequired,
                    "send hello before any other message",
                )];
            }
            ParsedMessage::Insert(m) => self.insert(m),
            ParsedMessage::AnimationFinished(m) => self
                .game
                .controller_mut()
                .animation_finished(m.animation.into())
                .map(|()| self.game.controller_mut().take_events()),
            ParsedMessage::NewGame(_) => {
                self.game.restart();
                Ok(Vec::new())
            }
            ParsedMessage::Observe(_) => {
                let observation =
                    create_observation(seq, self.game.snapshot(), self.game.next_value());
                return vec![observation];
            }
        };

        match result {
            Ok(events) => {
                let mut out: Vec<ServerMessage> =
                    events.iter().map(|e| create_event(seq, e)).collect();
                out.push(create_ack(seq));
                out
            }
            Err(e) => vec![create_error(seq, ErrorCode::from(e), &e.to_string())],
        }
    }

    fn hello(&mut self, hello: HelloMessage) -> ServerMessage {
        if major_version(&hello.protocol_version) != major_version(&self.protocol_version) {
            debug!("refusing protocol version {}", hello.protocol_version);
            return create_error(
                hello.seq,
                ErrorCode::UnsupportedVersion,
                &format!("protocol version {} not supported", hello.protocol_version),
            );
        }
        debug!(
            "hello from {} {} (auto_animations: {})",
            hello.client.name, hello.client.version, hello.auto_animations
        );
        self.handshaken = true;
        self.auto_animations = hello.auto_animations;
        let grid = self.game.controller().grid();
        create_welcome(
            hello.seq,
            &self.protocol_version,
            grid.width(),
            grid.height(),
        )
    }

    fn insert(&mut self, m: InsertMessage) -> Result<Vec<BoardEvent>, CascadeError> {
        self.game.insert(m.column, m.value)?;
        let controller = self.game.controller_mut();
        if self.auto_animations {
            Ok(settle(controller)?.events)
        } else {
            Ok(controller.take_events())
        }
    }
}

fn major_version(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridConfig;

    fn session(width: u8, height: u8) -> AdapterSession {
        let config = ServerConfig {
            grid: GridConfig::new(width, height),
            ..ServerConfig::default()
        };
        AdapterSession::new(&config).unwrap()
    }

    fn hello_line(seq: u64, auto: bool) -> String {
        format!(
            r#"{{"type":"hello","seq":{},"client":{{"name":"t","version":"0"}},"protocol_version":"1.0.0","auto_animations":{}}}"#,
            seq, auto
        )
    }

    fn kinds(msgs: &[ServerMessage]) -> Vec<&'static str> {
        msgs.iter().map(ServerMessage::kind).collect()
    }

    #[test]
    fn commands_before_hello_are_refused() {
        let mut s = session(3, 3);
        let out = s.handle_line(r#"{"type":"insert","seq":1,"column":0,"value":1}"#);
        assert!(matches!(
            out[0],
            ServerMessage::Error { code: ErrorCode::HandshakeRequired, .. }
        ));
        assert_eq!(s.game().controller().grid().occupied_count(), 0);
    }

    #[test]
    fn welcome_reports_dimensions() {
        let mut s = session(4, 6);
        let out = s.handle_line(&hello_line(1, false));
        assert!(matches!(
            out[0],
            ServerMessage::Welcome { seq: 1, width: 4, height: 6, .. }
        ));
        assert!(s.is_handshaken());
    }

    #[test]
    fn other_major_version_is_refused() {
        let mut s = session(3, 3);
        let line = hello_line(1, false).replace("1.0.0", "2.0.0");
        let out = s.handle_line(&line);
        assert!(matches!(
            out[0],
            ServerMessage::Error { seq: 1, code: ErrorCode::UnsupportedVersion, .. }
        ));
        assert!(!s.is_handshaken());
        let out = s.handle_line(r#"{"type":"observe","seq":2}"#);
        assert!(matches!(
            out[0],
            ServerMessage::Error { code: ErrorCode::HandshakeRequired, .. }
        ));

        // Minor revisions of the same major are accepted.
        let line = hello_line(3, false).replace("1.0.0", "1.4.2");
        assert_eq!(kinds(&s.handle_line(&line)), vec!["welcome"]);
        assert!(s.is_handshaken());
    }

    #[test]
    fn stale_seq_is_rejected() {
        let mut s = session(3, 3);
        s.handle_line(&hello_line(5, false));
        let out = s.handle_line(r#"{"type":"observe","seq":5}"#);
        assert!(matches!(out[0], ServerMessage::Error { code: ErrorCode::InvalidSeq, .. }));
    }

    #[test]
    fn manual_animation_flow_emits_events_then_ack() {
        let mut s = session(1, 3);
        s.handle_line(&hello_line(1, false));

        let out = s.handle_line(r#"{"type":"insert","seq":2,"column":0,"value":2}"#);
        assert_eq!(kinds(&out), vec!["event", "ack"]);
        s.handle_line(r#"{"type":"animation_finished","seq":3,"animation":"insertion"}"#);

        s.handle_line(r#"{"type":"insert","seq":4,"column":0,"value":2}"#);
        let out = s.handle_line(r#"{"type":"animation_finished","seq":5,"animation":"insertion"}"#);
        assert_eq!(kinds(&out), vec!["event", "ack"]);
        assert!(matches!(
            &out[0],
            ServerMessage::Event { event: WireEvent::CubesCollected { merged_value: 3, .. }, .. }
        ));

        // Signals out of order are reported, not ignored.
        let out = s.handle_line(r#"{"type":"animation_finished","seq":6,"animation":"compaction"}"#);
        assert!(matches!(
            out[0],
            ServerMessage::Error { code: ErrorCode::InvalidTransition, .. }
        ));
    }

    #[test]
    fn auto_animations_settle_each_insert() {
        let mut s = session(1, 3);
        s.handle_line(&hello_line(1, true));
        s.handle_line(r#"{"type":"insert","seq":2,"column":0,"value":2}"#);
        let out = s.handle_line(r#"{"type":"insert","seq":3,"column":0,"value":2}"#);
        assert_eq!(kinds(&out), vec!["event", "event", "event", "ack"]);
        assert!(s.game().controller().accepts_input());
    }

    #[test]
    fn full_column_maps_to_column_full() {
        let mut s = session(2, 1);
        s.handle_line(&hello_line(1, true));
        s.handle_line(r#"{"type":"insert","seq":2,"column":0,"value":1}"#);
        let out = s.handle_line(r#"{"type":"insert","seq":3,"column":0,"value":5}"#);
        assert!(matches!(out[0], ServerMessage::Error { code: ErrorCode::ColumnFull, .. }));
    }

    #[test]
    fn observe_and_new_game() {
        let mut s = session(2, 2);
        s.handle_line(&hello_line(1, true));
        s.handle_line(r#"{"type":"insert","seq":2,"column":1}"#);

        let out = s.handle_line(r#"{"type":"observe","seq":3}"#);
        let ServerMessage::Observation(obs) = &out[0] else {
            panic!("expected observation");
        };
        assert!(obs.columns[1][0].is_some());

        let out = s.handle_line(r#"{"type":"new_game","seq":4}"#);
        assert_eq!(kinds(&out), vec!["ack"]);
        assert_eq!(s.game().controller().grid().occupied_count(), 0);
    }

    #[test]
    fn garbage_gets_invalid_message() {
        let mut s = session(2, 2);
        let out = s.handle_line("{nope");
        assert!(matches!(
            out[0],
            ServerMessage::Error { seq: 0, code: ErrorCode::InvalidMessage, .. }
        ));
    }
}
