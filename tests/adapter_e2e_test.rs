use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

use cube_drop::adapter::protocol::{create_hello, PROTOCOL_VERSION};
use cube_drop::adapter::server::{run_server, ServerConfig};
use cube_drop::core::GridConfig;

async fn start_server(grid: GridConfig) -> (tokio::task::JoinHandle<()>, SocketAddr) {
    let config = ServerConfig {
        port: 0,
        grid,
        ..ServerConfig::default()
    };
    let (ready_tx, ready_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        let _ = run_server(config, Some(ready_tx)).await;
    });

    let addr = tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .expect("server did not signal ready")
        .expect("ready channel dropped");
    (server_handle, addr)
}

struct Client {
    lines: Lines<BufReader<OwnedReadHalf>>,
    write_half: OwnedWriteHalf,
}

impl Client {
    async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.expect("connect failed");
        let (read_half, write_half) = stream.into_split();
        Self {
            lines: BufReader::new(read_half).lines(),
            write_half,
        }
    }

    async fn send(&mut self, line: &str) {
        self.write_half.write_all(line.as_bytes()).await.unwrap();
        self.write_half.write_all(b"\n").await.unwrap();
        self.write_half.flush().await.unwrap();
    }

    async fn recv(&mut self) -> serde_json::Value {
        let line = tokio::time::timeout(Duration::from_secs(2), self.lines.next_line())
            .await
            .unwrap()
            .unwrap()
            .expect("expected a line");
        serde_json::from_str(&line).unwrap()
    }

    async fn hello(&mut self, seq: u64, auto_animations: bool) -> serde_json::Value {
        let mut hello = serde_json::to_value(create_hello(seq, "e2e-test", PROTOCOL_VERSION)).unwrap();
        hello["type"] = "hello".into();
        hello["auto_animations"] = auto_animations.into();
        self.send(&hello.to_string()).await;
        self.recv().await
    }
}

#[derive(Debug, Deserialize)]
struct Welcome {
    protocol_version: String,
    width: u8,
    height: u8,
}

#[tokio::test]
async fn adapter_hello_insert_signals_and_observation() {
    let (server_handle, addr) = start_server(GridConfig::new(1, 3)).await;
    let mut client = Client::connect(addr).await;

    let welcome = client.hello(1, false).await;
    assert_eq!(welcome["type"], "welcome");
    assert_eq!(welcome["seq"], 1);
    let welcome: Welcome = serde_json::from_value(welcome).unwrap();
    assert_eq!(welcome.protocol_version, PROTOCOL_VERSION);
    assert_eq!((welcome.width, welcome.height), (1, 3));

    client
        .send(r#"{"type":"insert","seq":2,"column":0,"value":2}"#)
        .await;
    let ev = client.recv().await;
    assert_eq!(ev["type"], "event");
    assert_eq!(ev["event"]["kind"], "cube_added");
    assert_eq!(ev["event"]["destination"]["index"], 0);
    assert_eq!(client.recv().await["type"], "ack");

    client
        .send(r#"{"type":"animation_finished","seq":3,"animation":"insertion"}"#)
        .await;
    assert_eq!(client.recv().await["type"], "ack");

    client
        .send(r#"{"type":"insert","seq":4,"column":0,"value":2}"#)
        .await;
    assert_eq!(client.recv().await["event"]["kind"], "cube_added");
    assert_eq!(client.recv().await["type"], "ack");

    client
        .send(r#"{"type":"animation_finished","seq":5,"animation":"insertion"}"#)
        .await;
    let collected = client.recv().await;
    assert_eq!(collected["event"]["kind"], "cubes_collected");
    assert_eq!(collected["event"]["original_value"], 2);
    assert_eq!(collected["event"]["merged_value"], 3);
    assert_eq!(client.recv().await["type"], "ack");

    client
        .send(r#"{"type":"animation_finished","seq":6,"animation":"collect"}"#)
        .await;
    let compaction = client.recv().await;
    assert_eq!(compaction["event"]["kind"], "compaction_complete");
    assert_eq!(compaction["event"]["moves"][0]["to"]["index"], 0);
    assert_eq!(client.recv().await["type"], "ack");

    client
        .send(r#"{"type":"animation_finished","seq":7,"animation":"compaction"}"#)
        .await;
    assert_eq!(client.recv().await["type"], "ack");

    client.send(r#"{"type":"observe","seq":8}"#).await;
    let obs = client.recv().await;
    assert_eq!(obs["type"], "observation");
    assert_eq!(obs["seq"], 8);
    assert_eq!(obs["state"], "idle");
    assert_eq!(obs["columns"][0][0], 3);
    assert!(obs["columns"][0][1].is_null());

    server_handle.abort();
}

#[tokio::test]
async fn adapter_rejects_before_hello_and_bad_input() {
    let (server_handle, addr) = start_server(GridConfig::new(2, 2)).await;
    let mut client = Client::connect(addr).await;

    client.send(r#"{"type":"observe","seq":1}"#).await;
    let err = client.recv().await;
    assert_eq!(err["type"], "error");
    assert_eq!(err["code"], "handshake_required");

    assert_eq!(client.hello(2, true).await["type"], "welcome");

    client.send(r#"{"type":"insert","seq":3,"column":7}"#).await;
    let err = client.recv().await;
    assert_eq!(err["code"], "invalid_slot");
    assert_eq!(err["seq"], 3);

    client.send(r#"{"type":"insert","seq":3,"column":0}"#).await;
    assert_eq!(client.recv().await["code"], "invalid_seq");

    client.send(r#"{"type":"jump","seq":9}"#).await;
    let err = client.recv().await;
    assert_eq!(err["code"], "invalid_message");
    assert_eq!(err["seq"], 9);

    server_handle.abort();
}

#[tokio::test]
async fn adapter_connections_have_independent_games() {
    let (server_handle, addr) = start_server(GridConfig::new(2, 2)).await;
    let mut a = Client::connect(addr).await;
    let mut b = Client::connect(addr).await;
    a.hello(1, true).await;
    b.hello(1, true).await;

    a.send(r#"{"type":"insert","seq":2,"column":1,"value":4}"#).await;
    assert_eq!(a.recv().await["event"]["kind"], "cube_added");
    assert_eq!(a.recv().await["type"], "ack");

    b.send(r#"{"type":"observe","seq":2}"#).await;
    let obs = b.recv().await;
    assert!(obs["columns"][1][0].is_null());

    a.send(r#"{"type":"observe","seq":3}"#).await;
    let obs = a.recv().await;
    assert_eq!(obs["columns"][1][0], 4);

    server_handle.abort();
}
