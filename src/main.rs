//! Cube Drop runner (default binary).
//!
//! Serves the adapter protocol so an external presentation layer can drive
//! the engine. `--autoplay N` instead plays N drops headless and prints the
//! final grid, which is handy for eyeballing cascade behaviour.

use anyhow::Result;
use clap::Parser;
use log::info;

use cube_drop::adapter::{run_server, ServerConfig};
use cube_drop::core::{GridConfig, SimpleRng};
use cube_drop::engine::GameSession;

/// Column-drop cube merging puzzle engine.
#[derive(Debug, Parser)]
#[command(name = "cube-drop", version, about)]
struct Args {
    /// Bind address (overrides CUBE_DROP_HOST).
    #[arg(long, value_name = "ADDR")]
    host: Option<String>,

    /// Port number; 0 picks a free one (overrides CUBE_DROP_PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Grid width in columns (overrides CUBE_DROP_WIDTH).
    #[arg(long, value_name = "COLS")]
    width: Option<u8>,

    /// Grid height in slots per column (overrides CUBE_DROP_HEIGHT).
    #[arg(long, value_name = "SLOTS")]
    height: Option<u8>,

    /// Spawner seed (overrides CUBE_DROP_SEED).
    #[arg(short, long)]
    seed: Option<u32>,

    /// Play this many drops into random columns and print the grid instead of serving.
    #[arg(long, value_name = "N")]
    autoplay: Option<u32>,
}

impl Args {
    fn server_config(&self) -> ServerConfig {
        let mut config = ServerConfig::from_env();
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.grid = GridConfig::new(
            self.width.unwrap_or(config.grid.width),
            self.height.unwrap_or(config.grid.height),
        );
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.server_config();

    if let Some(drops) = args.autoplay {
        return autoplay(&config, drops);
    }

    if ServerConfig::is_disabled() {
        info!("adapter disabled via CUBE_DROP_DISABLED");
        return Ok(());
    }

    run_server(config, None).await
}

fn autoplay(config: &ServerConfig, drops: u32) -> Result<()> {
    let mut game = GameSession::new(config.grid, config.seed)?;
    let mut columns = SimpleRng::new(config.seed.wrapping_add(1));
    let mut best = 0;
    let mut played = 0;

    while played < drops && !game.controller().is_game_over() {
        let column = columns.next_range(u32::from(config.grid.width)) as u8;
        match game.play(column) {
            Ok(report) => {
                best = best.max(report.best_merge().unwrap_or(0));
                played += 1;
            }
            // Full column: pick another.
            Err(e) if e.is_recoverable() => continue,
            Err(e) => return Err(e.into()),
        }
    }

    // Anchor row first.
    let snapshot = game.snapshot();
    for index in 0..snapshot.height as usize {
        let row: Vec<String> = snapshot
            .columns
            .iter()
            .map(|column| match column[index] {
                Some(v) => format!("{:>3}", v),
                None => "  .".to_string(),
            })
            .collect();
        println!("{}", row.join(""));
    }
    println!(
        "drops: {}  best merge: {}  game over: {}",
        played, best, snapshot.game_over
    );
    Ok(())
}
