mod commands;
mod config;
mod renderer;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tictactoe_engine::config::{FileContentProvider, MemoryContentProvider, Validate};
use tictactoe_engine::logger::{self, LogTarget};
use tictactoe_engine::stats::StatsStore;
use tictactoe_engine::tictactoe::{GameSession, SessionController, SessionSettings};
use tictactoe_engine::{SessionRng, log};

use commands::{Command, HELP, parse_command};
use config::{AppConfig, get_config_manager};
use renderer::{TerminalObserver, render_stats};

#[derive(Parser)]
#[command(name = "tictactoe", about = "Tic-tac-toe against a friend or a bot")]
struct Args {
    /// Directory holding config.yaml and the persisted stats.
    #[arg(long, default_value = ".")]
    data_dir: String,

    /// Overrides bot_delay_ms from the config.
    #[arg(long)]
    bot_delay_ms: Option<u64>,

    /// Seed for the easy and medium bots.
    #[arg(long)]
    seed: Option<u64>,

    /// Keep stats in memory only.
    #[arg(long)]
    no_persist: bool,

    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Write the effective config back to the data directory.
    #[arg(long)]
    save_config: bool,
}

fn load_config(args: &Args) -> AppConfig {
    let manager = get_config_manager(&args.data_dir);
    let mut config = manager.get_config().unwrap_or_else(|e| {
        log!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    if let Some(delay) = args.bot_delay_ms {
        config.bot_delay_ms = delay;
    }
    if let Err(e) = config.validate() {
        log!("Invalid config, using defaults: {}", e);
        config = AppConfig::default();
    }

    if args.save_config {
        match manager.set_config(&config) {
            Ok(()) => log!("Config saved to {}", args.data_dir),
            Err(e) => log!("Failed to save config: {}", e),
        }
    }
    config
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Terminal".to_string())
    } else {
        None
    };
    let target = match &args.log_file {
        Some(path) => LogTarget::file(path)?,
        None => LogTarget::Stderr,
    };
    logger::init_logger(prefix, target);

    let config = load_config(&args);

    let stats_store = if args.no_persist {
        StatsStore::new(MemoryContentProvider::new())
    } else {
        StatsStore::new(FileContentProvider::new(&args.data_dir))
    };
    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };

    let session = GameSession::new(stats_store, rng);
    let observer = TerminalObserver::new(config.bell_on_game_over);
    let controller = SessionController::new(session, observer, Duration::from_millis(config.bot_delay_ms));

    let mut mode = config.default_mode;
    let mut difficulty = config.default_difficulty;

    println!("{}", HELP);
    println!("{}", render_stats(&controller.stats().await));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{} (type 'help')", e);
                continue;
            }
        };

        match command {
            Command::Start { mode: m, difficulty: d } => {
                mode = m.unwrap_or(mode);
                difficulty = d.unwrap_or(difficulty);
                controller.start(SessionSettings { mode, difficulty }).await;
            }
            Command::Place(index) => controller.handle_move(index).await,
            Command::Mode(m) => {
                mode = m;
                controller.reset().await;
            }
            Command::Difficulty(d) => {
                difficulty = d;
                println!("Difficulty for the next game: {:?}", difficulty);
            }
            Command::Reset => controller.reset().await,
            Command::Stats => println!("{}", render_stats(&controller.stats().await)),
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }
    }

    log!("Exiting");
    Ok(())
}
