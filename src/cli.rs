use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_core::RngCore;
use tracing::info;

use crate::core::config::GameConfig;
use crate::core::logging::{self, LogTarget};
use crate::games::memory::{self, generate_deck};

#[derive(Parser, Debug)]
#[command(name = "pairterm")]
#[command(about = "🃏 A memory pairs game for the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Seed for the shuffle; omit for a random deal
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// JSON config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Play in the terminal (default)
    Play,
    /// Print a freshly shuffled deck as JSON
    Deal,
    /// Print the effective configuration as JSON
    Config,
}

impl Cli {
    /// Logs would corrupt the game screen, so the TUI only logs to a file.
    pub fn log_target(&self) -> LogTarget {
        match (&self.log_file, self.command()) {
            (Some(path), _) => LogTarget::File(path.clone()),
            (None, Commands::Play) => LogTarget::Off,
            (None, _) => LogTarget::Stderr,
        }
    }

    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Play)
    }
}

pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Shuffle a deck for `config` and render it as pretty JSON.
pub fn deal_json<R: RngCore>(config: &GameConfig, rng: &mut R) -> Result<String> {
    let deck = generate_deck(config.symbols.as_slice(), rng);
    Ok(serde_json::to_string_pretty(&deck)?)
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_target())?;

    let config = GameConfig::load_or_default(cli.config.as_deref())?;
    let mut rng = seeded_rng(cli.seed);

    match cli.command() {
        Commands::Play => {
            info!(seed = ?cli.seed, pairs = config.symbols.len(), "starting game");
            let terminal = ratatui::init();
            let result = memory::run_game(config, rng, terminal).await;
            ratatui::restore();

            let snapshot = result?;
            if snapshot.won {
                println!("🎉 Found every pair! Score {} in {}", snapshot.score, snapshot.elapsed);
            } else {
                println!("👋 Score {} after {}", snapshot.score, snapshot.elapsed);
            }
        }
        Commands::Deal => {
            println!("{}", deal_json(&config, &mut rng)?);
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
