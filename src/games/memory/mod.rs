//! Memory pairs game - deal, flip two, keep the matches
pub mod deck;
pub mod game;
pub mod renderer;
pub mod snapshot;
pub mod table;

pub use deck::{generate_deck, Card, Deck};
pub use game::{ClickOutcome, IgnoreReason, MemoryGame, MemoryState, MemoryTimer, Phase};
pub use renderer::MemoryRenderer;
pub use snapshot::{format_elapsed, CardView, GameSnapshot};
pub use table::MemoryTable;

use anyhow::Result;
use rand_core::RngCore;
use ratatui::DefaultTerminal;

use crate::core::config::GameConfig;
use crate::core::engine::Engine;
use crate::core::scheduler::TokioScheduler;

/// Game runner for the memory game. Returns the final state once the
/// player quits.
pub async fn run_game<R: RngCore>(
    config: GameConfig,
    rng: R,
    terminal: DefaultTerminal,
) -> Result<GameSnapshot> {
    let (scheduler, timers) = TokioScheduler::new();
    let mut game = MemoryGame::new(config, rng, scheduler)?;
    game.initialize();

    let engine = Engine::new(MemoryTable::new(game), timers);
    let table = engine.run(terminal).await?;
    Ok(table.snapshot())
}
