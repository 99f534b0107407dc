pub mod core {
	pub mod config;
	pub mod engine;
	pub mod game;
	pub mod logging;
	pub mod scheduler;
}

pub mod cli;
pub mod games;

// Re-export for convenience
pub use crate::core::config::GameConfig;
pub use crate::core::game::{Control, Game};
pub use crate::core::scheduler::{Fired, ManualScheduler, Scheduler, TimerId, TokioScheduler};
pub use crate::games::memory::{
    ClickOutcome, GameSnapshot, IgnoreReason, MemoryGame, MemoryTable, MemoryTimer, Phase,
};
