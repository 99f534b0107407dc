use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::game::{Control, Game};
use crate::core::scheduler::Fired;

/// Single-consumer event loop.
///
/// Key presses and timer firings are pulled from their sources inside one
/// `select!`, handed to the game one at a time, and the screen is redrawn
/// after each.
pub struct Engine<G: Game> {
    game: G,
    timers: mpsc::UnboundedReceiver<Fired<G::Timer>>,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G, timers: mpsc::UnboundedReceiver<Fired<G::Timer>>) -> Self {
        Self { game, timers }
    }

    /// Run until the game asks to quit or the terminal closes, then hand the
    /// game back.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<G> {
        let mut events = EventStream::new();
        info!("event loop started");

        loop {
            terminal
                .draw(|f| self.game.render(f))
                .context("drawing frame")?;

            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            if self.game.handle_key(key) == Control::Quit {
                                debug!("quit requested");
                                break;
                            }
                        }
                        // Resizes and the like only need a redraw
                        Some(Ok(_)) => {}
                        Some(Err(err)) => return Err(err).context("reading terminal events"),
                        None => break,
                    }
                }

                Some(fired) = self.timers.recv() => {
                    self.game.handle_timer(fired);
                }
            }
        }

        info!("event loop finished");
        Ok(self.game)
    }
}
