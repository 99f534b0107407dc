use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand_core::RngCore;
use tracing::debug;

use crate::core::game::{Control, Game};
use crate::core::scheduler::{Fired, Scheduler};

use super::game::{ClickOutcome, MemoryGame, MemoryTimer};
use super::renderer::{CursorMove, MemoryRenderer};
use super::snapshot::GameSnapshot;

/// A memory game at the terminal: the state machine plus the cursor the
/// player steers with the keyboard.
pub struct MemoryTable<S: Scheduler<MemoryTimer>, R: RngCore> {
    game: MemoryGame<S, R>,
    renderer: MemoryRenderer,
    last_outcome: Option<ClickOutcome>,
}

impl<S: Scheduler<MemoryTimer>, R: RngCore> MemoryTable<S, R> {
    pub fn new(game: MemoryGame<S, R>) -> Self {
        let renderer = MemoryRenderer::new(game.config().columns);
        Self {
            game,
            renderer,
            last_outcome: None,
        }
    }

    pub fn game(&self) -> &MemoryGame<S, R> {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut MemoryGame<S, R> {
        &mut self.game
    }

    pub fn cursor(&self) -> usize {
        self.renderer.cursor()
    }

    pub fn last_outcome(&self) -> Option<ClickOutcome> {
        self.last_outcome
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    fn step(&mut self, step: CursorMove) {
        let len = self.game.state().deck.len();
        self.renderer.move_cursor(step, len);
    }
}

impl<S: Scheduler<MemoryTimer>, R: RngCore> Game for MemoryTable<S, R> {
    type Timer = MemoryTimer;

    fn handle_key(&mut self, key: KeyEvent) -> Control {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Control::Quit;
            }
            KeyCode::Esc | KeyCode::Char('q') => return Control::Quit,
            KeyCode::Left | KeyCode::Char('h') => self.step(CursorMove::Left),
            KeyCode::Right | KeyCode::Char('l') => self.step(CursorMove::Right),
            KeyCode::Up | KeyCode::Char('k') => self.step(CursorMove::Up),
            KeyCode::Down | KeyCode::Char('j') => self.step(CursorMove::Down),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let outcome = self.game.handle_card_click(self.renderer.cursor());
                self.last_outcome = Some(outcome);
            }
            KeyCode::Char('r') => {
                debug!("reset requested from keyboard");
                self.game.reset();
                self.last_outcome = None;
            }
            _ => {}
        }
        Control::Continue
    }

    fn handle_timer(&mut self, fired: Fired<MemoryTimer>) {
        self.game.handle_timer(fired);
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        let snapshot = self.game.snapshot();
        self.renderer
            .render(frame, &snapshot, self.game.config(), self.last_outcome);
    }
}
