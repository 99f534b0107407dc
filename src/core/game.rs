//! Core game interface driven by the terminal event loop
use crossterm::event::KeyEvent;

use crate::core::scheduler::Fired;

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// A game the [`Engine`](crate::core::engine::Engine) can run.
///
/// The engine owns the only receiver for timer firings and calls into the
/// game one trigger at a time, so implementations never see two events
/// concurrently.
pub trait Game {
    /// Payload carried by this game's timers
    type Timer: Send + 'static;

    fn handle_key(&mut self, key: KeyEvent) -> Control;

    fn handle_timer(&mut self, fired: Fired<Self::Timer>);

    /// Render the current state into the Ratatui Frame
    fn render(&self, frame: &mut ratatui::Frame);
}
