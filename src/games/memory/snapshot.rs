//! Read-only view of a memory game, the only thing renderers consume
use serde::Serialize;

use super::game::Phase;

/// One position on the table as a renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub index: usize,
    pub id: u32,
    pub pair_id: u32,
    pub symbol: String,
    pub face_up: bool,
    pub matched: bool,
    /// A click here would be acted on.
    pub selectable: bool,
}

impl CardView {
    /// Short text description, without revealing face-down symbols.
    pub fn label(&self) -> String {
        if self.face_up {
            format!("Card {}", self.symbol)
        } else {
            "Face-down card".to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub cards: Vec<CardView>,
    pub score: u32,
    pub elapsed_seconds: u32,
    pub elapsed: String,
    pub timer_running: bool,
    pub locked: bool,
    pub won: bool,
}

impl GameSnapshot {
    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|card| card.matched).count()
    }
}

/// `MM:SS`, both fields zero-padded to two digits. Minutes keep growing
/// past 99 with no special casing.
pub fn format_elapsed(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(9), "00:09");
        assert_eq!(format_elapsed(61), "01:01");
        assert_eq!(format_elapsed(3599), "59:59");
        assert_eq!(format_elapsed(6000), "100:00");
    }

    #[test]
    fn test_label_hides_face_down_symbol() {
        let mut view = CardView {
            index: 0,
            id: 3,
            pair_id: 1,
            symbol: "🎩".into(),
            face_up: false,
            matched: false,
            selectable: true,
        };
        assert_eq!(view.label(), "Face-down card");

        view.face_up = true;
        assert_eq!(view.label(), "Card 🎩");
    }
}
