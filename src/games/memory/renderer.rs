//! Memory board renderer - reads snapshots, never the game itself
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::config::GameConfig;
use super::game::{ClickOutcome, IgnoreReason};
use super::snapshot::{CardView, GameSnapshot};

const FACE_DOWN: &str = "🔒";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Up,
    Down,
}

/// Board layout plus the highlighted position
pub struct MemoryRenderer {
    cursor: usize,
    columns: usize,
}

impl MemoryRenderer {
    pub fn new(columns: u16) -> Self {
        Self {
            cursor: 0,
            columns: usize::from(columns.max(1)),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Step the cursor within a board of `len` cards. Moves that would leave
    /// the grid are ignored.
    pub fn move_cursor(&mut self, step: CursorMove, len: usize) {
        let cols = self.columns;
        let cur = self.cursor;
        self.cursor = match step {
            CursorMove::Left if cur % cols > 0 => cur - 1,
            CursorMove::Right if cur % cols + 1 < cols && cur + 1 < len => cur + 1,
            CursorMove::Up if cur >= cols => cur - cols,
            CursorMove::Down if cur + cols < len => cur + cols,
            _ => cur,
        };
    }

    /// Draw the whole table. `last_outcome` feeds the status line under the
    /// hint; `None` means no click since the last deal.
    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &GameSnapshot,
        config: &GameConfig,
        last_outcome: Option<ClickOutcome>,
    ) {
        let [header, board, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(4),
        ])
        .areas(frame.area());

        self.render_header(frame, header, snapshot, config);
        self.render_board(frame, board, snapshot, config);
        self.render_footer(frame, footer, snapshot, last_outcome);
    }

    fn render_header(
        &self,
        frame: &mut Frame,
        area: Rect,
        snapshot: &GameSnapshot,
        config: &GameConfig,
    ) {
        let accent = Style::default().fg(Color::Indexed(61)).add_modifier(Modifier::BOLD);
        let line = Line::from(vec![
            Span::styled(format!("♔ {}", config.title), accent),
            Span::raw("   Score "),
            Span::styled(snapshot.score.to_string(), accent),
            Span::raw("   Time "),
            Span::styled(snapshot.elapsed.clone(), accent),
            Span::raw("   [r] Reset"),
        ]);
        frame.render_widget(
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
    }

    fn render_board(
        &self,
        frame: &mut Frame,
        area: Rect,
        snapshot: &GameSnapshot,
        config: &GameConfig,
    ) {
        // Before the first deal, draw face-down placeholders
        let len = if snapshot.cards.is_empty() {
            config.deck_size()
        } else {
            snapshot.cards.len()
        };
        if len == 0 {
            return;
        }
        let rows = len.div_ceil(self.columns);

        let row_areas = Layout::vertical(vec![Constraint::Ratio(1, rows as u32); rows]).split(area);
        for (row, row_area) in row_areas.iter().enumerate() {
            let widths = vec![Constraint::Ratio(1, self.columns as u32); self.columns];
            let cells = Layout::horizontal(widths).split(*row_area);
            for (col, cell) in cells.iter().enumerate() {
                let index = row * self.columns + col;
                if index >= len {
                    break;
                }
                match snapshot.cards.get(index) {
                    Some(card) => self.render_card(frame, *cell, card),
                    None => frame.render_widget(
                        Paragraph::new("")
                            .block(Block::default().borders(Borders::ALL))
                            .style(Style::default().add_modifier(Modifier::DIM)),
                        *cell,
                    ),
                }
            }
        }
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, card: &CardView) {
        let mut style = if card.matched {
            Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD)
        } else if card.face_up {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::LightBlue)
        };
        if !card.selectable {
            style = style.add_modifier(Modifier::DIM);
        }
        if card.index == self.cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }

        let face = if card.face_up { card.symbol.as_str() } else { FACE_DOWN };
        // Vertically centre the face inside the bordered cell
        let padding = area.height.saturating_sub(3) / 2;
        let mut lines: Vec<Line> = (0..padding).map(|_| Line::raw("")).collect();
        lines.push(Line::raw(face));

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
    }

    fn render_footer(
        &self,
        frame: &mut Frame,
        area: Rect,
        snapshot: &GameSnapshot,
        last_outcome: Option<ClickOutcome>,
    ) {
        let hint = if snapshot.won {
            "🎉 Wonderful! You found every pair! Press r to play again."
        } else {
            "Flip two cards to find the pairs.  ←↑↓→ move · Enter flip · q quit"
        };

        let mut status = vec![Span::styled(
            status_text(last_outcome),
            Style::default().add_modifier(Modifier::ITALIC),
        )];
        if let Some(card) = snapshot.cards.get(self.cursor) {
            status.push(Span::raw(format!("  ·  {}", card.label())));
        }

        frame.render_widget(
            Paragraph::new(vec![Line::raw(hint), Line::from(status)])
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
    }
}

/// One-line summary of the last click for the footer.
fn status_text(outcome: Option<ClickOutcome>) -> &'static str {
    match outcome {
        None => "Pick a card",
        Some(ClickOutcome::Flipped) => "Pick its partner",
        Some(ClickOutcome::Matched { .. }) => "Pair found",
        Some(ClickOutcome::Mismatched) => "No match",
        Some(ClickOutcome::Won) => "All pairs found",
        Some(ClickOutcome::Ignored(reason)) => match reason {
            IgnoreReason::Locked => "Wait for the cards to turn back",
            IgnoreReason::AlreadyFaceUp => "That card is already showing",
            IgnoreReason::AlreadyMatched => "That pair is already found",
            IgnoreReason::AlreadyWon | IgnoreReason::NoDeck => "Press r to deal",
            IgnoreReason::OutOfBounds => "No card there",
        },
    }
}
