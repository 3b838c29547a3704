//! Shared UI pieces: layout and overlays.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Smallest play area worth drawing, in cells.
pub const MIN_PLAY_COLS: u16 = 30;
pub const MIN_PLAY_ROWS: u16 = 10;

/// Areas produced by [`game_layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLayout {
    /// Full area, outer border included.
    pub border: Rect,
    /// Play field, inside the outer border.
    pub play: Rect,
    /// 2-line status bar under the play field.
    pub status_bar: Rect,
}

/// Split the full terminal area into border, play field, and status bar.
///
/// ```text
/// ┌─ Flappy Owl ──────────────── Score: 3 ─┐
/// │                                        │
/// │   [play field]                         │
/// │                                        │
/// │ [status bar - 2 lines]                 │
/// └────────────────────────────────────────┘
/// ```
///
/// Pure function of the area so the host can size the viewport before
/// drawing.
pub fn game_layout(area: Rect) -> GameLayout {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(inner);

    GameLayout {
        border: area,
        play: chunks[0],
        status_bar: chunks[1],
    }
}

impl GameLayout {
    pub fn too_small(&self) -> bool {
        self.play.width < MIN_PLAY_COLS || self.play.height < MIN_PLAY_ROWS
    }

    /// Whether the loop may advance. While the too-small notice covers the
    /// field the run is paused, so it cannot end unseen.
    pub fn ticks_allowed(&self) -> bool {
        !self.too_small()
    }
}

/// A `width` x `height` rect centered in `area`, clipped to it.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Game-over box drawn on top of the play field. Only the box is cleared, so
/// the frozen field stays visible around it.
pub fn render_game_over_popup(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let popup = centered_rect(area, 32, 7);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let lines = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(Span::styled(
            "Press 'R' to Restart",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render a "terminal too small" message over the whole frame.
pub fn render_too_small(frame: &mut Frame, have: Rect) {
    let area = frame.size();
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Terminal too small",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Play field needs {}x{}, has {}x{}",
                MIN_PLAY_COLS, MIN_PLAY_ROWS, have.width, have.height
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
