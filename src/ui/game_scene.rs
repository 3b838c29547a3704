//! Terminal rendering of a [`GameSession`].
//!
//! The play field is sampled cell by cell: each cell maps to a point in world
//! units via the configured cell scale, and whatever occupies that point is
//! drawn. The renderer never mutates the session.

use crate::ui::game_common::{game_layout, render_game_over_popup, render_too_small};
use flappy_owl::game::{CrashCause, GameSession, ViewportSize};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Paragraph},
    Frame,
};

/// World units per terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellScale {
    pub width: f64,
    pub height: f64,
}

impl CellScale {
    /// Viewport covered by a play field of the given size.
    pub fn viewport(&self, play: Rect) -> ViewportSize {
        ViewportSize::new(
            play.width as f64 * self.width,
            play.height as f64 * self.height,
        )
    }

    /// World coordinates of the center of cell (`col`, `row`).
    fn cell_center(&self, col: u16, row: u16) -> (f64, f64) {
        (
            (col as f64 + 0.5) * self.width,
            (row as f64 + 0.5) * self.height,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Sky,
    Star,
    Hill,
    Obstacle,
    Actor,
}

impl Cell {
    fn span(self) -> Span<'static> {
        match self {
            Cell::Sky => Span::raw(" "),
            Cell::Star => Span::styled("·", Style::default().fg(Color::DarkGray)),
            Cell::Hill => Span::styled("▒", Style::default().fg(Color::Rgb(40, 70, 40))),
            Cell::Obstacle => Span::styled("█", Style::default().fg(Color::Green)),
            Cell::Actor => Span::styled(
                "▓",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        }
    }
}

/// Render the whole scene.
pub fn render_game(frame: &mut Frame, session: &GameSession, scale: CellScale) {
    let layout = game_layout(frame.size());
    if layout.too_small() {
        render_too_small(frame, layout.play);
        return;
    }

    let border_color = if session.over { Color::Red } else { Color::Cyan };
    let block = Block::default()
        .title(" Flappy Owl ")
        .title(Title::from(format!(" Score: {} ", session.score)).alignment(Alignment::Right))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(block, layout.border);

    render_play_field(frame, layout.play, session, scale);
    render_status(frame, layout.status_bar, session);

    if session.over {
        render_game_over_popup(
            frame,
            layout.play,
            "GAME OVER",
            &format!("{} - score {}", crash_text(session.crash), session.score),
        );
    }
}

fn render_play_field(frame: &mut Frame, area: Rect, session: &GameSession, scale: CellScale) {
    let viewport = scale.viewport(area);
    let lines: Vec<Line> = (0..area.height)
        .map(|row| {
            let spans: Vec<Span> = (0..area.width)
                .map(|col| classify_cell(session, viewport, scale, col, row).span())
                .collect();
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// What occupies the cell at (`col`, `row`). The actor is drawn over
/// obstacles, obstacles over the background.
fn classify_cell(
    session: &GameSession,
    viewport: ViewportSize,
    scale: CellScale,
    col: u16,
    row: u16,
) -> Cell {
    let (x, y) = scale.cell_center(col, row);

    let actor = session.actor_rect();
    if x >= actor.left && x <= actor.right && y >= actor.top && y <= actor.bottom {
        return Cell::Actor;
    }

    let gap = session.tuning.obstacle_gap;
    for obs in &session.obstacles {
        if x >= obs.x && x <= obs.right() && (y <= obs.top_height || y >= obs.top_height + gap) {
            return Cell::Obstacle;
        }
    }

    background_cell(session.scroll_offset, viewport, scale, col, row)
}

/// Scrolling backdrop: rolling hills along the bottom and sparse stars above.
/// Both patterns are anchored in world space and shift with the scroll offset.
fn background_cell(
    scroll_offset: f64,
    viewport: ViewportSize,
    scale: CellScale,
    col: u16,
    row: u16,
) -> Cell {
    let world_col = ((col as f64 * scale.width - scroll_offset) / scale.width).floor() as i64;
    let rows = (viewport.height / scale.height).round() as i64;
    let from_bottom = rows - 1 - row as i64;

    // Hill profile repeats every 24 columns, at most 3 rows tall.
    let hill_height = match world_col.rem_euclid(24) {
        0..=3 | 20..=23 => 1,
        4..=7 | 16..=19 => 2,
        _ => 3,
    };
    if from_bottom < hill_height {
        return Cell::Hill;
    }

    if star_hash(world_col, row) % 37 == 0 {
        Cell::Star
    } else {
        Cell::Sky
    }
}

fn star_hash(col: i64, row: u16) -> u64 {
    let mut h = (col as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (row as u64).wrapping_mul(0xC2B2_AE3D);
    h ^= h >> 29;
    h.wrapping_mul(0xBF58_476D_1CE4_E5B9) >> 32
}

/// Two centered lines under the play field: run state, then key hints.
fn render_status(frame: &mut Frame, area: Rect, session: &GameSession) {
    let state = if session.over {
        Span::styled("Game Over", Style::default().fg(Color::Red))
    } else {
        Span::styled(
            format!("Score: {}", session.score),
            Style::default().fg(Color::Green),
        )
    };

    let mut hints = Vec::new();
    for (key, action) in CONTROL_HINTS {
        if !hints.is_empty() {
            hints.push(Span::raw("  "));
        }
        hints.push(Span::styled(key, Style::default().fg(Color::White)));
        hints.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let lines = vec![Line::from(state), Line::from(hints)];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

const CONTROL_HINTS: [(&str, &str); 3] = [
    ("[Space/Up]", "Jump"),
    ("[R]", "Restart"),
    ("[Esc/Q]", "Quit"),
];

fn crash_text(cause: Option<CrashCause>) -> &'static str {
    match cause {
        Some(CrashCause::Obstacle) => "Hit an obstacle",
        Some(CrashCause::Ground) => "Hit the ground",
        Some(CrashCause::Ceiling) => "Flew off the top",
        Some(CrashCause::ViewportEdge) => "Left the sky",
        None => "Run over",
    }
}
