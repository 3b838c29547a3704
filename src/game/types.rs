//! Flappy Owl data structures: session state, obstacles, and tuning presets.
//!
//! All positions are in world units (think CSS pixels). The y axis grows
//! downward, so `0.0` is the top of the viewport.

use serde::{Deserialize, Serialize};

/// Tuning presets matching the two revisions of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// First revision: heavy gravity, enormous jump, 300-tick spawn cadence.
    Original,
    /// Second revision: retuned for a terminal-sized viewport.
    #[default]
    Revised,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Original, Preset::Revised];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Revised => "revised",
        }
    }

    /// Parse a preset name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Full set of constants for this preset.
    pub fn tuning(&self) -> Tuning {
        match self {
            Self::Original => Tuning {
                scroll_step: 2.0,
                gravity: 9.0,
                jump_impulse: 1000.0,
                obstacle_width: 60.0,
                obstacle_gap: 300.0,
                min_segment_height: 50.0,
                spawn_cadence: 300,
                actor_x: 100.0,
                actor_width: 100.0,
                actor_height: 100.0,
                ground_margin: 100.0,
                start_position: StartPosition::Fixed(250.0),
                snap_on_collision: false,
                strict_bounds: false,
            },
            Self::Revised => Tuning {
                scroll_step: 3.0,
                gravity: 2.0,
                jump_impulse: 56.0,
                obstacle_width: 32.0,
                obstacle_gap: 120.0,
                min_segment_height: 32.0,
                spawn_cadence: 120,
                actor_x: 96.0,
                actor_width: 24.0,
                actor_height: 16.0,
                ground_margin: 16.0,
                start_position: StartPosition::HalfViewport,
                snap_on_collision: true,
                strict_bounds: true,
            },
        }
    }
}

/// Where the actor is placed on mount and on restart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartPosition {
    /// A constant vertical position.
    Fixed(f64),
    /// Half the viewport height at the moment of (re)start.
    HalfViewport,
}

impl StartPosition {
    pub fn resolve(&self, viewport: ViewportSize) -> f64 {
        match *self {
            Self::Fixed(y) => y,
            Self::HalfViewport => viewport.height / 2.0,
        }
    }
}

/// Fixed constants driving one session. Never mutated by the loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Leftward shift per tick for obstacles and the background.
    pub scroll_step: f64,
    /// Added to the actor position every tick. There is no velocity term.
    pub gravity: f64,
    /// Subtracted from the actor position once per jump press.
    pub jump_impulse: f64,
    pub obstacle_width: f64,
    /// Vertical opening between the top and bottom segments.
    pub obstacle_gap: f64,
    pub min_segment_height: f64,
    /// Ticks between obstacle spawns.
    pub spawn_cadence: u32,
    pub actor_x: f64,
    pub actor_width: f64,
    pub actor_height: f64,
    /// Distance above the viewport bottom that counts as ground.
    pub ground_margin: f64,
    pub start_position: StartPosition,
    /// On collision, write the aligned hitbox top back into the actor position.
    pub snap_on_collision: bool,
    /// End the run when the hitbox touches the viewport top or bottom.
    pub strict_bounds: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Preset::default().tuning()
    }
}

/// Current viewport dimensions in world units. Re-read every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle, edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    /// True unless one rectangle lies strictly to one side of the other.
    /// Shared edges count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right < other.left
            || self.left > other.right
            || self.bottom < other.top
            || self.top > other.bottom)
    }
}

/// One obstacle pair: a top segment hanging from the ceiling and a bottom
/// segment standing on the floor, separated by the tuning gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge.
    pub x: f64,
    pub width: f64,
    pub top_height: f64,
    pub bottom_height: f64,
    /// Whether this obstacle already added to the score.
    pub counted: bool,
}

impl Obstacle {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top_rect(&self) -> Rect {
        Rect {
            left: self.x,
            right: self.right(),
            top: 0.0,
            bottom: self.top_height,
        }
    }

    /// The bottom segment always reaches the current viewport floor, even if
    /// the viewport grew since the obstacle was spawned.
    pub fn bottom_rect(&self, gap: f64, viewport_height: f64) -> Rect {
        Rect {
            left: self.x,
            right: self.right(),
            top: self.top_height + gap,
            bottom: viewport_height,
        }
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    Obstacle,
    Ground,
    Ceiling,
    /// Strict-bounds variant: the hitbox touched the viewport edge.
    ViewportEdge,
}

/// What happened during one tick. The `over` flag on the session remains the
/// source of truth; this is for logging and presentation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickEvents {
    pub spawned: bool,
    pub scored: u32,
    pub crash: Option<CrashCause>,
}

/// The whole mutable state of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub tuning: Tuning,
    /// Vertical position of the actor's top edge.
    pub actor_y: f64,
    /// Oldest first.
    pub obstacles: Vec<Obstacle>,
    /// Background offset; decreases without bound while the run is live.
    pub scroll_offset: f64,
    pub score: u32,
    /// Ticks since the last spawn.
    pub cadence_counter: u32,
    /// Terminal flag. Ticks are no-ops while set.
    pub over: bool,
    /// Set on the tick that ended the run.
    pub crash: Option<CrashCause>,
}

impl GameSession {
    pub fn new(tuning: Tuning, viewport: ViewportSize) -> Self {
        Self {
            tuning,
            actor_y: tuning.start_position.resolve(viewport),
            obstacles: Vec::new(),
            scroll_offset: 0.0,
            score: 0,
            cadence_counter: 0,
            over: false,
            crash: None,
        }
    }

    /// The actor's hitbox, top aligned down to a whole unit.
    pub fn actor_rect(&self) -> Rect {
        let top = self.actor_y.floor();
        let left = self.tuning.actor_x;
        Rect {
            left,
            right: left + self.tuning.actor_width,
            top,
            bottom: top + self.tuning.actor_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(left: f64, right: f64, top: f64, bottom: f64) -> Rect {
        Rect {
            left,
            right,
            top,
            bottom,
        }
    }

    fn original_session() -> GameSession {
        GameSession::new(Preset::Original.tuning(), ViewportSize::new(800.0, 600.0))
    }

    #[test]
    fn test_preset_from_name() {
        assert_eq!(Preset::from_name("original"), Some(Preset::Original));
        assert_eq!(Preset::from_name(" Revised "), Some(Preset::Revised));
        assert_eq!(Preset::from_name("hard"), None);
    }

    #[test]
    fn test_original_preset_constants() {
        let t = Preset::Original.tuning();
        assert_eq!(t.gravity, 9.0);
        assert_eq!(t.jump_impulse, 1000.0);
        assert_eq!(t.obstacle_width, 60.0);
        assert_eq!(t.obstacle_gap, 300.0);
        assert_eq!(t.spawn_cadence, 300);
        assert_eq!(t.start_position, StartPosition::Fixed(250.0));
        assert!(!t.snap_on_collision);
        assert!(!t.strict_bounds);
    }

    #[test]
    fn test_start_position_resolve() {
        let vp = ViewportSize::new(800.0, 600.0);
        assert_eq!(StartPosition::Fixed(250.0).resolve(vp), 250.0);
        assert_eq!(StartPosition::HalfViewport.resolve(vp), 300.0);
    }

    #[test]
    fn test_new_session_defaults() {
        let session = original_session();
        assert_eq!(session.actor_y, 250.0);
        assert!(session.obstacles.is_empty());
        assert_eq!(session.score, 0);
        assert_eq!(session.cadence_counter, 0);
        assert!(!session.over);
        assert!(session.crash.is_none());
    }

    #[test]
    fn test_rect_overlap_shared_edge() {
        let a = rect(0.0, 10.0, 0.0, 10.0);
        let b = rect(10.0, 20.0, 10.0, 20.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_rect_overlap_separated() {
        let a = rect(0.0, 10.0, 0.0, 10.0);
        let right = rect(10.5, 20.0, 0.0, 10.0);
        let below = rect(0.0, 10.0, 10.5, 20.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_actor_rect_aligns_top() {
        let mut session = original_session();
        session.actor_y = 120.7;
        let r = session.actor_rect();
        assert_eq!(r.top, 120.0);
        assert_eq!(r.bottom, 220.0);
        assert_eq!(r.left, 100.0);
        assert_eq!(r.right, 200.0);
    }

    #[test]
    fn test_obstacle_rects() {
        let obs = Obstacle {
            x: 500.0,
            width: 60.0,
            top_height: 100.0,
            bottom_height: 200.0,
            counted: false,
        };
        let top = obs.top_rect();
        assert_eq!((top.top, top.bottom, top.right), (0.0, 100.0, 560.0));
        let bottom = obs.bottom_rect(300.0, 600.0);
        assert_eq!((bottom.top, bottom.bottom), (400.0, 600.0));
    }
}
