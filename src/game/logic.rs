//! Per-tick game update, obstacle generation, collision, and input handling.

use super::types::{CrashCause, GameSession, Obstacle, TickEvents, Tuning, ViewportSize};
use rand::Rng;

/// Input actions understood by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Space or Up.
    Jump,
    /// R.
    Restart,
    /// Esc, q or Ctrl-C. Handled by the host; ignored here.
    Quit,
    /// Any other key.
    Other,
}

/// Apply one key press to the session.
///
/// Jump is an instant position offset, not a velocity change, so repeated
/// presses stack. Restart works whether or not the run is over.
pub fn process_input(session: &mut GameSession, input: GameInput, viewport: ViewportSize) {
    match input {
        GameInput::Jump => {
            if !session.over {
                session.actor_y -= session.tuning.jump_impulse;
            }
        }
        GameInput::Restart => restart(session, viewport),
        GameInput::Quit | GameInput::Other => {}
    }
}

/// Reset every field of the session and clear the terminal flag.
pub fn restart(session: &mut GameSession, viewport: ViewportSize) {
    session.actor_y = session.tuning.start_position.resolve(viewport);
    session.obstacles.clear();
    session.cadence_counter = 0;
    session.scroll_offset = 0.0;
    session.score = 0;
    session.over = false;
    session.crash = None;
    tracing::info!(actor_y = session.actor_y, "session restarted");
}

/// Advance the session by one frame. No-op once the run is over.
pub fn process_tick<R: Rng>(
    session: &mut GameSession,
    viewport: ViewportSize,
    rng: &mut R,
) -> TickEvents {
    let mut events = TickEvents::default();
    if session.over {
        return events;
    }

    let step = session.tuning.scroll_step;
    session.scroll_offset -= step;

    // Gravity goes straight into position; there is no velocity to carry.
    session.actor_y += session.tuning.gravity;

    for obs in &mut session.obstacles {
        obs.x -= step;
    }
    session.obstacles.retain(|obs| obs.right() > 0.0);

    session.cadence_counter += 1;
    if session.cadence_counter >= session.tuning.spawn_cadence {
        let obs = generate_obstacle(&session.tuning, viewport, rng);
        tracing::debug!(
            x = obs.x,
            top_height = obs.top_height,
            bottom_height = obs.bottom_height,
            "obstacle spawned"
        );
        session.obstacles.push(obs);
        session.cadence_counter = 0;
        events.spawned = true;
    }

    events.scored = score_passed(session);

    if check_collision(session, viewport) {
        events.crash = session.crash;
    }

    if let Some(cause) = check_bounds(session, viewport) {
        session.over = true;
        session.crash = session.crash.or(Some(cause));
        events.crash = events.crash.or(Some(cause));
    }

    events
}

/// Build a new obstacle at the right edge with a random vertical split.
///
/// The top segment height is a whole number drawn uniformly from
/// `[min, viewport_height - gap - min]`. If the viewport is too short for
/// that range, the minimum is used.
pub fn generate_obstacle<R: Rng>(
    tuning: &Tuning,
    viewport: ViewportSize,
    rng: &mut R,
) -> Obstacle {
    let min_height = tuning.min_segment_height.floor();
    let max_height = (viewport.height - tuning.obstacle_gap - tuning.min_segment_height).floor();

    let top_height = if max_height > min_height {
        rng.gen_range(min_height as i64..=max_height as i64) as f64
    } else {
        min_height
    };
    let bottom_height = (viewport.height - top_height - tuning.obstacle_gap).max(0.0);

    Obstacle {
        x: viewport.width,
        width: tuning.obstacle_width,
        top_height,
        bottom_height,
        counted: false,
    }
}

/// Count every obstacle whose right edge has passed the actor. Each obstacle
/// scores at most once. Returns the number of new points.
pub fn score_passed(session: &mut GameSession) -> u32 {
    let actor_x = session.tuning.actor_x;
    let mut gained = 0;
    for obs in &mut session.obstacles {
        if !obs.counted && obs.right() < actor_x {
            obs.counted = true;
            gained += 1;
        }
    }
    if gained > 0 {
        session.score += gained;
        tracing::debug!(score = session.score, "obstacle passed");
    }
    gained
}

/// Test the actor hitbox against each obstacle, oldest first, stopping at the
/// first hit. Returns true and ends the run on a hit.
pub fn check_collision(session: &mut GameSession, viewport: ViewportSize) -> bool {
    let actor = session.actor_rect();
    let gap = session.tuning.obstacle_gap;

    let hit = session.obstacles.iter().any(|obs| {
        actor.overlaps(&obs.top_rect()) || actor.overlaps(&obs.bottom_rect(gap, viewport.height))
    });

    let cause = if hit {
        Some(CrashCause::Obstacle)
    } else if session.tuning.strict_bounds
        && (actor.top <= 0.0 || actor.bottom >= viewport.height)
    {
        Some(CrashCause::ViewportEdge)
    } else {
        None
    };

    match cause {
        Some(cause) => {
            if session.tuning.snap_on_collision {
                session.actor_y = actor.top;
            }
            session.over = true;
            session.crash = session.crash.or(Some(cause));
            true
        }
        None => false,
    }
}

/// Ground and ceiling check on the raw actor position. Independent of
/// obstacle collision. Does not mutate the session.
pub fn check_bounds(session: &GameSession, viewport: ViewportSize) -> Option<CrashCause> {
    if session.actor_y >= viewport.height - session.tuning.ground_margin {
        Some(CrashCause::Ground)
    } else if session.actor_y <= 0.0 {
        Some(CrashCause::Ceiling)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{Preset, StartPosition};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const VIEWPORT: ViewportSize = ViewportSize {
        width: 1000.0,
        height: 800.0,
    };

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn original_session() -> GameSession {
        GameSession::new(Preset::Original.tuning(), VIEWPORT)
    }

    fn obstacle_at(x: f64, top_height: f64) -> Obstacle {
        Obstacle {
            x,
            width: 60.0,
            top_height,
            bottom_height: VIEWPORT.height - top_height - 300.0,
            counted: false,
        }
    }

    #[test]
    fn test_gravity_moves_actor_down_without_velocity() {
        let mut session = original_session();
        let mut rng = create_test_rng();
        process_tick(&mut session, VIEWPORT, &mut rng);
        assert_eq!(session.actor_y, 259.0);
        process_tick(&mut session, VIEWPORT, &mut rng);
        // Constant offset per tick, no acceleration build-up.
        assert_eq!(session.actor_y, 268.0);
    }

    #[test]
    fn test_scroll_offset_and_obstacles_move_by_step() {
        let mut session = original_session();
        session.obstacles.push(obstacle_at(700.0, 100.0));
        let mut rng = create_test_rng();
        for i in 1..=5 {
            process_tick(&mut session, VIEWPORT, &mut rng);
            assert_eq!(session.scroll_offset, -2.0 * i as f64);
            assert_eq!(session.obstacles[0].x, 700.0 - 2.0 * i as f64);
        }
    }

    #[test]
    fn test_offscreen_obstacle_dropped() {
        let mut session = original_session();
        // Right edge at 1.0, moves to -1.0 this tick.
        let mut obs = obstacle_at(-59.0, 100.0);
        obs.counted = true;
        session.obstacles.push(obs);
        let mut rng = create_test_rng();
        process_tick(&mut session, VIEWPORT, &mut rng);
        assert!(session.obstacles.is_empty());
    }

    #[test]
    fn test_right_edge_at_zero_is_dropped() {
        let mut session = original_session();
        let mut obs = obstacle_at(-58.0, 100.0);
        obs.counted = true;
        session.obstacles.push(obs);
        let mut rng = create_test_rng();
        process_tick(&mut session, VIEWPORT, &mut rng);
        assert!(session.obstacles.is_empty());
    }

    #[test]
    fn test_no_spawn_before_cadence() {
        let mut session = original_session();
        session.tuning.gravity = 0.0;
        let mut rng = create_test_rng();
        for _ in 0..299 {
            let events = process_tick(&mut session, VIEWPORT, &mut rng);
            assert!(!events.spawned);
        }
        assert!(session.obstacles.is_empty());
        assert_eq!(session.cadence_counter, 299);
    }

    #[test]
    fn test_spawn_on_cadence_resets_counter() {
        let mut session = original_session();
        session.tuning.gravity = 0.0;
        let mut rng = create_test_rng();
        for _ in 0..299 {
            process_tick(&mut session, VIEWPORT, &mut rng);
        }
        let events = process_tick(&mut session, VIEWPORT, &mut rng);
        assert!(events.spawned);
        assert_eq!(session.obstacles.len(), 1);
        assert_eq!(session.cadence_counter, 0);
        assert_eq!(session.obstacles[0].x, VIEWPORT.width);
    }

    #[test]
    fn test_generate_obstacle_within_range() {
        let tuning = Preset::Original.tuning();
        let mut rng = create_test_rng();
        for _ in 0..200 {
            let obs = generate_obstacle(&tuning, VIEWPORT, &mut rng);
            assert!(obs.top_height >= 50.0);
            assert!(obs.top_height <= 800.0 - 300.0 - 50.0);
            assert_eq!(obs.top_height.fract(), 0.0);
            assert_eq!(obs.top_height + obs.bottom_height + 300.0, 800.0);
            assert_eq!(obs.width, 60.0);
            assert!(!obs.counted);
        }
    }

    #[test]
    fn test_generate_obstacle_tiny_viewport_uses_minimum() {
        let tuning = Preset::Original.tuning();
        let mut rng = create_test_rng();
        let obs = generate_obstacle(&tuning, ViewportSize::new(400.0, 300.0), &mut rng);
        assert_eq!(obs.top_height, 50.0);
        assert_eq!(obs.bottom_height, 0.0);
    }

    #[test]
    fn test_score_counted_once() {
        let mut session = original_session();
        session.tuning.gravity = 0.0;
        session.actor_y = 400.0;
        // Wide-open gap so the actor (y 400..500) never touches either segment.
        session.tuning.obstacle_gap = 700.0;
        session.obstacles.push(Obstacle {
            x: 44.0,
            width: 60.0,
            top_height: 10.0,
            bottom_height: 0.0,
            counted: false,
        });
        let mut rng = create_test_rng();
        let mut total = 0;
        for _ in 0..10 {
            total += process_tick(&mut session, VIEWPORT, &mut rng).scored;
        }
        assert_eq!(total, 1);
        assert_eq!(session.score, 1);
        assert!(session.obstacles[0].counted);
    }

    #[test]
    fn test_score_threshold_is_strict() {
        let mut session = original_session();
        session.obstacles.push(obstacle_at(40.0, 100.0)); // right edge == actor_x
        assert_eq!(score_passed(&mut session), 0);
        session.obstacles[0].x = 39.5;
        assert_eq!(score_passed(&mut session), 1);
        assert_eq!(score_passed(&mut session), 0);
        assert_eq!(session.score, 1);
    }

    #[test]
    fn test_collision_shared_boundary_ends_run() {
        let mut session = original_session();
        session.actor_y = 100.0; // hitbox top exactly at the top segment's bottom edge
        session.obstacles.push(obstacle_at(200.0, 100.0)); // left edge == actor right edge
        assert!(check_collision(&mut session, VIEWPORT));
        assert!(session.over);
        assert_eq!(session.crash, Some(CrashCause::Obstacle));
    }

    #[test]
    fn test_collision_strictly_separated() {
        let mut session = original_session();
        session.actor_y = 250.0;
        session.obstacles.push(obstacle_at(201.0, 100.0));
        session.obstacles.push(obstacle_at(100.0, 100.0)); // gap 100..400 holds actor 250..350
        assert!(!check_collision(&mut session, VIEWPORT));
        assert!(!session.over);
    }

    #[test]
    fn test_collision_bottom_segment() {
        let mut session = original_session();
        session.actor_y = 350.0; // bottom at 450, gap ends at 400
        session.obstacles.push(obstacle_at(150.0, 100.0));
        assert!(check_collision(&mut session, VIEWPORT));
    }

    #[test]
    fn test_collision_snap_writes_hitbox_top() {
        let mut session = original_session();
        session.tuning.snap_on_collision = true;
        session.actor_y = 50.6;
        session.obstacles.push(obstacle_at(150.0, 100.0));
        assert!(check_collision(&mut session, VIEWPORT));
        assert_eq!(session.actor_y, 50.0);
    }

    #[test]
    fn test_strict_bounds_touching_edge() {
        let mut session = GameSession::new(Preset::Revised.tuning(), VIEWPORT);
        session.actor_y = VIEWPORT.height - session.tuning.actor_height;
        assert!(check_collision(&mut session, VIEWPORT));
        assert_eq!(session.crash, Some(CrashCause::ViewportEdge));

        let mut session = GameSession::new(Preset::Revised.tuning(), VIEWPORT);
        session.actor_y = 300.0;
        assert!(!check_collision(&mut session, VIEWPORT));
    }

    #[test]
    fn test_strict_bounds_touching_top_edge() {
        let mut session = GameSession::new(Preset::Revised.tuning(), VIEWPORT);
        // Hitbox top aligns down to 0.0, touching the ceiling.
        session.actor_y = 0.5;
        assert!(check_collision(&mut session, VIEWPORT));
        assert!(session.over);
        assert_eq!(session.crash, Some(CrashCause::ViewportEdge));
        assert_eq!(session.actor_y, 0.0);

        let mut session = GameSession::new(Preset::Revised.tuning(), VIEWPORT);
        session.actor_y = 1.0;
        assert!(!check_collision(&mut session, VIEWPORT));
    }

    #[test]
    fn test_loose_bounds_ignore_edge_touch() {
        let mut session = original_session();
        session.actor_y = 0.0;
        assert!(!check_collision(&mut session, VIEWPORT));
    }

    #[test]
    fn test_bounds_check() {
        let mut session = original_session();
        session.actor_y = VIEWPORT.height;
        assert_eq!(check_bounds(&session, VIEWPORT), Some(CrashCause::Ground));
        session.actor_y = VIEWPORT.height - 100.0;
        assert_eq!(check_bounds(&session, VIEWPORT), Some(CrashCause::Ground));
        session.actor_y = 0.0;
        assert_eq!(check_bounds(&session, VIEWPORT), Some(CrashCause::Ceiling));
        session.actor_y = -40.0;
        assert_eq!(check_bounds(&session, VIEWPORT), Some(CrashCause::Ceiling));
        session.actor_y = 400.0;
        assert_eq!(check_bounds(&session, VIEWPORT), None);
    }

    #[test]
    fn test_tick_ground_crash_freezes_state() {
        let mut session = original_session();
        session.actor_y = VIEWPORT.height;
        let mut rng = create_test_rng();
        let events = process_tick(&mut session, VIEWPORT, &mut rng);
        assert_eq!(events.crash, Some(CrashCause::Ground));
        assert!(session.over);

        let frozen = session.clone();
        let events = process_tick(&mut session, VIEWPORT, &mut rng);
        assert_eq!(events, TickEvents::default());
        assert_eq!(session, frozen);
    }

    #[test]
    fn test_first_obstacle_hit_wins_over_bounds() {
        let mut session = original_session();
        session.actor_y = -9.0; // ceiling after gravity
        session.obstacles.push(obstacle_at(150.0, 100.0));
        let mut rng = create_test_rng();
        let events = process_tick(&mut session, VIEWPORT, &mut rng);
        assert_eq!(events.crash, Some(CrashCause::Obstacle));
        assert_eq!(session.crash, Some(CrashCause::Obstacle));
    }

    #[test]
    fn test_jump_is_position_offset() {
        let mut session = original_session();
        session.tuning.jump_impulse = 30.0;
        process_input(&mut session, GameInput::Jump, VIEWPORT);
        process_input(&mut session, GameInput::Jump, VIEWPORT);
        assert_eq!(session.actor_y, 190.0);
    }

    #[test]
    fn test_jump_ignored_when_over() {
        let mut session = original_session();
        session.over = true;
        process_input(&mut session, GameInput::Jump, VIEWPORT);
        assert_eq!(session.actor_y, 250.0);
    }

    #[test]
    fn test_other_and_quit_ignored() {
        let mut session = original_session();
        let before = session.clone();
        process_input(&mut session, GameInput::Other, VIEWPORT);
        process_input(&mut session, GameInput::Quit, VIEWPORT);
        assert_eq!(session, before);
    }

    #[test]
    fn test_restart_clears_everything_when_over() {
        let mut session = original_session();
        session.score = 7;
        session.cadence_counter = 123;
        session.scroll_offset = -400.0;
        session.actor_y = 790.0;
        session.obstacles.push(obstacle_at(300.0, 100.0));
        session.over = true;
        session.crash = Some(CrashCause::Ground);

        process_input(&mut session, GameInput::Restart, VIEWPORT);

        assert_eq!(session, original_session());
    }

    #[test]
    fn test_restart_while_active_keeps_running() {
        let mut session = original_session();
        session.score = 3;
        session.cadence_counter = 50;
        restart(&mut session, VIEWPORT);
        assert!(!session.over);
        assert_eq!(session.score, 0);
        assert_eq!(session.cadence_counter, 0);
    }

    #[test]
    fn test_restart_half_viewport() {
        let mut tuning = Preset::Original.tuning();
        tuning.start_position = StartPosition::HalfViewport;
        let mut session = GameSession::new(tuning, VIEWPORT);
        session.actor_y = 10.0;
        restart(&mut session, ViewportSize::new(640.0, 480.0));
        assert_eq!(session.actor_y, 240.0);
    }
}
