//! Demo mode
//!
//! Plays the game through the same actions a player would press. Decisions
//! come from forward-simulating the player with the real physics and
//! collision code, so the autopilot never knows more than the rules allow.

use super::clock::clamp_dt;
use super::collision::first_collision;
use super::physics;
use super::state::{GameMode, GameState, Obstacle};
use super::tick::{TickInput, deflect_target, tick};

/// Extra ticks simulated after a predicted landing
const LANDING_SLACK: usize = 2;
/// Obstacles farther ahead than this are ignored when planning
const LOOKAHEAD_PX: f32 = 400.0;

/// Pick this tick's actions
pub fn autopilot(state: &GameState, dt: f32) -> TickInput {
    let mut input = TickInput::default();
    match state.mode {
        GameMode::Start => input.start = true,
        GameMode::Running => {
            if deflect_target(state).is_some() {
                input.deflect = true;
            } else if state.player.grounded && should_jump(state, dt) {
                input.jump = true;
            }
        }
        _ => {}
    }
    input
}

/// Jump on the first tick where a jump clears everything that staying on the
/// ground would run into
fn should_jump(state: &GameState, dt: f32) -> bool {
    let dt = clamp_dt(dt).max(0.25);
    let config = &state.config;
    let airtime = (2.0 * -config.jump_velocity / config.gravity / dt).ceil() as usize;
    let horizon = airtime + LANDING_SLACK;

    survives(state, false, dt, horizon).is_none() && survives(state, true, dt, horizon).is_some()
}

/// Play `steps` ticks forward on a copy; `Some(())` if nothing was hit
fn survives(state: &GameState, jump: bool, dt: f32, steps: usize) -> Option<()> {
    let mut player = state.player.clone();
    let reach = player.pos.x + LOOKAHEAD_PX;
    let mut obstacles: Vec<Obstacle> = state
        .obstacles
        .iter()
        .filter(|o| !o.cleared && !o.remove && o.pos.x < reach)
        .cloned()
        .collect();

    if jump {
        player.jump(state.config.jump_velocity);
    }

    for _ in 0..steps {
        physics::integrate_player(
            &mut player,
            state.config.gravity,
            state.viewport.ground_y,
            dt,
        );
        for obstacle in &mut obstacles {
            physics::scroll_obstacle(obstacle, state.config.scroll_speed, dt);
        }
        if first_collision(&player, &obstacles).is_some() {
            return None;
        }
    }
    Some(())
}

/// Run the autopilot until the session ends or `max_ticks` pass.
/// Returns the number of ticks simulated.
pub fn play_out(state: &mut GameState, dt: f32, max_ticks: u64) -> u64 {
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut ticks = 0;
    while ticks < max_ticks {
        tick(state, &input, dt);
        ticks += 1;
        if state.mode.is_over() {
            break;
        }
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, Variant};
    use crate::sim::state::ObstacleKind;
    use crate::sim::tick::start_run;

    #[test]
    fn test_presses_start_on_title() {
        let state = GameState::new(1, GameConfig::default());
        let input = autopilot(&state, 1.0);
        assert!(input.start);
        assert!(!input.jump);
    }

    #[test]
    fn test_idle_when_over() {
        let mut state = GameState::new(1, GameConfig::default());
        start_run(&mut state);
        state.mode = GameMode::Win;
        let input = autopilot(&state, 1.0);
        assert!(!input.start && !input.jump && !input.deflect);
    }

    #[test]
    fn test_waits_while_course_is_far() {
        let mut state = GameState::new(3, GameConfig::default());
        start_run(&mut state);
        // Fresh course starts off screen
        assert!(!autopilot(&state, 1.0).jump);
    }

    #[test]
    fn test_deflects_crow_in_reach() {
        let mut state = GameState::new(3, GameConfig::default());
        start_run(&mut state);
        let size = state.sprites.flying;
        let x = state.player.pos.x + 60.0;
        state.obstacles = vec![Obstacle::new(ObstacleKind::Flying, x, size, state.viewport.ground_y)];
        assert!(autopilot(&state, 1.0).deflect);
    }

    #[test]
    fn test_wins_classic_run() {
        let mut state = GameState::new(2024, Variant::Classic.config());
        play_out(&mut state, 1.0, 10_000);
        assert_eq!(state.mode, GameMode::Win);
        assert_eq!(state.cleared, state.total());
    }

    #[test]
    fn test_wins_jump_only_run() {
        for seed in [1, 2, 3] {
            let mut state = GameState::new(seed, Variant::JumpOnly.config());
            play_out(&mut state, 1.0, 10_000);
            assert_eq!(state.mode, GameMode::Win, "seed {seed}");
        }
    }

    #[test]
    fn test_wins_finale_run() {
        let mut state = GameState::new(8, Variant::Finale.config());
        play_out(&mut state, 1.0, 10_000);
        assert_eq!(state.mode, GameMode::Win);
        assert!(state.goal.is_some());
    }
}
