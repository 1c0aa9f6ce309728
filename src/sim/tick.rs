//! Simulation tick and mode transitions
//!
//! Core game loop that advances the session by one frame. Hosts call `tick`
//! from whatever scheduler they have (browser frame callback, fixed-step
//! harness) with the actions gathered since the previous call.

use glam::Vec2;
use rand::Rng;

use super::autopilot;
use super::clock::clamp_dt;
use super::collision::{obstacle_passed, player_hits_obstacle};
use super::physics;
use super::state::{
    Confetti, Effect, GameMode, GameOverReason, GameState, Goal, MAX_PARTICLES, ObstacleKind,
};
use crate::consts::*;

/// Discrete player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Jump,
    Deflect,
    /// Start from the title screen or restart after a finished run
    Start,
}

/// Actions gathered for a single tick (edge-triggered, last state wins)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub jump: bool,
    pub deflect: bool,
    pub start: bool,
    /// Demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    pub fn press(&mut self, action: Action) {
        match action {
            Action::Jump => self.jump = true,
            Action::Deflect => self.deflect = true,
            Action::Start => self.start = true,
        }
    }

    /// Pending actions in application order
    pub fn actions(&self) -> impl Iterator<Item = Action> {
        [
            (self.jump, Action::Jump),
            (self.deflect, Action::Deflect),
            (self.start, Action::Start),
        ]
        .into_iter()
        .filter_map(|(pressed, action)| pressed.then_some(action))
    }

    /// Clear one-shot actions after they were processed
    pub fn clear_actions(&mut self) {
        self.jump = false;
        self.deflect = false;
        self.start = false;
    }
}

/// Advance the session by one frame
///
/// Pending actions are applied first. `dt` is in nominal frames and is
/// clamped before any integration.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = clamp_dt(dt);

    let mut input = input.clone();
    if input.idle_mode {
        let auto = autopilot::autopilot(state, dt);
        input.jump |= auto.jump;
        input.deflect |= auto.deflect;
        input.start |= auto.start;
    }

    for action in input.actions() {
        apply_action(state, action);
    }

    match state.mode {
        GameMode::Start | GameMode::GameOver { .. } => return,
        GameMode::Running => update_running(state, dt),
        GameMode::Finish => update_finish(state, dt),
        GameMode::Win => {}
    }

    state.time_ticks += 1;
    update_ambient(state, dt);
}

/// Apply one action immediately; returns whether it did anything.
///
/// Actions that make no sense in the current mode are ignored, except that a
/// jump on the title screen also starts the run.
pub fn apply_action(state: &mut GameState, action: Action) -> bool {
    match action {
        Action::Jump => {
            let mut acted = false;
            if state.mode == GameMode::Start {
                start_run(state);
                acted = true;
            }
            if state.mode == GameMode::Running {
                acted |= state.player.jump(state.config.jump_velocity);
            }
            acted
        }
        Action::Deflect => try_deflect(state),
        Action::Start => match state.mode {
            GameMode::Start | GameMode::GameOver { .. } | GameMode::Win => {
                start_run(state);
                true
            }
            GameMode::Running | GameMode::Finish => false,
        },
    }
}

/// Enter `Running` with a fresh course
pub fn start_run(state: &mut GameState) {
    state.reset_run();
    state.mode = GameMode::Running;
    log::info!(
        "Run started: {} obstacles, deflect={}, finish={}",
        state.total(),
        state.config.has_deflect_action,
        state.config.has_finish_approach
    );
}

/// Index of the flying obstacle a deflect would hit, nearest first
pub fn deflect_target(state: &GameState) -> Option<usize> {
    if state.mode != GameMode::Running || !state.config.has_deflect_action {
        return None;
    }
    let px = state.player.pos.x;
    state
        .obstacles
        .iter()
        .enumerate()
        .filter(|(_, o)| {
            o.kind == ObstacleKind::Flying
                && !o.cleared
                && !o.remove
                && o.pos.x < px + DEFLECT_RANGE
                && o.right() > px - DEFLECT_BEHIND
        })
        .min_by(|(_, a), (_, b)| {
            (a.pos.x - px)
                .abs()
                .partial_cmp(&(b.pos.x - px).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
}

/// Swat the nearest flying obstacle in reach
fn try_deflect(state: &mut GameState) -> bool {
    let Some(index) = deflect_target(state) else {
        return false;
    };
    state.obstacles[index].remove = true;
    log::debug!("Deflected obstacle at x={:.1}", state.obstacles[index].pos.x);
    register_clear(state, index);
    true
}

/// Count an obstacle once and check the target
fn register_clear(state: &mut GameState, index: usize) {
    let obstacle = &mut state.obstacles[index];
    if obstacle.cleared {
        return;
    }
    obstacle.cleared = true;
    let center = obstacle.center();

    state.cleared += 1;
    state.effects.push(Effect::new(center));
    log::debug!("Cleared {}/{}", state.cleared, state.total());

    if state.cleared >= state.total() {
        reach_target(state);
    }
}

fn reach_target(state: &mut GameState) {
    if state.config.has_finish_approach {
        enter_finish(state);
    } else {
        win(state);
    }
}

/// Place the goal ahead of the player and start walking
fn enter_finish(state: &mut GameState) {
    let size = Vec2::new(GOAL_WIDTH, GOAL_HEIGHT);
    let max_x = state.viewport.width - GOAL_WIDTH - 10.0;
    let x = (state.player.rect().right() + GOAL_DISTANCE).min(max_x);
    state.goal = Some(Goal {
        pos: Vec2::new(x, state.viewport.ground_y - size.y),
        size,
    });
    state.mode = GameMode::Finish;
    log::info!("Target reached, heading for the goal");
}

fn win(state: &mut GameState) {
    state.mode = GameMode::Win;
    spawn_confetti(state);
    log::info!("Run won after {} ticks", state.time_ticks);
}

fn game_over(state: &mut GameState, reason: GameOverReason) {
    state.mode = GameMode::GameOver { reason };
    log::info!("Game over ({:?}) with {}/{} cleared", reason, state.cleared, state.total());
}

/// Celebration burst from the top middle of the screen
fn spawn_confetti(state: &mut GameState) {
    let origin = Vec2::new(state.viewport.width / 2.0, state.viewport.height * 0.3);
    let rng = &mut state.rng;

    for _ in 0..CONFETTI_BURST {
        if state.confetti.len() >= MAX_PARTICLES {
            state.confetti.remove(0);
        }
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed: f32 = rng.random_range(2.0..8.0);
        state.confetti.push(Confetti {
            pos: origin + Vec2::new(rng.random_range(-40.0..40.0), 0.0),
            vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - 3.0),
            ttl: CONFETTI_TTL * rng.random_range(0.6f32..1.0),
            size: rng.random_range(3.0..7.0),
            rotation: rng.random_range(0.0..std::f32::consts::TAU),
            spin: rng.random_range(-0.3..0.3),
            color: rng.random_range(0..5),
        });
    }
}

fn update_running(state: &mut GameState, dt: f32) {
    let speed = state.config.scroll_speed;
    physics::integrate_player(&mut state.player, state.config.gravity, state.viewport.ground_y, dt);

    for i in 0..state.obstacles.len() {
        let obstacle = &mut state.obstacles[i];
        physics::scroll_obstacle(obstacle, speed, dt);
        if obstacle.cleared || obstacle.remove {
            continue;
        }

        if player_hits_obstacle(&state.player, obstacle) {
            let reason = GameOverReason::from(obstacle.kind);
            game_over(state, reason);
            break;
        }

        if obstacle_passed(&state.player, obstacle) {
            register_clear(state, i);
            if state.mode != GameMode::Running {
                break;
            }
        }
    }

    physics::cull_obstacles(&mut state.obstacles);
}

fn update_finish(state: &mut GameState, dt: f32) {
    let speed = state.config.scroll_speed;
    physics::integrate_player(&mut state.player, state.config.gravity, state.viewport.ground_y, dt);
    state.player.pos.x += speed * WALK_SPEED_FACTOR * dt;

    for obstacle in &mut state.obstacles {
        physics::scroll_obstacle(obstacle, speed, dt);
    }
    physics::cull_obstacles(&mut state.obstacles);

    let touched = state
        .goal
        .as_ref()
        .is_some_and(|goal| state.player.rect().overlaps(&goal.rect()));
    if touched {
        win(state);
    }
}

/// Decorations that keep moving while the run is live or celebrating
fn update_ambient(state: &mut GameState, dt: f32) {
    physics::drift_clouds(
        &mut state.clouds,
        state.config.scroll_speed,
        &state.viewport,
        &mut state.rng,
        dt,
    );
    physics::update_effects(&mut state.effects, dt);
    physics::update_confetti(&mut state.confetti, &state.viewport, dt);
}
