//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only through the `dt` passed to `tick`
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::{Clock, clamp_dt};
pub use collision::{Rect, obstacle_passed, player_hits_obstacle};
pub use state::{
    Cloud, Confetti, Effect, GameMode, GameOverReason, GameState, Goal, MAX_PARTICLES, Obstacle,
    ObstacleKind, Player, SpriteKind, SpriteSizes, Viewport,
};
pub use tick::{Action, TickInput, apply_action, start_run, tick};
