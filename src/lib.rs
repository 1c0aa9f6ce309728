//! Quokka Run - A tiny side-scrolling birthday runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, game modes)
//! - `renderer`: Immediate-mode 2D drawing over an abstract surface
//! - `ui`: Score counter and overlay text for each mode
//! - `config`: Variant presets and JSON overrides
//! - `input`: Keyboard bindings

pub mod config;
pub mod input;
pub mod renderer;
pub mod sim;
pub mod ui;

pub use config::{GameConfig, Variant};

/// Game configuration constants
///
/// Distances are in canvas pixels, speeds in pixels per nominal frame.
pub mod consts {
    /// Duration of one nominal frame (60 Hz) in milliseconds
    pub const NOMINAL_FRAME_MS: f64 = 16.67;
    /// Largest delta-time a single tick may integrate (in nominal frames)
    pub const MAX_DT: f32 = 2.0;

    /// Viewport dimensions
    pub const VIEWPORT_MIN_WIDTH: f32 = 360.0;
    pub const VIEWPORT_MAX_WIDTH: f32 = 900.0;
    pub const VIEWPORT_HEIGHT: f32 = 320.0;
    /// Share of the window width the canvas tries to occupy
    pub const VIEWPORT_FILL: f32 = 0.92;
    /// Ground line sits this far above the bottom edge
    pub const GROUND_OFFSET: f32 = 50.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 90.0;

    /// Default physics (classic preset)
    pub const GRAVITY: f32 = 0.7;
    pub const JUMP_VELOCITY: f32 = -13.2;
    pub const SCROLL_SPEED: f32 = 2.9;
    pub const TOTAL_OBSTACLES: u32 = 10;
    /// Probability that a randomly drawn obstacle is a ground obstacle
    pub const GROUND_WEIGHT: f64 = 0.55;

    /// Obstacle layout
    pub const SPAWN_OFFSET: f32 = 160.0;
    pub const BASE_GAP: f32 = 220.0;
    pub const GAP_JITTER: f32 = 120.0;
    /// Height of flying obstacles above the ground line
    pub const FLYING_ALTITUDE: f32 = 26.0;
    /// Obstacles are culled once their right edge passes this x
    pub const OFFSCREEN_CULL_X: f32 = -50.0;

    /// Collision tuning
    pub const GROUND_PAD: f32 = 4.0;
    pub const FLYING_PAD: f32 = 6.0;
    /// How far behind the player's left edge an obstacle must be to count
    pub const CLEAR_MARGIN: f32 = 6.0;

    /// Deflect reach (ahead of / behind the player's x)
    pub const DEFLECT_RANGE: f32 = 90.0;
    pub const DEFLECT_BEHIND: f32 = 5.0;

    /// Sparkle effects
    pub const EFFECT_TTL: f32 = 18.0;
    pub const EFFECT_DECAY: f32 = 1.3;

    /// Clouds
    pub const CLOUD_COUNT: usize = 5;
    pub const CLOUD_PARALLAX: f32 = 0.35;
    pub const CLOUD_WRAP_X: f32 = -40.0;
    pub const CLOUD_RESPAWN_JITTER: f32 = 120.0;

    /// Finish approach
    pub const GOAL_DISTANCE: f32 = 140.0;
    pub const GOAL_WIDTH: f32 = 28.0;
    pub const GOAL_HEIGHT: f32 = 56.0;
    pub const WALK_SPEED_FACTOR: f32 = 1.5;

    /// Win celebration
    pub const CONFETTI_BURST: usize = 90;
    pub const CONFETTI_TTL: f32 = 150.0;
    pub const CONFETTI_GRAVITY: f32 = 0.08;
}

/// Canvas width for a given window width, clamped to the supported range
#[inline]
pub fn viewport_width_for_window(window_width: f32) -> f32 {
    clamp_viewport_width(window_width * consts::VIEWPORT_FILL).floor()
}

/// Clamp a requested canvas width to the supported range
#[inline]
pub fn clamp_viewport_width(width: f32) -> f32 {
    if width.is_nan() {
        return consts::VIEWPORT_MIN_WIDTH;
    }
    width.clamp(consts::VIEWPORT_MIN_WIDTH, consts::VIEWPORT_MAX_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_width_clamped() {
        assert_eq!(viewport_width_for_window(100.0), 360.0);
        assert_eq!(viewport_width_for_window(5000.0), 900.0);
        assert_eq!(viewport_width_for_window(500.0), 460.0);
        assert_eq!(clamp_viewport_width(f32::NAN), 360.0);
    }
}
