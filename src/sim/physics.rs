//! Per-tick integration
//!
//! `dt` is measured in nominal frames (1.0 = 16.67 ms). Semi-implicit Euler:
//! velocity first, then position.

use rand::Rng;

use super::spawner;
use super::state::{Cloud, Confetti, Effect, Obstacle, Player, Viewport};
use crate::consts::*;

/// Gravity, vertical motion and the ground clamp
pub fn integrate_player(player: &mut Player, gravity: f32, ground_y: f32, dt: f32) {
    player.vel_y += gravity * dt;
    player.pos.y += player.vel_y * dt;

    let rest_y = ground_y - player.size.y;
    if player.pos.y >= rest_y {
        player.pos.y = rest_y;
        player.vel_y = 0.0;
        player.grounded = true;
    } else {
        player.grounded = false;
    }
}

/// Pure horizontal scroll
#[inline]
pub fn scroll_obstacle(obstacle: &mut Obstacle, speed: f32, dt: f32) {
    obstacle.pos.x -= speed * dt;
}

/// Drop consumed obstacles and the ones well past the left edge
pub fn cull_obstacles(obstacles: &mut Vec<Obstacle>) {
    obstacles.retain(|o| !o.remove && o.right() > OFFSCREEN_CULL_X);
}

/// Parallax drift; clouds that leave on the left re-enter on the right
pub fn drift_clouds<R: Rng + ?Sized>(
    clouds: &mut [Cloud],
    scroll_speed: f32,
    viewport: &Viewport,
    rng: &mut R,
    dt: f32,
) {
    for cloud in clouds.iter_mut() {
        cloud.pos.x -= (scroll_speed * CLOUD_PARALLAX + cloud.speed) * dt;
        if cloud.pos.x + cloud.size.x < CLOUD_WRAP_X {
            spawner::respawn_cloud(cloud, rng, viewport);
        }
    }
}

/// Fade sparkles and drop expired ones
pub fn update_effects(effects: &mut Vec<Effect>, dt: f32) {
    for effect in effects.iter_mut() {
        effect.ttl -= dt * EFFECT_DECAY;
    }
    effects.retain(|e| e.ttl > 0.0);
}

/// Tumble confetti under light gravity and air drag
pub fn update_confetti(confetti: &mut Vec<Confetti>, viewport: &Viewport, dt: f32) {
    let drag = (1.0 - 0.01 * dt).max(0.0);
    for piece in confetti.iter_mut() {
        piece.vel.y += CONFETTI_GRAVITY * dt;
        piece.vel.x *= drag;
        piece.pos += piece.vel * dt;
        piece.rotation += piece.spin * dt;
        piece.ttl -= dt;
    }
    let floor = viewport.height + 20.0;
    confetti.retain(|c| c.ttl > 0.0 && c.pos.y < floor);
}
