//! Obstacle course and cloud layout
//!
//! All randomness comes through the `rng` argument so a seeded source gives a
//! reproducible course.

use glam::Vec2;
use rand::Rng;

use super::state::{Cloud, Obstacle, ObstacleKind, SpriteSizes, Viewport};
use crate::config::GameConfig;
use crate::consts::*;

/// Draw the kinds for one run
///
/// With both kinds enabled, every run contains at least one of each: if the
/// draw missed a kind, index 0 is forced to ground and index 1 to flying.
pub fn obstacle_sequence<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Vec<ObstacleKind> {
    let total = config.total_obstacles as usize;
    let ground = config.allows(ObstacleKind::Ground);
    let flying = config.allows(ObstacleKind::Flying);

    let mut kinds: Vec<ObstacleKind> = (0..total)
        .map(|_| match (ground, flying) {
            (true, true) => {
                if rng.random_bool(config.ground_weight) {
                    ObstacleKind::Ground
                } else {
                    ObstacleKind::Flying
                }
            }
            (false, true) => ObstacleKind::Flying,
            _ => ObstacleKind::Ground,
        })
        .collect();

    if ground && flying {
        if !kinds.contains(&ObstacleKind::Ground) && total > 0 {
            kinds[0] = ObstacleKind::Ground;
        }
        if !kinds.contains(&ObstacleKind::Flying) && total > 1 {
            kinds[1] = ObstacleKind::Flying;
        }
    }

    kinds
}

/// Lay out a full course, left to right, starting just off the right edge
pub fn build_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GameConfig,
    viewport: &Viewport,
    sprites: &SpriteSizes,
) -> Vec<Obstacle> {
    let kinds = obstacle_sequence(rng, config);
    let mut obstacles = Vec::with_capacity(kinds.len());
    let mut x = viewport.width + SPAWN_OFFSET;

    for kind in kinds {
        let size = sprites.get(kind.sprite());
        obstacles.push(Obstacle::new(kind, x, size, viewport.ground_y));
        x += BASE_GAP + rng.random::<f32>() * GAP_JITTER;
    }

    log::debug!(
        "Built course of {} obstacles ({} flying)",
        obstacles.len(),
        obstacles.iter().filter(|o| o.kind == ObstacleKind::Flying).count()
    );

    obstacles
}

/// Scatter the background clouds across the sky
pub fn build_clouds<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport) -> Vec<Cloud> {
    (0..CLOUD_COUNT)
        .map(|_| Cloud {
            pos: Vec2::new(
                rng.random::<f32>() * viewport.width,
                20.0 + rng.random::<f32>() * 80.0,
            ),
            size: Vec2::new(
                60.0 + rng.random::<f32>() * 40.0,
                20.0 + rng.random::<f32>() * 10.0,
            ),
            speed: rng.random::<f32>() * 0.4,
        })
        .collect()
}

/// Send a cloud back in from the right edge at a new height
pub fn respawn_cloud<R: Rng + ?Sized>(cloud: &mut Cloud, rng: &mut R, viewport: &Viewport) {
    cloud.pos.x = viewport.width + rng.random::<f32>() * CLOUD_RESPAWN_JITTER;
    cloud.pos.y = 20.0 + rng.random::<f32>() * 80.0;
}
