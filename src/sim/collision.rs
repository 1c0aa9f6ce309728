//! Axis-aligned collision tests
//!
//! Everything in the runner is a box. Obstacles use a hitbox shrunk by a
//! per-kind padding so near misses read as misses.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Player};
use crate::consts::CLEAR_MARGIN;

/// Axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Shrink every side by `pad`
    pub fn inset(&self, pad: f32) -> Rect {
        Rect::new(
            self.x + pad,
            self.y + pad,
            self.w - 2.0 * pad,
            self.h - 2.0 * pad,
        )
    }

    /// Strict overlap (touching edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Player touches the obstacle's padded hitbox
pub fn player_hits_obstacle(player: &Player, obstacle: &Obstacle) -> bool {
    player.rect().overlaps(&obstacle.hitbox())
}

/// Obstacle's trailing edge is safely behind the player's leading edge
pub fn obstacle_passed(player: &Player, obstacle: &Obstacle) -> bool {
    obstacle.right() < player.pos.x - CLEAR_MARGIN
}

/// Index of the first uncleared obstacle the player runs into
pub fn first_collision(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles
        .iter()
        .position(|o| !o.cleared && !o.remove && player_hits_obstacle(player, o))
}
