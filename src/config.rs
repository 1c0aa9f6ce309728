//! Game variants and tuning
//!
//! A run is shaped by one `GameConfig`. Presets cover the builds that shipped;
//! JSON overrides (from the page) can tweak any field.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::ObstacleKind;

/// Named presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Jump over cheese, deflect crows, win on the tenth obstacle
    #[default]
    Classic,
    /// Jumping is the only move
    JumpOnly,
    /// Walk up to the cake after the last obstacle before celebrating
    Finale,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::JumpOnly => "jump-only",
            Variant::Finale => "finale",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" | "" => Some(Variant::Classic),
            "jump-only" | "jumponly" | "jump" => Some(Variant::JumpOnly),
            "finale" | "finish" => Some(Variant::Finale),
            _ => None,
        }
    }

    /// Tuning for this preset
    pub fn config(&self) -> GameConfig {
        match self {
            Variant::Classic => GameConfig::default(),
            Variant::JumpOnly => GameConfig {
                has_deflect_action: false,
                ..GameConfig::default()
            },
            Variant::Finale => GameConfig {
                gravity: 0.65,
                jump_velocity: -12.8,
                scroll_speed: 3.1,
                has_finish_approach: true,
                ..GameConfig::default()
            },
        }
    }
}

/// Simulation tuning for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Obstacle kinds the spawner may place
    pub obstacle_types: Vec<ObstacleKind>,
    /// Downward acceleration (pixels / frame²)
    pub gravity: f32,
    /// Upward impulse applied on jump (negative = up)
    pub jump_velocity: f32,
    /// Obstacle scroll speed (pixels / frame)
    pub scroll_speed: f32,
    /// Whether the deflect action exists
    pub has_deflect_action: bool,
    /// Whether the win goes through the walk-to-goal sequence
    pub has_finish_approach: bool,
    /// Obstacles per run (and the score needed to win)
    pub total_obstacles: u32,
    /// Chance a drawn obstacle is a ground obstacle
    pub ground_weight: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            obstacle_types: vec![ObstacleKind::Ground, ObstacleKind::Flying],
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            scroll_speed: SCROLL_SPEED,
            has_deflect_action: true,
            has_finish_approach: false,
            total_obstacles: TOTAL_OBSTACLES,
            ground_weight: GROUND_WEIGHT,
        }
    }
}

impl GameConfig {
    /// Upper bound on obstacles per run
    pub const MAX_OBSTACLES: u32 = 99;

    /// Parse a JSON object of overrides on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Apply a JSON object of overrides on top of this config
    pub fn with_overrides(&self, json: &str) -> Result<Self, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        if let (Some(base), serde_json::Value::Object(patch)) = (value.as_object_mut(), overrides) {
            for (key, v) in patch {
                base.insert(key, v);
            }
        }
        let config: Self = serde_json::from_value(value)?;
        Ok(config.sanitized())
    }

    /// Clamp out-of-range values instead of rejecting them
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        let mut kinds = Vec::with_capacity(2);
        for kind in self.obstacle_types.drain(..) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        if kinds.is_empty() {
            kinds = defaults.obstacle_types.clone();
        }
        self.obstacle_types = kinds;

        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            self.gravity = defaults.gravity;
        }
        if !(self.jump_velocity.is_finite() && self.jump_velocity < 0.0) {
            self.jump_velocity = defaults.jump_velocity;
        }
        if !(self.scroll_speed.is_finite() && self.scroll_speed > 0.0) {
            self.scroll_speed = defaults.scroll_speed;
        }
        self.total_obstacles = self.total_obstacles.clamp(1, Self::MAX_OBSTACLES);
        self.ground_weight = if self.ground_weight.is_nan() {
            defaults.ground_weight
        } else {
            self.ground_weight.clamp(0.0, 1.0)
        };

        self
    }

    /// Whether the spawner may place this kind
    pub fn allows(&self, kind: ObstacleKind) -> bool {
        self.obstacle_types.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_round_trip_names() {
        for variant in [Variant::Classic, Variant::JumpOnly, Variant::Finale] {
            assert_eq!(Variant::from_str(variant.as_str()), Some(variant));
        }
        assert_eq!(Variant::from_str("FINISH"), Some(Variant::Finale));
        assert_eq!(Variant::from_str("hard"), None);
    }

    #[test]
    fn test_presets_toggle_options() {
        let classic = Variant::Classic.config();
        assert!(classic.has_deflect_action);
        assert!(!classic.has_finish_approach);

        let jump_only = Variant::JumpOnly.config();
        assert!(!jump_only.has_deflect_action);

        let finale = Variant::Finale.config();
        assert!(finale.has_finish_approach);
        assert_eq!(finale.total_obstacles, TOTAL_OBSTACLES);
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "scroll_speed": 4.0 }"#).unwrap();
        assert_eq!(config.scroll_speed, 4.0);
        assert_eq!(config.gravity, GRAVITY);
        assert_eq!(config.total_obstacles, TOTAL_OBSTACLES);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(GameConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_overrides_keep_base_fields() {
        let finale = Variant::Finale.config();
        let tweaked = finale
            .with_overrides(r#"{ "total_obstacles": 3 }"#)
            .unwrap();
        assert_eq!(tweaked.total_obstacles, 3);
        assert!(tweaked.has_finish_approach);
        assert_eq!(tweaked.gravity, 0.65);
    }

    #[test]
    fn test_sanitized_clamps() {
        let config = GameConfig {
            obstacle_types: vec![],
            gravity: -1.0,
            jump_velocity: 5.0,
            scroll_speed: f32::NAN,
            total_obstacles: 0,
            ground_weight: 3.0,
            ..GameConfig::default()
        }
        .sanitized();

        assert_eq!(config.obstacle_types.len(), 2);
        assert_eq!(config.gravity, GRAVITY);
        assert_eq!(config.jump_velocity, JUMP_VELOCITY);
        assert_eq!(config.scroll_speed, SCROLL_SPEED);
        assert_eq!(config.total_obstacles, 1);
        assert_eq!(config.ground_weight, 1.0);
    }

    #[test]
    fn test_sanitized_dedups_kinds() {
        let config = GameConfig {
            obstacle_types: vec![ObstacleKind::Flying, ObstacleKind::Flying],
            ..GameConfig::default()
        }
        .sanitized();
        assert_eq!(config.obstacle_types, vec![ObstacleKind::Flying]);
        assert!(!config.allows(ObstacleKind::Ground));
    }
}
