//! Game state and core simulation types
//!
//! Everything a run needs lives in `GameState`; hosts own one and pass it to
//! `tick` and `render` explicitly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::spawner;
use crate::config::GameConfig;
use crate::consts::*;

/// Current mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen, waiting for the first jump
    Start,
    /// Obstacles scrolling, score counting
    Running,
    /// Target reached, walking up to the goal marker
    Finish,
    /// Hit an obstacle
    GameOver { reason: GameOverReason },
    /// Celebration
    Win,
}

impl GameMode {
    pub fn is_over(&self) -> bool {
        matches!(self, GameMode::GameOver { .. } | GameMode::Win)
    }
}

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Ran into a ground obstacle
    Bonk,
    /// Caught by a flying obstacle
    Caught,
}

impl From<ObstacleKind> for GameOverReason {
    fn from(kind: ObstacleKind) -> Self {
        match kind {
            ObstacleKind::Ground => GameOverReason::Bonk,
            ObstacleKind::Flying => GameOverReason::Caught,
        }
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Sits on the ground (cheese)
    Ground,
    /// Hovers just above head height (crow)
    Flying,
}

impl ObstacleKind {
    /// Inward hitbox padding
    pub fn pad(&self) -> f32 {
        match self {
            ObstacleKind::Ground => GROUND_PAD,
            ObstacleKind::Flying => FLYING_PAD,
        }
    }

    pub fn sprite(&self) -> SpriteKind {
        match self {
            ObstacleKind::Ground => SpriteKind::Ground,
            ObstacleKind::Flying => SpriteKind::Flying,
        }
    }

    /// Top edge for an obstacle of this kind and height
    pub fn rest_y(&self, height: f32, ground_y: f32) -> f32 {
        match self {
            ObstacleKind::Ground => ground_y - height,
            ObstacleKind::Flying => ground_y - height - FLYING_ALTITUDE,
        }
    }
}

/// Image keys known to the asset provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    Ground,
    Flying,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 3] = [SpriteKind::Player, SpriteKind::Ground, SpriteKind::Flying];

    /// On-screen height once the real image is known
    pub fn target_height(&self) -> f32 {
        match self {
            SpriteKind::Player => 48.0,
            SpriteKind::Ground | SpriteKind::Flying => 24.0,
        }
    }
}

/// Box sizes per sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSizes {
    pub player: Vec2,
    pub ground: Vec2,
    pub flying: Vec2,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            player: Vec2::new(42.0, 36.0),
            ground: Vec2::new(32.0, 24.0),
            flying: Vec2::new(32.0, 24.0),
        }
    }
}

impl SpriteSizes {
    pub fn get(&self, kind: SpriteKind) -> Vec2 {
        match kind {
            SpriteKind::Player => self.player,
            SpriteKind::Ground => self.ground,
            SpriteKind::Flying => self.flying,
        }
    }

    /// Scale a sprite to its target height, keeping the image's aspect ratio.
    /// Images without dimensions are ignored.
    pub fn set_natural(&mut self, kind: SpriteKind, natural_w: f32, natural_h: f32) {
        if !(natural_w > 0.0 && natural_h > 0.0) {
            return;
        }
        let h = kind.target_height();
        let size = Vec2::new((h * natural_w / natural_h).round(), h);
        match kind {
            SpriteKind::Player => self.player = size,
            SpriteKind::Ground => self.ground = size,
            SpriteKind::Flying => self.flying = size,
        }
    }
}

/// Drawing area and ground line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub ground_y: f32,
}

impl Viewport {
    pub fn new(width: f32) -> Self {
        Self {
            width: crate::clamp_viewport_width(width),
            height: VIEWPORT_HEIGHT,
            ground_y: VIEWPORT_HEIGHT - GROUND_OFFSET,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(VIEWPORT_MAX_WIDTH)
    }
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (positive = down)
    pub vel_y: f32,
    pub size: Vec2,
    pub grounded: bool,
}

impl Player {
    pub fn new(size: Vec2, ground_y: f32) -> Self {
        let mut player = Self {
            pos: Vec2::new(PLAYER_X, 0.0),
            vel_y: 0.0,
            size,
            grounded: true,
        };
        player.place_on_ground(ground_y);
        player
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Stand still on the ground line
    pub fn place_on_ground(&mut self, ground_y: f32) {
        self.pos.y = ground_y - self.size.y;
        self.vel_y = 0.0;
        self.grounded = true;
    }

    /// Apply the jump impulse if standing; returns whether a jump happened
    pub fn jump(&mut self, velocity: f32) -> bool {
        if !self.grounded {
            return false;
        }
        self.vel_y = velocity;
        self.grounded = false;
        true
    }
}

/// A scrolling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Passed safely or deflected (counted exactly once)
    pub cleared: bool,
    /// Consumed, drop on the next cull
    pub remove: bool,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, x: f32, size: Vec2, ground_y: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(x, kind.rest_y(size.y, ground_y)),
            size,
            cleared: false,
            remove: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Collision box, shrunk by the kind's padding
    pub fn hitbox(&self) -> Rect {
        self.rect().inset(self.kind.pad())
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Re-seat on the ground line (after resize or sprite changes)
    pub fn regrounded(&mut self, ground_y: f32) {
        self.pos.y = self.kind.rest_y(self.size.y, ground_y);
    }
}

/// Sparkle left behind by a scoring event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    pub pos: Vec2,
    /// Frames left (fades out as it drops)
    pub ttl: f32,
}

impl Effect {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, ttl: EFFECT_TTL }
    }

    /// 1.0 when fresh, 0.0 when expired
    pub fn alpha(&self) -> f32 {
        (self.ttl / EFFECT_TTL).clamp(0.0, 1.0)
    }
}

/// Confetti piece from the win burst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Confetti {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames left
    pub ttl: f32,
    pub size: f32,
    pub rotation: f32,
    pub spin: f32,
    /// Index into the renderer's confetti palette
    pub color: u32,
}

/// Maximum live confetti pieces
pub const MAX_PARTICLES: usize = 256;

/// Background cloud (purely cosmetic)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    /// Center of the main puff
    pub pos: Vec2,
    pub size: Vec2,
    /// Extra drift on top of the parallax scroll
    pub speed: f32,
}

/// Finish marker the player walks into
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Goal {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    pub mode: GameMode,
    /// Obstacles cleared this run
    pub cleared: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub viewport: Viewport,
    pub sprites: SpriteSizes,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub clouds: Vec<Cloud>,
    pub effects: Vec<Effect>,
    pub confetti: Vec<Confetti>,
    pub goal: Option<Goal>,
    /// Shared random source for layout, clouds and confetti
    #[serde(skip)]
    pub rng: Pcg32,
}

impl GameState {
    /// Create a session on the title screen
    pub fn new(seed: u64, config: GameConfig) -> Self {
        let config = config.sanitized();
        let viewport = Viewport::default();
        let sprites = SpriteSizes::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let clouds = spawner::build_clouds(&mut rng, &viewport);

        Self {
            seed,
            config,
            mode: GameMode::Start,
            cleared: 0,
            time_ticks: 0,
            viewport,
            sprites,
            player: Player::new(sprites.player, viewport.ground_y),
            obstacles: Vec::new(),
            clouds,
            effects: Vec::new(),
            confetti: Vec::new(),
            goal: None,
            rng,
        }
    }

    /// Obstacles needed to win
    pub fn total(&self) -> u32 {
        self.config.total_obstacles
    }

    /// Put everything back to the start of a fresh run
    pub fn reset_run(&mut self) {
        // Config may have been edited since `new`
        self.config = std::mem::take(&mut self.config).sanitized();
        self.cleared = 0;
        self.effects.clear();
        self.confetti.clear();
        self.goal = None;
        self.player.pos.x = PLAYER_X;
        self.player.place_on_ground(self.viewport.ground_y);
        self.obstacles =
            spawner::build_obstacles(&mut self.rng, &self.config, &self.viewport, &self.sprites);
        self.clouds = spawner::build_clouds(&mut self.rng, &self.viewport);
    }

    /// React to a new canvas width
    pub fn resize(&mut self, width: f32) {
        self.viewport = Viewport::new(width);
        let ground_y = self.viewport.ground_y;
        if !matches!(self.mode, GameMode::Running | GameMode::Finish) {
            self.player.place_on_ground(ground_y);
        }
        for obstacle in &mut self.obstacles {
            obstacle.regrounded(ground_y);
        }
        if let Some(goal) = &mut self.goal {
            goal.pos.y = ground_y - goal.size.y;
        }
    }

    /// Adopt real sprite dimensions once images have loaded
    pub fn set_sprite_sizes(&mut self, sprites: SpriteSizes) {
        self.sprites = sprites;
        let ground_y = self.viewport.ground_y;

        self.player.size = sprites.player;
        if !matches!(self.mode, GameMode::Running | GameMode::Finish) {
            self.player.place_on_ground(ground_y);
        }

        for obstacle in &mut self.obstacles {
            obstacle.size = sprites.get(obstacle.kind.sprite());
            obstacle.regrounded(ground_y);
        }
    }
}
