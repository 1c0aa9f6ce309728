//! Per-frame draw pass
//!
//! Back to front: clouds, ground, obstacles, goal, player, sparkles, confetti.

use std::f32::consts::PI;

use super::{Color, SpriteSheet, Surface, colors};
use crate::sim::{Cloud, Confetti, Effect, GameState, Goal, Obstacle, Player, SpriteKind};

/// Spacing of the scrolling ground dots
const DOT_SPACING: f32 = 40.0;

/// Paint the whole scene. Reads `state` only.
pub fn render(surface: &mut impl Surface, sprites: &impl SpriteSheet, state: &GameState, time_ms: f64) {
    surface.clear();

    for cloud in &state.clouds {
        draw_cloud(surface, cloud);
    }
    draw_ground(surface, state.viewport.ground_y, time_ms);

    for obstacle in state.obstacles.iter().filter(|o| !o.remove) {
        draw_obstacle(surface, sprites, obstacle);
    }
    if let Some(goal) = &state.goal {
        draw_goal(surface, goal);
    }
    draw_player(surface, sprites, &state.player);

    for effect in &state.effects {
        draw_effect(surface, effect);
    }
    for piece in &state.confetti {
        draw_confetti(surface, piece);
    }
}

fn draw_cloud(surface: &mut impl Surface, cloud: &Cloud) {
    let (x, y) = (cloud.pos.x, cloud.pos.y);
    let (w, h) = (cloud.size.x, cloud.size.y);
    surface.fill_ellipse(x, y, w * 0.5, h, 0.0, colors::CLOUD);
    surface.fill_ellipse(x + w * 0.3, y + h * 0.2, w * 0.35, h * 0.8, 0.0, colors::CLOUD);
    surface.fill_ellipse(x - w * 0.25, y + h * 0.15, w * 0.28, h * 0.7, 0.0, colors::CLOUD);
}

fn draw_ground(surface: &mut impl Surface, ground_y: f32, time_ms: f64) {
    let (width, _) = surface.size();
    surface.stroke_line(0.0, ground_y + 8.0, width, ground_y + 8.0, 4.0, colors::GROUND_LINE);

    let offset = ((time_ms / 80.0) % DOT_SPACING as f64) as f32;
    let mut x = 0.0;
    while x < width {
        surface.fill_circle(x + offset, ground_y + 14.0, 2.0, colors::GROUND_DOTS);
        x += DOT_SPACING;
    }
}

fn draw_obstacle(surface: &mut impl Surface, sprites: &impl SpriteSheet, obstacle: &Obstacle) {
    let (x, y, w, h) = (obstacle.pos.x, obstacle.pos.y, obstacle.size.x, obstacle.size.y);
    if sprites.ready() {
        sprites.draw(obstacle.kind.sprite(), x, y, w, h);
        return;
    }
    surface.fill_rect(x, y, w, h, colors::OBSTACLE_FALLBACK);
}

fn draw_player(surface: &mut impl Surface, sprites: &impl SpriteSheet, player: &Player) {
    let (x, y, w, h) = (player.pos.x, player.pos.y, player.size.x, player.size.y);
    if sprites.ready() {
        sprites.draw(SpriteKind::Player, x, y, w, h);
        return;
    }
    surface.fill_ellipse(
        x + w * 0.48,
        y + h * 0.61,
        w * 0.43,
        h * 0.44,
        0.0,
        colors::PLAYER_FALLBACK,
    );
}

/// Little layer cake with a candle
fn draw_goal(surface: &mut impl Surface, goal: &Goal) {
    let (x, y, w, h) = (goal.pos.x, goal.pos.y, goal.size.x, goal.size.y);
    let cake_top = y + h * 0.45;
    surface.fill_rect(x, cake_top, w, h - h * 0.45, colors::GOAL_CAKE);
    surface.fill_rect(x, cake_top, w, 5.0, colors::GOAL_FROSTING);

    let candle_w = 4.0;
    let candle_x = x + (w - candle_w) / 2.0;
    surface.fill_rect(candle_x, y + h * 0.15, candle_w, h * 0.3, colors::GOAL_CANDLE);
    surface.fill_ellipse(
        candle_x + candle_w / 2.0,
        y + h * 0.1,
        3.0,
        5.0,
        0.0,
        colors::GOAL_FLAME,
    );
}

fn draw_effect(surface: &mut impl Surface, effect: &Effect) {
    let alpha = effect.alpha();
    surface.fill_circle(
        effect.pos.x,
        effect.pos.y,
        8.0 * alpha,
        colors::SPARKLE.with_alpha(alpha),
    );
    surface.fill_text(
        "✦",
        effect.pos.x - 4.0,
        effect.pos.y + 4.0,
        colors::STAR.with_alpha(alpha),
    );
}

fn draw_confetti(surface: &mut impl Surface, piece: &Confetti) {
    let palette = &colors::CONFETTI;
    let color: Color = palette[piece.color as usize % palette.len()];
    // Fade during the last second
    let alpha = (piece.ttl / 60.0).min(1.0);
    surface.fill_ellipse(
        piece.pos.x,
        piece.pos.y,
        piece.size,
        piece.size * 0.45,
        piece.rotation % (2.0 * PI),
        color.with_alpha(alpha),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::renderer::NoSprites;
    use crate::sim::{Action, GameMode, apply_action};
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Rect(f32, f32, f32, f32),
        Ellipse,
        Line,
        Text(String),
    }

    /// Surface that records draw calls
    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Surface for Recorder {
        fn size(&self) -> (f32, f32) {
            (600.0, 320.0)
        }
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }
        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, _color: Color) {
            self.ops.push(Op::Rect(x, y, w, h));
        }
        fn fill_ellipse(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32, _: Color) {
            self.ops.push(Op::Ellipse);
        }
        fn stroke_line(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32, _: Color) {
            self.ops.push(Op::Line);
        }
        fn fill_text(&mut self, text: &str, _: f32, _: f32, _: Color) {
            self.ops.push(Op::Text(text.to_string()));
        }
    }

    /// Loaded sheet that records blits
    #[derive(Default)]
    struct Blits {
        drawn: RefCell<Vec<SpriteKind>>,
    }

    impl SpriteSheet for Blits {
        fn ready(&self) -> bool {
            true
        }
        fn natural_size(&self, _kind: SpriteKind) -> Option<(f32, f32)> {
            Some((32.0, 24.0))
        }
        fn draw(&self, kind: SpriteKind, _: f32, _: f32, _: f32, _: f32) {
            self.drawn.borrow_mut().push(kind);
        }
    }

    fn running_state() -> GameState {
        let mut state = GameState::new(42, GameConfig::default());
        apply_action(&mut state, Action::Start);
        state
    }

    #[test]
    fn test_fallback_shapes_without_sprites() {
        let state = running_state();
        let mut surface = Recorder::default();
        render(&mut surface, &NoSprites, &state, 0.0);

        assert_eq!(surface.ops[0], Op::Clear);
        let rects: Vec<_> = surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Rect(..)))
            .collect();
        assert_eq!(rects.len(), state.obstacles.len());
        assert_eq!(
            rects[0],
            &Op::Rect(
                state.obstacles[0].pos.x,
                state.obstacles[0].pos.y,
                state.obstacles[0].size.x,
                state.obstacles[0].size.y,
            )
        );
        assert!(surface.ops.contains(&Op::Line));
    }

    #[test]
    fn test_sprites_used_when_ready() {
        let mut state = running_state();
        state.obstacles.truncate(2);
        state.obstacles[1].remove = true;

        let sheet = Blits::default();
        let mut surface = Recorder::default();
        render(&mut surface, &sheet, &state, 0.0);

        let drawn = sheet.drawn.borrow();
        assert_eq!(drawn.len(), 2);
        assert_eq!(drawn[0], state.obstacles[0].kind.sprite());
        assert_eq!(drawn[1], SpriteKind::Player);
        assert!(!surface.ops.iter().any(|op| matches!(op, Op::Rect(..))));
    }

    #[test]
    fn test_effects_and_confetti_drawn() {
        let mut state = running_state();
        state.effects.push(Effect::new(glam::Vec2::new(50.0, 50.0)));
        let mut surface = Recorder::default();
        render(&mut surface, &NoSprites, &state, 0.0);
        assert!(surface.ops.contains(&Op::Text("✦".to_string())));

        // Win the run through deflects and check the burst gets painted
        state.config.total_obstacles = 1;
        state.obstacles[0].kind = crate::sim::ObstacleKind::Flying;
        state.obstacles[0].pos.x = state.player.pos.x + 20.0;
        apply_action(&mut state, Action::Deflect);
        assert_eq!(state.mode, GameMode::Win);

        let mut surface = Recorder::default();
        render(&mut surface, &NoSprites, &state, 0.0);
        let ellipses = surface.ops.iter().filter(|op| **op == Op::Ellipse).count();
        assert!(ellipses >= state.confetti.len());
    }

    #[test]
    fn test_render_is_read_only() {
        let state = running_state();
        let before = serde_json::to_string(&state).unwrap();
        let mut surface = Recorder::default();
        render(&mut surface, &NoSprites, &state, 1234.0);
        assert_eq!(serde_json::to_string(&state).unwrap(), before);
    }
}
