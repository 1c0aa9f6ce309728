//! Immediate-mode 2D rendering
//!
//! The scene is painted every frame from a read-only `GameState` onto any
//! `Surface`. Images come from a `SpriteSheet`; until it reports ready the
//! scene falls back to plain shapes.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use scene::render;

use crate::sim::{SpriteKind, SpriteSizes};

/// RGBA color (alpha 0-1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS color string for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const GROUND_LINE: Color = Color::rgb(229, 154, 176);
    pub const GROUND_DOTS: Color = Color::rgba(255, 255, 255, 0.35);
    pub const CLOUD: Color = Color::rgba(255, 255, 255, 0.65);
    pub const PLAYER_FALLBACK: Color = Color::rgb(246, 240, 226);
    pub const OBSTACLE_FALLBACK: Color = Color::rgb(255, 255, 255);
    pub const SPARKLE: Color = Color::rgb(255, 255, 255);
    pub const STAR: Color = Color::rgb(255, 214, 0);
    pub const GOAL_CAKE: Color = Color::rgb(255, 182, 193);
    pub const GOAL_FROSTING: Color = Color::rgb(255, 250, 240);
    pub const GOAL_CANDLE: Color = Color::rgb(120, 190, 255);
    pub const GOAL_FLAME: Color = Color::rgb(255, 170, 40);
    pub const CONFETTI: [Color; 5] = [
        Color::rgb(255, 99, 132),
        Color::rgb(255, 214, 0),
        Color::rgb(54, 200, 235),
        Color::rgb(120, 220, 120),
        Color::rgb(190, 120, 255),
    ];
}

/// A 2D drawing target
///
/// Coordinates are canvas pixels with y pointing down.
pub trait Surface {
    fn size(&self) -> (f32, f32);
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, rotation: f32, color: Color);
    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, color: Color);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Color);

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Color) {
        self.fill_ellipse(cx, cy, r, r, 0.0, color);
    }
}

/// Provider of decoded sprite images
pub trait SpriteSheet {
    /// All images decoded
    fn ready(&self) -> bool;
    /// Natural pixel dimensions of an image, if known
    fn natural_size(&self, kind: SpriteKind) -> Option<(f32, f32)>;
    /// Blit an image scaled into the given box
    fn draw(&self, kind: SpriteKind, x: f32, y: f32, w: f32, h: f32);
}

/// Sheet that never loads (headless runs, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSprites;

impl SpriteSheet for NoSprites {
    fn ready(&self) -> bool {
        false
    }

    fn natural_size(&self, _kind: SpriteKind) -> Option<(f32, f32)> {
        None
    }

    fn draw(&self, _kind: SpriteKind, _x: f32, _y: f32, _w: f32, _h: f32) {}
}

/// On-screen sizes derived from the sheet's natural image dimensions
pub fn sprite_sizes(sheet: &impl SpriteSheet) -> SpriteSizes {
    let mut sizes = SpriteSizes::default();
    for kind in SpriteKind::ALL {
        if let Some((w, h)) = sheet.natural_size(kind) {
            sizes.set_natural(kind, w, h);
        }
    }
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    struct FixedSheet;

    impl SpriteSheet for FixedSheet {
        fn ready(&self) -> bool {
            true
        }

        fn natural_size(&self, kind: SpriteKind) -> Option<(f32, f32)> {
            match kind {
                SpriteKind::Player => Some((256.0, 192.0)),
                SpriteKind::Ground => Some((64.0, 48.0)),
                SpriteKind::Flying => None,
            }
        }

        fn draw(&self, _kind: SpriteKind, _x: f32, _y: f32, _w: f32, _h: f32) {}
    }

    #[test]
    fn test_color_css() {
        assert_eq!(colors::GROUND_LINE.to_css(), "rgba(229, 154, 176, 1)");
        assert_eq!(colors::CLOUD.with_alpha(2.0).a, 1.0);
    }

    #[test]
    fn test_sprite_sizes_from_sheet() {
        let sizes = sprite_sizes(&FixedSheet);
        assert_eq!(sizes.player, Vec2::new(64.0, 48.0));
        assert_eq!(sizes.ground, Vec2::new(32.0, 24.0));
        assert_eq!(sizes.flying, SpriteSizes::default().flying);

        assert_eq!(sprite_sizes(&NoSprites), SpriteSizes::default());
    }
}
