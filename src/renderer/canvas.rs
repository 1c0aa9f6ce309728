//! Browser backends: `<canvas>` 2D context and `<img>` sprites

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Color, SpriteSheet, Surface};
use crate::sim::SpriteKind;

/// Canvas 2D drawing surface
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    /// Resize the backing store (also resets context state)
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, rotation: f32, color: Color) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        let _ = self.ctx.ellipse(
            cx as f64,
            cy as f64,
            rx as f64,
            ry as f64,
            rotation as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(x0 as f64, y0 as f64);
        self.ctx.line_to(x1 as f64, y1 as f64);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }
}

/// Sprites loaded from image URLs
pub struct ImageSprites {
    ctx: CanvasRenderingContext2d,
    images: Vec<(SpriteKind, HtmlImageElement)>,
    loaded: Rc<Cell<usize>>,
}

impl ImageSprites {
    /// Start loading every image; `ready()` flips once all have decoded
    pub fn load(
        ctx: CanvasRenderingContext2d,
        sources: &[(SpriteKind, &str)],
    ) -> Result<Self, JsValue> {
        let loaded = Rc::new(Cell::new(0));
        let mut images = Vec::with_capacity(sources.len());

        for &(kind, src) in sources {
            let image = HtmlImageElement::new()?;

            let counter = loaded.clone();
            let onload = Closure::<dyn FnMut()>::new(move || {
                counter.set(counter.get() + 1);
            });
            image.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();

            let name = src.to_string();
            let onerror = Closure::<dyn FnMut()>::new(move || {
                log::warn!("Sprite {} failed to load, using shapes", name);
            });
            image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();

            image.set_src(src);
            images.push((kind, image));
        }

        Ok(Self {
            ctx,
            images,
            loaded,
        })
    }

    fn image(&self, kind: SpriteKind) -> Option<&HtmlImageElement> {
        self.images
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, image)| image)
    }
}

impl SpriteSheet for ImageSprites {
    fn ready(&self) -> bool {
        !self.images.is_empty() && self.loaded.get() >= self.images.len()
    }

    fn natural_size(&self, kind: SpriteKind) -> Option<(f32, f32)> {
        let image = self.image(kind)?;
        let (w, h) = (image.natural_width(), image.natural_height());
        (w > 0 && h > 0).then_some((w as f32, h as f32))
    }

    fn draw(&self, kind: SpriteKind, x: f32, y: f32, w: f32, h: f32) {
        if let Some(image) = self.image(kind) {
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                image, x as f64, y as f64, w as f64, h as f64,
            );
        }
    }
}
