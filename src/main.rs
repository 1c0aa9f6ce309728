//! Quokka Run entry point
//!
//! Browser: wires the canvas, DOM overlay and input events to the simulation
//! and drives it from `requestAnimationFrame`. Native: headless autopilot demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, PointerEvent};

    use quokka_run::consts::VIEWPORT_HEIGHT;
    use quokka_run::input::key_binding;
    use quokka_run::renderer::canvas::{CanvasSurface, ImageSprites};
    use quokka_run::renderer::{NoSprites, SpriteSheet, render, sprite_sizes};
    use quokka_run::sim::{Action, Clock, GameMode, GameState, SpriteKind, TickInput, tick};
    use quokka_run::ui::{self, Overlay};
    use quokka_run::{GameConfig, Variant, viewport_width_for_window};

    const SPRITES: [(SpriteKind, &str); 3] = [
        (SpriteKind::Player, "quokka.png"),
        (SpriteKind::Ground, "cheese.png"),
        (SpriteKind::Flying, "crow.png"),
    ];

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        clock: Clock,
        surface: CanvasSurface,
        sprites: Option<ImageSprites>,
        sprites_applied: bool,
        // Last values pushed to the DOM
        last_mode: Option<GameMode>,
        last_score: String,
    }

    impl Game {
        fn new(seed: u64, config: GameConfig, surface: CanvasSurface) -> Self {
            let sprites = match ImageSprites::load(surface.context().clone(), &SPRITES) {
                Ok(sprites) => Some(sprites),
                Err(e) => {
                    log::warn!("Image loading unavailable ({:?}), drawing shapes", e);
                    None
                }
            };
            Self {
                state: GameState::new(seed, config),
                input: TickInput::default(),
                clock: Clock::new(),
                surface,
                sprites,
                sprites_applied: false,
                last_mode: None,
                last_score: String::new(),
            }
        }

        /// Match the canvas to the window and tell the simulation
        fn resize(&mut self, window_width: f32) {
            let width = viewport_width_for_window(window_width);
            self.surface.resize(width as u32, VIEWPORT_HEIGHT as u32);
            self.state.resize(width);
        }

        fn update(&mut self, time: f64) {
            let dt = self.clock.advance(time);
            tick(&mut self.state, &self.input, dt);
            self.input.clear_actions();

            if !self.sprites_applied {
                if let Some(sprites) = self.sprites.as_ref().filter(|s| s.ready()) {
                    self.state.set_sprite_sizes(sprite_sizes(sprites));
                    self.sprites_applied = true;
                    log::info!("Sprites loaded");
                }
            }
        }

        fn render(&mut self, time: f64) {
            match &self.sprites {
                Some(sprites) => render(&mut self.surface, sprites, &self.state, time),
                None => render(&mut self.surface, &NoSprites, &self.state, time),
            }
        }

        /// Push score and overlay to the DOM when they change
        fn update_hud(&mut self, document: &Document) {
            let score = ui::score_text(&self.state);
            if score != self.last_score {
                if let Some(el) = document.get_element_by_id("score") {
                    el.set_text_content(Some(&score));
                }
                self.last_score = score;
            }

            if self.last_mode != Some(self.state.mode) {
                apply_overlay(document, &ui::overlay_for(&self.state));
                self.last_mode = Some(self.state.mode);
            }
        }
    }

    fn apply_overlay(document: &Document, overlay: &Overlay) {
        if let Some(el) = document.get_element_by_id("overlay") {
            let _ = el.class_list().toggle_with_force("is-visible", overlay.visible);
        }
        if let Some(el) = document.get_element_by_id("overlay-title") {
            el.set_text_content(Some(&overlay.title));
            let _ = el.class_list().toggle_with_force("win", overlay.win);
        }
        if let Some(el) = document.get_element_by_id("overlay-subtitle") {
            el.set_text_content(Some(&overlay.subtitle));
        }
        if let Some(el) = document.get_element_by_id("overlay-button") {
            el.set_text_content(Some(&overlay.button_label));
            let _ = el
                .class_list()
                .toggle_with_force("is-hidden", overlay.button_label.is_empty());
        }
    }

    /// Preset from `?variant=`, then JSON overrides from `data-config`
    fn load_config(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> GameConfig {
        let search = window.location().search().unwrap_or_default();
        let variant = search
            .trim_start_matches('?')
            .split('&')
            .find_map(|pair| pair.strip_prefix("variant="))
            .map(|name| {
                Variant::from_str(name).unwrap_or_else(|| {
                    log::warn!("Unknown variant '{}', using classic", name);
                    Variant::default()
                })
            })
            .unwrap_or_default();

        let preset = variant.config();
        match canvas.get_attribute("data-config") {
            Some(json) => preset.with_overrides(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring data-config: {}", e);
                preset
            }),
            None => preset,
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Quokka Run starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let surface = CanvasSurface::new(canvas.clone()).expect("no 2d context");

        let config = load_config(&window, &canvas);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, config, surface)));
        log::info!("Game initialized with seed: {}", seed);

        let window_width = window_width(&window);
        game.borrow_mut().resize(window_width);

        setup_resize(&window, game.clone());
        setup_visibility(&document, game.clone());
        setup_input_handlers(&window, &document, &canvas, game.clone());

        request_animation_frame(game);

        log::info!("Quokka Run running!");
    }

    fn window_width(window: &web_sys::Window) -> f32 {
        window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0) as f32
    }

    fn setup_resize(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                game.borrow_mut().resize(window_width(&window));
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Restart the frame clock when the tab comes back
    fn setup_visibility(document: &Document, game: Rc<RefCell<Game>>) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                game.borrow_mut().clock.reset();
                log::info!("Page hidden, clock paused");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        document: &Document,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let Some(binding) = key_binding(&event.code()) else {
                    return;
                };
                if binding.prevent_default {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                for &action in binding.actions {
                    g.input.press(action);
                }
                if binding.toggle_autopilot {
                    g.input.idle_mode = !g.input.idle_mode;
                    log::info!("Autopilot: {}", g.input.idle_mode);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Tap on the canvas jumps
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                game.borrow_mut().input.press(Action::Jump);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Overlay button (re)starts
        if let Some(btn) = document.get_element_by_id("overlay-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.press(Action::Start);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No overlay button, restart with Space");
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render(time);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Headless demo: `quokka-run [variant] [runs]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use quokka_run::Variant;
    use quokka_run::sim::{GameState, autopilot};

    /// One nominal frame per tick
    const DEMO_DT: f32 = 1.0;
    const MAX_TICKS: u64 = 20_000;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let variant = args
        .next()
        .map(|name| {
            Variant::from_str(&name).unwrap_or_else(|| {
                log::warn!("Unknown variant '{}', using classic", name);
                Variant::default()
            })
        })
        .unwrap_or_default();
    let runs: u64 = args.next().and_then(|n| n.parse().ok()).unwrap_or(5);

    log::info!("Quokka Run (native) demo: {} x {}", variant.as_str(), runs);

    let mut results = Vec::new();
    for seed in 1..=runs {
        let mut state = GameState::new(seed, variant.config());
        let ticks = autopilot::play_out(&mut state, DEMO_DT, MAX_TICKS);
        log::info!(
            "seed {}: {:?} after {} ticks ({}/{})",
            seed,
            state.mode,
            ticks,
            state.cleared,
            state.total()
        );
        results.push(serde_json::json!({
            "seed": seed,
            "mode": state.mode,
            "cleared": state.cleared,
            "ticks": ticks,
        }));
    }

    let summary = serde_json::json!({
        "variant": variant.as_str(),
        "runs": results,
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(text) => println!("{}", text),
        Err(e) => log::error!("Failed to encode summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
