//! Flappy entry point
//!
//! Handles platform-specific initialization and runs the game loop. The web
//! build draws with WebGPU; the native build runs the simulation headless
//! under the autopilot and logs each run.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy::renderer::{RenderState, build_scene};
    use flappy::sim::{GameSession, SessionPhase};
    use flappy::{Game, GameConfig, InputEvent};

    /// Browser-side state: the loop driver plus the GPU surface
    struct WebGame {
        game: Game,
        render_state: Option<RenderState>,
    }

    impl WebGame {
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.game.session, &self.game.backdrop);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let session = &self.game.session;

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&session.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-high .hud-value").ok().flatten() {
                el.set_text_content(Some(&session.high_score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.game.fps().to_string()));
            }

            // Start prompt before the first run, game-over panel after a crash
            let idle = session.phase == SessionPhase::Idle;
            set_visible(&document, "start-prompt", idle && session.runs == 0);
            set_visible(&document, "game-over", idle && session.runs > 0);
            if idle && session.runs > 0 {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&session.score.to_string()));
                }
                if let Some(el) = document.get_element_by_id("high-score") {
                    el.set_text_content(Some(&session.high_score.to_string()));
                }
            }
            set_visible(&document, "autopilot-badge", self.game.autopilot);
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Flappy starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let config = GameConfig::load();
        let world_size = glam::Vec2::new(config.world_width, config.world_height);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(WebGame {
            game: Game::new(GameSession::new(config, seed)),
            render_state: None,
        }));
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, world_size)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Flappy running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<WebGame>>) {
        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().game.push_input(InputEvent::Flap);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().game.push_input(InputEvent::Flap);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let input = match event.key().as_str() {
                    " " | "ArrowUp" => InputEvent::Flap,
                    "i" | "I" => InputEvent::ToggleAutopilot,
                    _ => return,
                };
                event.prevent_default();
                game.borrow_mut().game.push_input(input);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<WebGame>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.game.frame(time);
            for event in g.game.take_events() {
                log::debug!("{:?}", event);
            }
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

/// Frames to run when no count is given on the command line (one minute)
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_FRAMES: u64 = 60 * 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy::driver::run_headless;
    use flappy::sim::GameSession;
    use flappy::{Game, GameConfig, InputEvent};

    env_logger::init();
    log::info!("Flappy (native, headless) starting...");

    let config = match GameConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Bad configuration: {}", e);
            std::process::exit(2);
        }
    };

    let frames = match std::env::args().nth(1) {
        Some(arg) => match arg.parse() {
            Ok(n) => n,
            Err(_) => {
                log::error!("Expected a frame count, got {:?}", arg);
                std::process::exit(2);
            }
        },
        None => DEFAULT_FRAMES,
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    log::info!("Seed {}, running {} frames under autopilot", seed, frames);

    let mut game = Game::new(GameSession::new(config, seed));
    game.push_input(InputEvent::ToggleAutopilot);
    let ran = run_headless(&mut game, frames);

    let session = &game.session;
    log::info!(
        "Stopped after {} frames: {} run(s), score {}, high score {}",
        ran,
        session.runs,
        session.score,
        session.high_score.max(session.score)
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
