//! Pop Shot entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

    use glam::Vec2;
    use pop_shot::audio::{AudioManager, SoundEffect};
    use pop_shot::consts::*;
    use pop_shot::render::CanvasRenderer;
    use pop_shot::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use pop_shot::{HighScore, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        high_score: HighScore,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64, width: f32, height: f32) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_sfx_volume());

            Self {
                state: GameState::new(seed, width, height),
                renderer: None,
                audio,
                high_score: HighScore::load(),
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                let events = tick(&mut self.state, &input);
                self.handle_events(&events);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.fire_at = None;
            }
        }

        /// React to what the tick reported: audio, persistence, overlays
        fn handle_events(&mut self, events: &[GameEvent]) {
            for event in events {
                match event {
                    GameEvent::ProjectileFired => self.audio.play(SoundEffect::Shoot),
                    GameEvent::EnemyHit | GameEvent::EnemyDestroyed => {
                        self.audio.play(SoundEffect::Pop)
                    }
                    GameEvent::RunEnded { score } => {
                        self.audio.play(SoundEffect::GameOver);
                        if self.high_score.record(*score) {
                            log::info!("New high score: {}", score);
                        }
                        set_text("final-score", &score.to_string());
                        set_overlay_visible("game-over", true);
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(ref renderer) = self.renderer {
                if let Err(e) = renderer.render(&self.state, self.settings.trails) {
                    log::warn!("Render error: {:?}", e);
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            set_text("hud-score", &self.state.score.to_string());
            let best = self.high_score.best().unwrap_or(0);
            set_text("hud-high-score", &best.to_string());
        }

        /// Reset game state for a fresh run
        fn restart(&mut self, seed: u64, width: f32, height: f32) {
            self.state = GameState::new(seed, width, height);
            self.accumulator = 0.0;
            self.input = TickInput::default();
        }
    }

    fn document() -> web_sys::Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_overlay_visible(id: &str, visible: bool) {
        if let Some(el) = document().get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Window inner size in CSS pixels
    fn window_size(window: &web_sys::Window) -> (f32, f32) {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        (w as f32, h as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pop Shot starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fill the window
        let (width, height) = window_size(&window);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("get_context failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, width, height)));
        game.borrow_mut().renderer = Some(CanvasRenderer::new(ctx, width as u32, height as u32));
        game.borrow().update_hud();

        log::info!("Game initialized with seed: {}", seed);

        // Set up input handlers
        setup_input_handlers(&canvas, game.clone());
        setup_menu_buttons(game.clone());
        setup_resize_handler(canvas.clone(), game.clone());

        set_overlay_visible("menu", true);
        set_overlay_visible("game-over", false);

        // Start game loop
        request_animation_frame(game);

        log::info!("Pop Shot running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Canvas click fires a projectile toward the click point
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut g = game.borrow_mut();
            if g.state.phase == GamePhase::Playing {
                let target = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                g.input.fire_at = Some(target);
            }
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_menu_buttons(game: Rc<RefCell<Game>>) {
        let document = document();

        // Start button begins the run
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                set_overlay_visible("menu", false);
                game.borrow_mut().state.start();
                log::info!("Run started");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Retry restarts in-process with a fresh seed
        if let Some(btn) = document.get_element_by_id("retry-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let window = web_sys::window().unwrap();
                let (width, height) = window_size(&window);
                let seed = js_sys::Date::now() as u64;

                let mut g = game.borrow_mut();
                g.restart(seed, width, height);
                g.state.start();

                set_overlay_visible("game-over", false);
                log::info!("Game restarted with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Resize forces a restart: entity positions are relative to a canvas
        // size that no longer exists.
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().unwrap();
            let (width, height) = window_size(&window);
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);

            let seed = js_sys::Date::now() as u64;
            let mut g = game.borrow_mut();
            g.restart(seed, width, height);
            if let Some(ref mut renderer) = g.renderer {
                renderer.resize(width as u32, height as u32);
            }

            set_overlay_visible("menu", true);
            set_overlay_visible("game-over", false);
            log::info!("Canvas resized to {}x{}, run reset", width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pop Shot (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play in a browser");

    // Headless smoke run
    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use glam::Vec2;
    use pop_shot::sim::{GamePhase, GameState, TickInput, tick};

    let mut state = GameState::new(42, 800.0, 600.0);
    state.start();

    for i in 0..600u32 {
        let input = if i % 20 == 0 {
            TickInput {
                fire_at: Some(Vec2::new((i * 31 % 800) as f32, (i * 17 % 600) as f32)),
            }
        } else {
            TickInput::default()
        };
        tick(&mut state, &input);
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "Smoke run: {} ticks, score {}, {} enemies on screen",
        state.time_ticks,
        state.score,
        state.enemies.len()
    );
}
