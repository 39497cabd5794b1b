//! Chicken On A Line entry point
//!
//! Browser builds wire canvas input to a `Session` and drive it from
//! `requestAnimationFrame`. Native builds run a headless autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use chicken_line::render::{Frame, Renderer};
    use chicken_line::{Session, Tuning};

    /// Writes the HUD and the screen overlay into DOM text nodes
    struct HudRenderer {
        document: Document,
    }

    impl HudRenderer {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
            }
        }
    }

    impl Renderer for HudRenderer {
        fn render(&mut self, frame: &Frame<'_>) {
            const HUD_IDS: [&str; 5] = [
                "hud-score",
                "hud-high-score",
                "hud-beat",
                "hud-multiplier",
                "hud-time",
            ];
            for (id, text) in HUD_IDS.iter().zip(frame.hud_lines()) {
                self.set_text(id, &text);
            }

            let overlay = &frame.overlay;
            self.set_hidden("overlay", overlay.headline.is_none());
            self.set_text("overlay-headline", overlay.headline.as_deref().unwrap_or(""));
            self.set_text("overlay-lines", &overlay.lines.join("\n"));
            let labels: Vec<&str> = overlay.buttons.iter().map(|b| b.label.as_str()).collect();
            self.set_text("overlay-buttons", &labels.join(" | "));
        }
    }

    struct App {
        session: Session,
        hud: HudRenderer,
        /// An animation frame is scheduled
        looping: bool,
    }

    impl App {
        fn redraw(&mut self) {
            self.session.draw(&mut self.hud);
        }
    }

    /// Convert a client position to unit space (origin at the center, y up)
    fn to_unit(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        let w = rect.width().max(1.0);
        let h = rect.height().max(1.0);
        Vec2::new(
            ((client_x - rect.left()) / w - 0.5) as f32,
            (0.5 - (client_y - rect.top()) / h) as f32,
        )
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Chicken On A Line starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            session: Session::new(seed, Tuning::default()),
            hud: HudRenderer { document },
            looping: false,
        }));
        log::info!("Session initialized with seed: {}", seed);

        setup_input_handlers(&canvas, app.clone());
        app.borrow_mut().redraw();
    }

    /// Run `f` against the session, then redraw and resume the loop if a
    /// round started
    fn handle(app: &Rc<RefCell<App>>, f: impl FnOnce(&mut Session)) {
        let start_loop = {
            let mut a = app.borrow_mut();
            f(&mut a.session);
            a.redraw();
            let start = a.session.is_running() && !a.looping;
            if start {
                a.looping = true;
            }
            start
        };
        if start_loop {
            request_animation_frame(app.clone());
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse move
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let point = to_unit(
                    &canvas_clone,
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                );
                handle(&app, |s| s.on_pointer_move(point));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let point = to_unit(
                    &canvas_clone,
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                );
                let now = js_sys::Date::now();
                handle(&app, |s| s.on_pointer_down(point, now));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let now = js_sys::Date::now();
                handle(&app, |s| s.on_pointer_up(now));
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click (menu buttons)
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let point = to_unit(
                    &canvas_clone,
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                );
                handle(&app, |s| s.on_click(point));
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let point = to_unit(
                        &canvas_clone,
                        f64::from(touch.client_x()),
                        f64::from(touch.client_y()),
                    );
                    let now = js_sys::Date::now();
                    handle(&app, |s| {
                        s.on_pointer_move(point);
                        s.on_pointer_down(point, now);
                    });
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let point = to_unit(
                        &canvas_clone,
                        f64::from(touch.client_x()),
                        f64::from(touch.client_y()),
                    );
                    handle(&app, |s| s.on_pointer_move(point));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end: release, then treat as a click since the default
        // mouse emulation is suppressed
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let now = js_sys::Date::now();
                let point = event.changed_touches().get(0).map(|touch| {
                    to_unit(
                        &canvas_clone,
                        f64::from(touch.client_x()),
                        f64::from(touch.client_y()),
                    )
                });
                handle(&app, |s| {
                    s.on_pointer_up(now);
                    if let Some(point) = point {
                        s.on_click(point);
                    }
                });
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let running = {
            let mut a = app.borrow_mut();
            let running = a.session.frame(time);
            a.redraw();
            a.looping = running;
            running
        };

        if running {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use std::error::Error;
    use std::time::{SystemTime, UNIX_EPOCH};

    use glam::Vec2;

    use chicken_line::render::LogRenderer;
    use chicken_line::{Screen, Session, Tuning};

    /// Synthetic 60 Hz display
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const ROUNDS: u32 = 8;
    /// Give up on a round the autopilot balances forever
    const MAX_ROUND_MS: f64 = 120_000.0;
    /// How long the autopilot holds the pointer for a jump
    const PRESS_MS: f64 = 250.0;

    pub fn load_tuning(path: &str) -> Result<Tuning, Box<dyn Error>> {
        let json = std::fs::read_to_string(path)?;
        Ok(Tuning::from_json(&json)?)
    }

    /// Steer the bar under the chicken and jump when it sits low on the bar
    fn steer(session: &mut Session, now: f64) {
        let state = session.game_state();
        let follow = state.tuning().bar_follow.max(f32::EPSILON);
        let handle = Vec2::new(state.chicken.origin.x / follow, -0.4);
        let low = state.chicken_on_bar() && state.chicken.velocity.y <= 0.0;

        session.on_pointer_move(handle);
        if low {
            session.on_pointer_down(handle, now);
            session.on_pointer_up(now + PRESS_MS);
        }
    }

    /// Click the first overlay button, or the last one to take the risk
    fn press_button(session: &mut Session, risk: bool) {
        let buttons = session.view().overlay.buttons;
        let button = if risk { buttons.last() } else { buttons.first() };
        if let Some(button) = button {
            log::info!("Pressing \"{}\"", button.label);
            let origin = button.origin;
            session.on_click(origin);
        }
    }

    pub fn run(tuning: Tuning) {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        log::info!("Autopilot session with seed {seed}");

        let mut session = Session::new(seed, tuning);
        let mut renderer = LogRenderer::default();
        let mut now = 0.0;

        for round in 1..=ROUNDS {
            press_button(&mut session, round % 2 == 0);
            if !session.is_running() {
                log::warn!("Round {round} did not start");
                break;
            }

            let started = now;
            while session.frame(now) {
                steer(&mut session, now);
                session.draw(&mut renderer);
                now += FRAME_MS;
                if now - started > MAX_ROUND_MS {
                    log::info!("Round {round} still balanced, ending it");
                    session.end_game();
                }
            }
            session.draw(&mut renderer);

            let board = session.scoreboard();
            log::info!(
                "Round {round}: {}s, score {}, multiplier {}x, high score {}",
                session.game_state().run_time(),
                board.score,
                board.multiplier,
                board.high_score
            );
            if let Screen::GameOver(screen) = session.screen() {
                log::info!("{}: {} {}", screen.headline(), screen.subline(), board.score);
            }
        }
        log::info!("Rendered {} frames", renderer.frames());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Chicken On A Line (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match autopilot::load_tuning(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {path}");
                tuning
            }
            Err(e) => {
                log::error!("Could not load tuning from {path}: {e}");
                std::process::exit(1);
            }
        },
        None => chicken_line::Tuning::default(),
    };

    autopilot::run(tuning);
}
