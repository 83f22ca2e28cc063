//! Drive Mad entry points.
//!
//! The browser build wires the session controller to requestAnimationFrame,
//! the canvas renderer, and the page chrome. The native build has no window
//! to draw into, so it plays one unattended demo run through the same
//! controller and reports the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::{Rc, Weak};

    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use drive_mad::consts::{FIELD_HEIGHT, FIELD_WIDTH};
    use drive_mad::controller::{Controller, FrameHandle, FrameSource, SessionEvent};
    use drive_mad::highscores::LocalScore;
    use drive_mad::renderer::{CanvasRenderer, Renderer};
    use drive_mad::sim::{PlayingField, SteerInput};

    /// requestAnimationFrame-backed frame source.
    ///
    /// Each `schedule` starts a self-rechaining callback stamped with a
    /// fresh generation. A callback only runs while its generation is the
    /// live one, so `cancel` is just retiring the generation; a stale
    /// callback that was already queued wakes up, sees it lost, and exits.
    struct RafFrames {
        live: Rc<Cell<u64>>,
        next_generation: u64,
        tick: Rc<dyn Fn()>,
    }

    impl RafFrames {
        fn new(tick: impl Fn() + 'static) -> Self {
            Self {
                live: Rc::new(Cell::new(0)),
                next_generation: 0,
                tick: Rc::new(tick),
            }
        }
    }

    impl FrameSource for RafFrames {
        fn schedule(&mut self) -> FrameHandle {
            self.next_generation += 1;
            self.live.set(self.next_generation);
            chain_frame(self.live.clone(), self.next_generation, self.tick.clone());
            FrameHandle(self.next_generation)
        }

        fn cancel(&mut self, handle: FrameHandle) {
            if self.live.get() == handle.0 {
                self.live.set(0);
            }
        }
    }

    fn chain_frame(live: Rc<Cell<u64>>, generation: u64, tick: Rc<dyn Fn()>) {
        let closure = Closure::once(move |_time: f64| {
            if live.get() != generation {
                return;
            }
            tick();
            // The tick may have paused or ended the run
            if live.get() == generation {
                chain_frame(live, generation, tick);
            }
        });
        web_sys::window()
            .expect("no global window exists")
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .expect("failed to request animation frame");
        closure.forget();
    }

    /// Page chrome the app writes into
    struct Hud {
        score: Option<Element>,
        high_score: Option<Element>,
        speed: Option<Element>,
        pause_btn: Option<Element>,
        game_over: Option<Element>,
        final_score: Option<Element>,
    }

    impl Hud {
        fn new(document: &Document) -> Self {
            Self {
                score: document.get_element_by_id("score"),
                high_score: document.get_element_by_id("highscore"),
                speed: document.get_element_by_id("speed"),
                pause_btn: document.get_element_by_id("pauseBtn"),
                game_over: document.get_element_by_id("gameOver"),
                final_score: document.get_element_by_id("finalScore"),
            }
        }

        fn set_text(el: &Option<Element>, text: &str) {
            if let Some(el) = el {
                el.set_text_content(Some(text));
            }
        }

        fn set_overlay_hidden(&self, hidden: bool) {
            if let Some(el) = &self.game_over {
                let classes = el.class_list();
                let _ = if hidden {
                    classes.add_1("hidden")
                } else {
                    classes.remove_1("hidden")
                };
            }
        }
    }

    struct App {
        controller: Controller<RafFrames, LocalScore>,
        renderer: CanvasRenderer,
        input: Rc<Cell<SteerInput>>,
        hud: Hud,
    }

    impl App {
        /// One animation frame: advance the session, then repaint and
        /// refresh the page chrome
        fn frame(&mut self) {
            self.controller.tick(self.input.get());
            self.redraw();
            self.sync_ui();
        }

        fn redraw(&mut self) {
            self.renderer
                .draw_frame(self.controller.state(), self.controller.field());
        }

        fn sync_ui(&mut self) {
            let readout = self.controller.readout();
            Hud::set_text(&self.hud.score, &readout.score.to_string());
            Hud::set_text(&self.hud.high_score, &readout.high_score.to_string());
            Hud::set_text(&self.hud.speed, &format!("{:.2}", readout.speed_multiplier));
            for event in self.controller.take_events() {
                self.apply_event(event);
            }
        }

        fn apply_event(&self, event: SessionEvent) {
            match event {
                SessionEvent::Started | SessionEvent::Reset => {
                    self.hud.set_overlay_hidden(true);
                }
                SessionEvent::Paused => {
                    Hud::set_text(&self.hud.pause_btn, "Resume");
                }
                SessionEvent::Resumed => {
                    Hud::set_text(&self.hud.pause_btn, "Pause");
                }
                SessionEvent::GameOver { final_score, .. } => {
                    Hud::set_text(&self.hud.final_score, &final_score.to_string());
                    self.hud.set_overlay_hidden(false);
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("error initializing log");

        log::info!("Drive Mad starting...");

        let window = web_sys::window().expect("no global window exists");
        let document = window.document().expect("should have a document on window");

        let canvas = document
            .get_element_by_id("gameCanvas")
            .expect("canvas element not found")
            .dyn_into::<HtmlCanvasElement>()
            .expect("element is not a canvas");

        let field = PlayingField::default();
        canvas.set_width(field.width as u32);
        canvas.set_height(field.height as u32);
        fit_canvas(&canvas);

        let renderer = CanvasRenderer::new(&canvas).expect("2d context unavailable");
        let input = Rc::new(Cell::new(SteerInput::default()));

        let seed = js_sys::Date::now() as u64;
        log::info!("Session seed: {seed}");

        // The frame source ticks the app, and the app owns the frame
        // source through its controller, so tie the knot with a weak
        // back-reference.
        let app: Rc<RefCell<App>> = Rc::new_cyclic(|weak: &Weak<RefCell<App>>| {
            let tick = {
                let weak = weak.clone();
                move || {
                    if let Some(app) = weak.upgrade() {
                        app.borrow_mut().frame();
                    }
                }
            };
            RefCell::new(App {
                controller: Controller::new(field, RafFrames::new(tick), LocalScore, seed),
                renderer,
                input: Rc::clone(&input),
                hud: Hud::new(&document),
            })
        });

        // First paint and the stored best, before any run starts
        {
            let mut app = app.borrow_mut();
            app.redraw();
            app.sync_ui();
        }

        setup_buttons(&document, &app);
        setup_keyboard(&document, &input);
        setup_touch_controls(&document, &input);
        setup_auto_pause(&document, &app);
        setup_resize(&window, canvas);

        for id in ["startBtn", "pauseBtn", "restartBtn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let _ = btn.remove_attribute("disabled");
            }
        }

        log::info!("Drive Mad initialized");
    }

    fn setup_buttons(document: &Document, app: &Rc<RefCell<App>>) {
        fn on_click(document: &Document, id: &str, app: &Rc<RefCell<App>>, action: fn(&mut App)) {
            let Some(btn) = document.get_element_by_id(id) else {
                return;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                let mut app = app.borrow_mut();
                action(&mut app);
                app.sync_ui();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        on_click(document, "startBtn", app, |app| app.controller.start());
        on_click(document, "pauseBtn", app, |app| app.controller.toggle_pause());
        on_click(document, "restartBtn", app, |app| app.controller.reset());
        on_click(document, "tryAgain", app, |app| {
            app.controller.reset();
            app.controller.start();
        });
    }

    fn setup_keyboard(document: &Document, input: &Rc<Cell<SteerInput>>) {
        {
            let input = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut held = input.get();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => held.left = true,
                    "ArrowRight" | "d" | "D" => held.right = true,
                    _ => return,
                }
                input.set(held);
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let input = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut held = input.get();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => held.left = false,
                    "ArrowRight" | "d" | "D" => held.right = false,
                    _ => return,
                }
                input.set(held);
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_controls(document: &Document, input: &Rc<Cell<SteerInput>>) {
        fn on_hold(
            document: &Document,
            id: &str,
            input: &Rc<Cell<SteerInput>>,
            set: fn(&mut SteerInput, bool),
        ) {
            let Some(btn) = document.get_element_by_id(id) else {
                return;
            };
            for (event_name, held) in [("touchstart", true), ("touchend", false)] {
                let input = input.clone();
                let closure = Closure::<dyn FnMut()>::new(move || {
                    let mut steer = input.get();
                    set(&mut steer, held);
                    input.set(steer);
                });
                let _ = btn
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        on_hold(document, "leftBtn", input, |steer, held| steer.left = held);
        on_hold(document, "rightBtn", input, |steer, held| steer.right = held);

        // Keep touches on the control strip from scrolling the page
        if let Some(strip) = document.get_element_by_id("mobileControls") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
            });
            let _ = strip
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(document: &Document, app: &Rc<RefCell<App>>) {
        let app = app.clone();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.hidden() {
                let mut app = app.borrow_mut();
                app.controller.notify_hidden();
                app.sync_ui();
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Scale the canvas element to the viewport while the internal
    /// resolution stays fixed
    fn fit_canvas(canvas: &HtmlCanvasElement) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let inner_width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(FIELD_WIDTH as f64);
        let target = (inner_width * 0.9).floor().clamp(320.0, FIELD_WIDTH as f64);
        let ratio = target / FIELD_WIDTH as f64;
        let style = canvas.style();
        let _ = style.set_property("width", &format!("{target}px"));
        let _ = style.set_property("height", &format!("{}px", FIELD_HEIGHT as f64 * ratio));
    }

    fn setup_resize(window: &web_sys::Window, canvas: HtmlCanvasElement) {
        let closure = Closure::<dyn FnMut()>::new(move || fit_canvas(&canvas));
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use drive_mad::controller::{Controller, FrameHandle, FrameSource};
    use drive_mad::highscores::FileScore;
    use drive_mad::sim::{GamePhase, PlayingField, SteerInput};

    // Frame source for a loop we drive ourselves
    #[derive(Default)]
    struct HeadlessFrames {
        next: u64,
    }

    impl FrameSource for HeadlessFrames {
        fn schedule(&mut self) -> FrameHandle {
            self.next += 1;
            FrameHandle(self.next)
        }

        fn cancel(&mut self, _handle: FrameHandle) {}
    }

    env_logger::init();
    log::info!("Drive Mad (native) starting...");
    log::info!("The playable build is the browser one - run with `trunk serve`");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);
    let mut controller = Controller::new(
        PlayingField::default(),
        HeadlessFrames::default(),
        FileScore::default(),
        seed,
    );

    // Hands-off demo run: hold nothing and see how far the car gets
    controller.start();
    let mut frames = 0u64;
    while controller.phase() == GamePhase::Running && frames < 60_000 {
        controller.tick(SteerInput::default());
        frames += 1;
    }

    let readout = controller.readout();
    println!(
        "Demo run over after {frames} frames: score {}, best {}",
        readout.score, readout.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
