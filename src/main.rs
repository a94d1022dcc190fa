//! Mini Royale entry point
//!
//! Web builds wire the canvas, keyboard and HUD elements to the simulation.
//! Native builds run a headless autopilot game and log the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent,
    };

    use mini_royale::hud::{HudText, final_message};
    use mini_royale::consts::MAX_FRAME_MS;
    use mini_royale::sim::{GameState, InputSnapshot, SimulationClock, autopilot_input, step};
    use mini_royale::Tuning;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        clock: SimulationClock,
        input: InputSnapshot,
        ctx: CanvasRenderingContext2d,
        /// Demo mode - the autopilot plays
        idle_mode: bool,
    }

    impl Game {
        fn new(tuning: Tuning, seed: u64, ctx: CanvasRenderingContext2d) -> Self {
            // Browsers stall hidden tabs; cap the catch-up frame unless tuned
            let max_frame_ms = tuning.max_frame_ms.or(Some(MAX_FRAME_MS));
            Self {
                clock: SimulationClock::new(max_frame_ms),
                state: GameState::new(tuning, seed),
                input: InputSnapshot::default(),
                ctx,
                idle_mode: false,
            }
        }

        fn set_key(&mut self, key: &str, held: bool) {
            match key.to_lowercase().as_str() {
                "w" | "arrowup" => self.input.up = held,
                "s" | "arrowdown" => self.input.down = held,
                "a" | "arrowleft" => self.input.left = held,
                "d" | "arrowright" => self.input.right = held,
                "i" if held => {
                    self.idle_mode = !self.idle_mode;
                    log::info!("Idle mode: {}", self.idle_mode);
                }
                _ => {}
            }
        }

        fn update(&mut self, time: f64) {
            let dt = self.clock.tick(time);
            let input = if self.idle_mode {
                autopilot_input(&self.state)
            } else {
                self.input.clone()
            };
            step(&mut self.state, &input, dt);

            for event in self.state.drain_events() {
                log::debug!("{:?}", event);
            }
        }

        fn render(&self) {
            let ctx = &self.ctx;
            let view = self.state.view();
            let w = self.state.tuning.arena_width as f64;
            let h = self.state.tuning.arena_height as f64;
            let (cx, cy) = (view.zone_center.x as f64, view.zone_center.y as f64);
            let zone_r = view.zone_radius as f64;

            ctx.clear_rect(0.0, 0.0, w, h);

            // Darken everything outside the safe zone
            ctx.save();
            ctx.set_fill_style_str("rgba(0,0,0,0.55)");
            ctx.fill_rect(0.0, 0.0, w, h);
            let _ = ctx.set_global_composite_operation("destination-out");
            ctx.begin_path();
            let _ = ctx.arc(cx, cy, zone_r, 0.0, TAU);
            ctx.fill();
            ctx.restore();

            ctx.begin_path();
            ctx.set_stroke_style_str("#8be5a8");
            ctx.set_line_width(2.0);
            let _ = ctx.arc(cx, cy, zone_r, 0.0, TAU);
            ctx.stroke();

            // Player body and barrel, rotated toward the cursor
            let p = &view.player;
            let r = p.radius as f64;
            ctx.save();
            let _ = ctx.translate(p.pos.x as f64, p.pos.y as f64);
            let _ = ctx.rotate(view.aim_angle as f64);
            ctx.set_fill_style_str("#e5e7eb");
            ctx.fill_rect(-r, -r, r * 2.0, r * 2.0);
            ctx.set_fill_style_str("#cbd5e1");
            ctx.fill_rect(r - 2.0, -4.0, 12.0, 8.0);
            ctx.restore();

            ctx.set_fill_style_str("#ffd166");
            for b in &view.bullets {
                fill_circle(ctx, b.pos, b.radius);
            }

            ctx.set_fill_style_str("#f87171");
            for e in &view.enemies {
                fill_circle(ctx, e.pos, e.radius);
            }

            // Crosshair
            ctx.begin_path();
            ctx.set_stroke_style_str("rgba(255,255,255,0.6)");
            let _ = ctx.arc(p.aim.x as f64, p.aim.y as f64, 8.0, 0.0, TAU);
            ctx.stroke();
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = HudText::from_state(&self.state);

            if let Some(el) = document.get_element_by_id("hp") {
                el.set_text_content(Some(&hud.hp_label()));
            }
            if let Some(el) = document.get_element_by_id("ammo") {
                el.set_text_content(Some(&hud.ammo_label()));
            }
            if let Some(el) = document.get_element_by_id("time") {
                el.set_text_content(Some(&hud.time_label()));
            }

            if let Some(message) = final_message(&self.state) {
                if let Some(el) = document.get_element_by_id("msg") {
                    el.set_text_content(Some(&message));
                }
                if let Some(btn) = document
                    .get_element_by_id("restart")
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                {
                    let _ = btn.style().set_property("display", "inline-block");
                }
            }
        }
    }

    fn fill_circle(ctx: &CanvasRenderingContext2d, pos: Vec2, radius: f32) {
        ctx.begin_path();
        let _ = ctx.arc(pos.x as f64, pos.y as f64, radius as f64, 0.0, TAU);
        ctx.fill();
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {e}").into());
        }

        log::info!("Mini Royale starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        // Canvas pixel size defines the arena
        let tuning = Tuning {
            arena_width: canvas.width() as f32,
            arena_height: canvas.height() as f32,
            ..Tuning::load()
        }
        .validated_or_default();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(tuning, seed, ctx)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button();

        request_animation_frame(game);

        log::info!("Mini Royale running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        for (event_name, held) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().set_key(&event.key(), held);
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse position, scaled from CSS pixels to canvas pixels
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                if rect.width() <= 0.0 || rect.height() <= 0.0 {
                    return;
                }
                let sx = canvas_clone.width() as f64 / rect.width();
                let sy = canvas_clone.height() as f64 / rect.height();
                let x = (event.client_x() as f64 - rect.left()) * sx;
                let y = (event.client_y() as f64 - rect.top()) * sy;
                game.borrow_mut().input.cursor = Some(Vec2::new(x as f32, y as f32));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for (event_name, held) in [("mousedown", true), ("mouseup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.fire = held;
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Restart is a full page reload
    fn setup_restart_button() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().reload();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
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
        let game_over = {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
            g.state.game_over
        };

        // Game over is final: stop scheduling frames
        if !game_over {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use mini_royale::hud::{HudText, final_message};
    use mini_royale::sim::{GameEvent, GameState, SimulationClock, autopilot_input, step};
    use mini_royale::Tuning;

    /// Headless frame rate
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after this much simulated time
    const TIME_LIMIT_MS: f32 = 10.0 * 60.0 * 1000.0;

    env_logger::init();
    log::info!("Mini Royale (native) starting...");
    log::info!("Native mode runs the autopilot headless - build for wasm32 to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let tuning = Tuning::load();
    let mut clock = SimulationClock::from_tuning(&tuning);
    let mut state = GameState::new(tuning, seed);
    log::info!("Game initialized with seed: {}", seed);

    let mut kills = 0u32;
    let mut shots = 0u32;
    let mut now = 0.0;
    while !state.game_over && state.elapsed_ms < TIME_LIMIT_MS {
        let dt = clock.tick(now);
        now += FRAME_MS;

        let input = autopilot_input(&state);
        step(&mut state, &input, dt);

        for event in state.drain_events() {
            match event {
                GameEvent::ShotFired { .. } => shots += 1,
                GameEvent::EnemyKilled { .. } => kills += 1,
                other => log::debug!("{:?}", other),
            }
        }
    }

    let hud = HudText::from_state(&state);
    println!("{} | {} | {}", hud.hp_label(), hud.time_label(), hud.ammo_label());
    println!("Shots: {} Kills: {} Enemies alive: {}", shots, kills, state.enemies.len());
    match final_message(&state) {
        Some(message) => println!("{}", message),
        None => println!("Survived the time limit"),
    }

    match serde_json::to_string(&state.view()) {
        Ok(json) => log::debug!("Final view: {}", json),
        Err(e) => log::warn!("Could not serialize final view: {}", e),
    }
}
