//! Mini Golf entry point
//!
//! Web: wires keyboard commands into `TickInput`, runs the frame loop and
//! turns `GameEvent`s into HUD updates. Native: plays a headless round.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlElement, KeyboardEvent};

    use mini_golf::platform::FrameClock;
    use mini_golf::sim::{GameEvent, GameState, TickInput, tick};
    use mini_golf::{Scorecard, Settings};

    /// Aim change per arrow key press (radians)
    const AIM_STEP: f32 = 0.05;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        clock: FrameClock,
        input: TickInput,
        scorecard: Scorecard,
    }

    impl Game {
        fn update(&mut self, time: f64) {
            let dt = self.clock.advance(time);
            let input = std::mem::take(&mut self.input);
            tick(&mut self.state, &input, dt);

            for event in self.state.drain_events() {
                self.present(&event);
            }
        }

        /// Reflect one event in the DOM
        fn present(&mut self, event: &GameEvent) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            match event {
                GameEvent::HoleStarted { .. } => {
                    set_text(&document, "#shot-info p", "0");
                    set_display(&document, "clear-message", "none");
                }
                GameEvent::ShotTaken { shots, .. } | GameEvent::OutOfBounds { shots } => {
                    set_text(&document, "#shot-info p", &shots.to_string());
                }
                GameEvent::PowerChanged { power } => {
                    let pct = (power * 100.0).round() as u32;
                    if let Some(bar) = element(&document, "power-bar") {
                        let _ = bar.style().set_property("width", &format!("{pct}%"));
                    }
                    set_text(&document, "#power-label", &format!("Power: {pct}%"));
                }
                GameEvent::HoleComplete { shots } => {
                    set_text(&document, "#clear-shots-text", &format!("Shots: {shots}"));
                    set_display(&document, "clear-message", "block");
                    let seed = self.state.course.config.seed;
                    if let Some(rank) = self.scorecard.add(*shots, seed, js_sys::Date::now()) {
                        log::info!("New scorecard entry, rank {rank}");
                        self.scorecard.save();
                    }
                }
                GameEvent::ShotRejected
                | GameEvent::BallStopped { .. }
                | GameEvent::BallReset => {}
            }
        }
    }

    fn element(document: &web_sys::Document, id: &str) -> Option<HtmlElement> {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn set_text(document: &web_sys::Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_display(document: &web_sys::Document, id: &str, value: &str) {
        if let Some(el) = element(document, id) {
            let _ = el.style().set_property("display", value);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Mini Golf starting...");

        let settings = Settings::load();
        let state = match GameState::new(&settings) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Invalid course: {e}");
                return;
            }
        };
        // Persist the settings that built a valid hole so they can be edited
        settings.save();

        let game = Rc::new(RefCell::new(Game {
            state,
            clock: FrameClock::new(settings.tuning.max_frame_dt),
            input: TickInput::default(),
            scorecard: Scorecard::load(),
        }));

        setup_keyboard(game.clone());
        request_animation_frame(game);
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().to_lowercase().as_str() {
                "s" => g.input.begin_charge = true,
                "d" => g.input.release_charge = true,
                "escape" => g.input.cancel_charge = true,
                "r" => g.input.reset = true,
                "n" => g.input.next_hole = true,
                "arrowleft" => {
                    let angle = g.input.aim_angle.unwrap_or(g.state.aim_angle) + AIM_STEP;
                    g.input.aim_angle = Some(angle);
                }
                "arrowright" => {
                    let angle = g.input.aim_angle.unwrap_or(g.state.aim_angle) - AIM_STEP;
                    g.input.aim_angle = Some(angle);
                }
                _ => {}
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
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
        game.borrow_mut().update(time);
        request_animation_frame(game);
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
fn main() {
    env_logger::init();
    log::info!("Mini Golf (native) starting...");
    log::info!("Native mode plays a headless round - run with `trunk serve` for the web version");

    let settings = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => mini_golf::Settings::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read {path}: {e}");
                mini_golf::Settings::load()
            }
        },
        None => mini_golf::Settings::load(),
    };

    match play_round(&settings) {
        Ok(Some(shots)) => println!("Holed out in {shots} shots"),
        Ok(None) => println!("Gave up after {MAX_DEMO_SHOTS} shots"),
        Err(e) => {
            eprintln!("Invalid course: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
const MAX_DEMO_SHOTS: u32 = 20;

/// Follow the fairway route: each shot aims at the farthest route point the
/// ball can roll to without touching a wall, with power scaled to the distance
#[cfg(not(target_arch = "wasm32"))]
fn play_round(settings: &mini_golf::Settings) -> Result<Option<u32>, mini_golf::CourseError> {
    use glam::Vec2;
    use mini_golf::sim::{
        GameEvent, GamePhase, GameState, TickInput, aim_direction, fairway_route, take_shot, tick,
    };

    const FRAME_DT: f32 = 1.0 / 60.0;
    // Rough distance a full-power putt rolls on flat ground
    const FULL_POWER_RANGE: f32 = 70.0;
    const MAX_FRAMES_PER_SHOT: u32 = 60 * 60;

    let mut state = GameState::new(settings)?;
    let idle = TickInput::default();
    let route = fairway_route(&state.course.config);

    while state.shots < MAX_DEMO_SHOTS {
        let ball = Vec2::new(state.ball.position.x, state.ball.position.z);
        let radius = state.ball.radius;
        let target = route
            .iter()
            .rev()
            .find(|&&to| !state.course.walls.iter().any(|w| w.blocks_path(ball, to, radius)))
            .copied()
            .unwrap_or(state.course.hole_center());
        let (dx, dz) = (target.x - ball.x, target.y - ball.y);
        let angle = dx.atan2(dz);
        let power = ((dx * dx + dz * dz).sqrt() / FULL_POWER_RANGE).clamp(0.02, 1.0);
        log::debug!("Aiming at ({:.1}, {:.1}) with power {power:.2}", target.x, target.y);

        if !take_shot(&mut state, aim_direction(angle), power) {
            break;
        }
        let mut frames = 0;
        while state.ball.moving && frames < MAX_FRAMES_PER_SHOT {
            tick(&mut state, &idle, FRAME_DT);
            frames += 1;
        }

        for event in state.drain_events() {
            match event {
                GameEvent::BallStopped { position } => {
                    log::info!("Ball stopped at ({:.2}, {:.2})", position.x, position.z)
                }
                GameEvent::OutOfBounds { shots } => log::info!("Shot {shots} went out of bounds"),
                other => log::debug!("{other:?}"),
            }
        }

        if state.phase == GamePhase::HoleComplete {
            return Ok(Some(state.shots));
        }
    }
    Ok(None)
}
