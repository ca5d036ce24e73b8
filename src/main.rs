//! Shield Runner entry point
//!
//! Web: maps keyboard/touch to commands, drives the simulation from
//! `requestAnimationFrame`, and exposes the latest snapshot as JSON for the
//! page's renderer. Native: runs a headless autopilot session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use shield_runner::audio::AudioManager;
    use shield_runner::highscores::LocalStorageHighScores;
    use shield_runner::platform::{Clock, SystemClock};
    use shield_runner::sim::GamePhase;
    use shield_runner::{Command, FrameDriver, FrameRequest, Settings};

    type Driver = FrameDriver<LocalStorageHighScores, AudioManager, SystemClock>;

    thread_local! {
        static SNAPSHOT: RefCell<String> = RefCell::new(String::new());
    }

    /// Latest frame snapshot for the JS renderer
    #[wasm_bindgen]
    pub fn snapshot_json() -> String {
        SNAPSHOT.with(|s| s.borrow().clone())
    }

    /// Game instance holding all state
    struct Game {
        driver: Driver,
        /// Pending requestAnimationFrame id
        raf_id: Option<i32>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            Self {
                driver: FrameDriver::new(
                    seed,
                    LocalStorageHighScores,
                    AudioManager::new(settings),
                    SystemClock,
                ),
                raf_id: None,
            }
        }

        fn publish_snapshot(&self) {
            match self.driver.snapshot().to_json() {
                Ok(json) => SNAPSHOT.with(|s| *s.borrow_mut() = json),
                Err(e) => log::warn!("Snapshot serialization failed: {}", e),
            }
        }

        /// The primary action starts a run from the menu/game over and jumps mid-run
        fn primary_command(&self) -> Command {
            if self.driver.state().phase == GamePhase::Playing {
                Command::Jump
            } else {
                Command::Start
            }
        }

        /// Stop the frame loop. Safe to call with nothing scheduled.
        fn cancel_frame(&mut self) {
            if let Some(id) = self.raf_id.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
            self.driver.cancel_frame();
        }
    }

    pub fn run() {
        let seed = SystemClock.now_ms() as u64;
        log::info!("Shield Runner starting with seed {}", seed);

        let game = Rc::new(RefCell::new(Game::new(seed)));
        game.borrow().publish_snapshot();

        setup_input_handlers(game);

        log::info!("Shield Runner ready");
    }

    fn send(game: &Rc<RefCell<Game>>, command: Command) {
        let needs_frame = {
            let mut g = game.borrow_mut();
            if command == Command::Start {
                g.driver.audio_mut().resume();
            }
            g.driver.command(command)
        };
        if needs_frame {
            request_animation_frame(game);
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; input disabled");
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let command = match event.key().as_str() {
                    " " | "ArrowUp" | "w" | "W" => {
                        event.prevent_default();
                        Some(game.borrow().primary_command())
                    }
                    "Enter" => Some(Command::Start),
                    "m" | "M" => {
                        let mut g = game.borrow_mut();
                        let settings = g.driver.audio_mut().settings_mut();
                        settings.toggle_mute();
                        settings.save();
                        log::info!("Muted: {}", settings.muted);
                        None
                    }
                    _ => None,
                };
                if let Some(command) = command {
                    send(&game, command);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                event.prevent_default();
                let command = game.borrow().primary_command();
                send(&game, command);
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let loop_game = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(loop_game);
        });
        let id = window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
        game.borrow_mut().raf_id = id;
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let request = {
            let mut g = game.borrow_mut();
            g.raf_id = None;
            let request = g.driver.frame();
            g.publish_snapshot();
            request
        };

        match request {
            FrameRequest::Continue => request_animation_frame(&game),
            FrameRequest::Stop => game.borrow_mut().cancel_frame(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use shield_runner::audio::SilentAudio;
    use shield_runner::highscores::FileHighScores;
    use shield_runner::platform::{Clock, ManualClock, SystemClock};
    use shield_runner::{FrameDriver, HighScoreStore, MemoryHighScores};

    env_logger::init();
    log::info!("Shield Runner (native) starting...");
    log::info!("Native mode runs a headless autopilot - serve the wasm build to play");

    let mut file_store;
    let mut memory_store = MemoryHighScores::default();
    let store: &mut dyn HighScoreStore = match FileHighScores::default_location() {
        Some(found) => {
            file_store = found;
            log::info!("High score file: {}", file_store.path().display());
            &mut file_store
        }
        None => {
            log::warn!("No data directory; high score will not persist");
            &mut memory_store
        }
    };

    // Simulated 60 Hz wall clock so the shield lasts as long as it would on screen
    let clock = ManualClock::new(SystemClock.now_ms());
    let seed = clock.now_ms() as u64;
    let mut driver = FrameDriver::new(seed, store, SilentAudio, &clock);

    let frames = autopilot::run(&mut driver, &clock, 60 * 60 * 5);
    let state = driver.state();
    log::info!(
        "Autopilot finished after {} frames: score {}, best {}, speed {:.2}",
        frames,
        state.score.display,
        state.high_score,
        state.speed
    );
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use shield_runner::audio::ToneSink;
    use shield_runner::platform::ManualClock;
    use shield_runner::sim::GameState;
    use shield_runner::{Command, FrameDriver, FrameRequest, HighScoreStore};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Jump when the nearest obstacle ahead is about to reach the actor
    fn should_jump(state: &GameState) -> bool {
        let actor_right = state.actor.pos.x + state.actor.size.x;
        // Lead distance: a few ticks of travel at the current speed
        let lead = state.speed * 8.0;
        state.obstacles.iter().any(|o| {
            let gap = o.pos.x - actor_right;
            gap > 0.0 && gap < lead
        })
    }

    /// Play one run for at most `max_frames`. Returns frames played.
    pub fn run<S: HighScoreStore, A: ToneSink>(
        driver: &mut FrameDriver<S, A, &ManualClock>,
        clock: &ManualClock,
        max_frames: u32,
    ) -> u32 {
        driver.command(Command::Start);
        for frame in 1..=max_frames {
            if should_jump(driver.state()) {
                driver.command(Command::Jump);
            }
            clock.advance(FRAME_MS);
            if driver.frame() == FrameRequest::Stop {
                return frame;
            }
        }
        max_frames
    }
}
