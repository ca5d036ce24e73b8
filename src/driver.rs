//! Per-frame orchestration
//!
//! The driver sits between the host (input events, animation-frame callbacks)
//! and the simulation. It latches commands until the next frame, runs one tick
//! per frame while playing, and forwards tick events to the audio and
//! high-score collaborators.

use crate::audio::{Tone, ToneSink};
use crate::highscores::HighScoreStore;
use crate::platform::Clock;
use crate::sim::{GameEvent, GamePhase, GameState, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

/// Abstract player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Jump,
}

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    Continue,
    Stop,
}

/// Owns the session and its collaborators
pub struct FrameDriver<S, A, C> {
    state: GameState,
    /// Commands latched since the last frame
    input: TickInput,
    store: S,
    audio: A,
    clock: C,
    frame_pending: bool,
}

impl<S: HighScoreStore, A: ToneSink, C: Clock> FrameDriver<S, A, C> {
    pub fn new(seed: u64, store: S, audio: A, clock: C) -> Self {
        Self::with_tuning(seed, Tuning::default(), store, audio, clock)
    }

    /// Build a session in the menu. Reads the stored best score once.
    pub fn with_tuning(seed: u64, tuning: Tuning, mut store: S, audio: A, clock: C) -> Self {
        let mut state = GameState::with_tuning(seed, tuning);
        state.high_score = match store.load() {
            Ok(best) => best,
            Err(e) => {
                log::warn!("Could not load high score, using 0: {}", e);
                0
            }
        };

        Self {
            state,
            input: TickInput::default(),
            store,
            audio,
            clock,
            frame_pending: false,
        }
    }

    /// Accept a command from input. Returns true if the host must now
    /// schedule a frame (one wasn't already pending).
    pub fn command(&mut self, command: Command) -> bool {
        match command {
            Command::Start => {
                if self.state.phase == GamePhase::Playing {
                    return false;
                }
                self.input.start = true;
                self.request_frame()
            }
            Command::Jump => {
                // Only meaningful mid-run; several jumps before a frame are one jump
                if self.state.phase == GamePhase::Playing {
                    self.input.jump = true;
                }
                false
            }
        }
    }

    /// Run one frame: apply latched commands, tick, dispatch events
    pub fn frame(&mut self) -> FrameRequest {
        self.frame_pending = false;

        let input = std::mem::take(&mut self.input);
        let now_ms = self.clock.now_ms();
        for event in tick(&mut self.state, &input, now_ms) {
            self.dispatch(event);
        }

        if self.state.phase == GamePhase::Playing {
            self.frame_pending = true;
            FrameRequest::Continue
        } else {
            FrameRequest::Stop
        }
    }

    /// Drop any pending frame request. Safe to call when none is pending.
    pub fn cancel_frame(&mut self) {
        self.frame_pending = false;
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    fn request_frame(&mut self) -> bool {
        let newly_requested = !self.frame_pending;
        self.frame_pending = true;
        newly_requested
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::Jumped => self.play(Tone::Jump),
            GameEvent::PowerUpCollected { .. } => self.play(Tone::PowerUp),
            GameEvent::GameOver { score, new_high_score } => {
                self.play(Tone::GameOver);
                if new_high_score {
                    if let Err(e) = self.store.save(score) {
                        log::warn!("Could not save high score {}: {}", score, e);
                    }
                }
            }
        }
    }

    fn play(&mut self, tone: Tone) {
        if let Err(e) = self.audio.play(tone) {
            log::debug!("Tone {:?} skipped: {}", tone, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioError, SilentAudio};
    use crate::highscores::{MemoryHighScores, StoreError};
    use crate::platform::ManualClock;

    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn load(&mut self) -> Result<u64, StoreError> {
            Err(StoreError::Unavailable("test".to_string()))
        }

        fn save(&mut self, _score: u64) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("test".to_string()))
        }
    }

    struct BrokenAudio;

    impl ToneSink for BrokenAudio {
        fn play(&mut self, _tone: Tone) -> Result<(), AudioError> {
            Err(AudioError::Unavailable)
        }
    }

    #[test]
    fn test_idle_until_start() {
        let clock = ManualClock::new(0.0);
        let mut driver = FrameDriver::new(1, MemoryHighScores::default(), SilentAudio, &clock);
        assert!(!driver.frame_pending());
        assert!(!driver.command(Command::Jump));

        assert_eq!(driver.frame(), FrameRequest::Stop);
        assert_eq!(driver.state().frame, 0);

        assert!(driver.command(Command::Start));
        // Already pending
        assert!(!driver.command(Command::Start));
        assert_eq!(driver.frame(), FrameRequest::Continue);
        assert_eq!(driver.state().phase, GamePhase::Playing);
        assert!(driver.frame_pending());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let clock = ManualClock::new(0.0);
        let mut driver = FrameDriver::new(1, MemoryHighScores::default(), SilentAudio, &clock);
        driver.cancel_frame();
        driver.command(Command::Start);
        driver.cancel_frame();
        driver.cancel_frame();
        assert!(!driver.frame_pending());
    }

    #[test]
    fn test_jump_before_start_is_dropped() {
        let clock = ManualClock::new(0.0);
        let mut driver = FrameDriver::new(1, MemoryHighScores::default(), SilentAudio, &clock);
        driver.command(Command::Jump);
        driver.command(Command::Start);
        driver.frame();
        assert!(!driver.state().actor.airborne);
    }

    #[test]
    fn test_failing_collaborators_never_stop_the_game() {
        let clock = ManualClock::new(0.0);
        let mut driver = FrameDriver::with_tuning(1, Tuning::without_spawns(), BrokenStore, BrokenAudio, &clock);
        assert_eq!(driver.state().high_score, 0);

        driver.command(Command::Start);
        driver.frame();
        driver.command(Command::Jump);
        assert_eq!(driver.frame(), FrameRequest::Continue);
        assert!(driver.state().actor.airborne);

        // Force a collision; the failed save is swallowed
        let state = driver.state_mut();
        state.score.add(500, 10);
        let pos = glam::Vec2::new(state.actor.pos.x + state.speed, state.actor.pos.y);
        let obstacle = crate::sim::Obstacle::new(crate::sim::ObstacleKind::Camera, pos, &state.tuning);
        state.obstacles.push(obstacle);
        assert_eq!(driver.frame(), FrameRequest::Stop);
        assert_eq!(driver.state().phase, GamePhase::GameOver);
        assert_eq!(driver.state().high_score, 50);
    }
}
