use glam::Vec2;

use shield_runner::audio::{AudioError, Tone, ToneSink};
use shield_runner::platform::ManualClock;
use shield_runner::sim::{GamePhase, Obstacle, ObstacleKind, PowerUp, PowerUpKind};
use shield_runner::{Command, FrameDriver, FrameRequest, MemoryHighScores, Tuning};

const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Default)]
struct RecordingAudio {
    tones: Vec<Tone>,
}

impl ToneSink for RecordingAudio {
    fn play(&mut self, tone: Tone) -> Result<(), AudioError> {
        self.tones.push(tone);
        Ok(())
    }
}

fn step<S, A>(driver: &mut FrameDriver<S, A, &ManualClock>, clock: &ManualClock) -> FrameRequest
where
    S: shield_runner::HighScoreStore,
    A: ToneSink,
{
    clock.advance(FRAME_MS);
    driver.frame()
}

/// Put an obstacle where the actor will be after this frame's scroll
fn drop_obstacle_on_actor<S, A>(driver: &mut FrameDriver<S, A, &ManualClock>)
where
    S: shield_runner::HighScoreStore,
    A: ToneSink,
{
    let state = driver.state_mut();
    let pos = Vec2::new(state.actor.pos.x + state.speed, state.actor.pos.y + 10.0);
    let obstacle = Obstacle::new(ObstacleKind::Ledger, pos, &state.tuning);
    state.obstacles.push(obstacle);
}

#[test]
fn full_run_plays_tones_and_saves_best_once() {
    let clock = ManualClock::new(10_000.0);
    let mut store = MemoryHighScores::new(2);
    let mut audio = RecordingAudio::default();
    let mut driver = FrameDriver::with_tuning(7, Tuning::without_spawns(), &mut store, &mut audio, &clock);

    assert_eq!(driver.snapshot().high_score, 2);
    assert_eq!(driver.snapshot().phase, GamePhase::Menu);

    driver.command(Command::Start);
    for _ in 0..60 {
        assert_eq!(step(&mut driver, &clock), FrameRequest::Continue);
    }
    assert_eq!(driver.snapshot().score, 6);

    driver.command(Command::Jump);
    driver.command(Command::Jump);
    step(&mut driver, &clock);

    // Land again
    while driver.state().actor.airborne {
        step(&mut driver, &clock);
    }

    drop_obstacle_on_actor(&mut driver);
    assert_eq!(step(&mut driver, &clock), FrameRequest::Stop);
    assert!(!driver.frame_pending());

    let snap = driver.snapshot();
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(snap.obstacles.len(), 1);
    assert!(snap.high_score > 2);

    // Idle after game over
    let frame = driver.state().frame;
    step(&mut driver, &clock);
    assert_eq!(driver.state().frame, frame);

    drop(driver);
    assert_eq!(audio.tones, vec![Tone::Jump, Tone::GameOver]);
    assert_eq!(store.saves, 1);
    assert!(store.best > 2);
}

#[test]
fn losing_run_below_best_does_not_save() {
    let clock = ManualClock::new(0.0);
    let mut store = MemoryHighScores::new(1_000);
    let mut driver = FrameDriver::with_tuning(
        7,
        Tuning::without_spawns(),
        &mut store,
        RecordingAudio::default(),
        &clock,
    );

    driver.command(Command::Start);
    step(&mut driver, &clock);
    drop_obstacle_on_actor(&mut driver);
    step(&mut driver, &clock);
    assert_eq!(driver.state().phase, GamePhase::GameOver);
    assert_eq!(driver.snapshot().high_score, 1_000);

    drop(driver);
    assert_eq!(store.saves, 0);
}

#[test]
fn restart_resets_run_but_keeps_best() {
    let clock = ManualClock::new(0.0);
    let mut driver = FrameDriver::with_tuning(
        3,
        Tuning::without_spawns(),
        MemoryHighScores::default(),
        RecordingAudio::default(),
        &clock,
    );
    let fresh_actor = driver.state().actor.clone();

    driver.command(Command::Start);
    for _ in 0..200 {
        step(&mut driver, &clock);
    }
    drop_obstacle_on_actor(&mut driver);
    step(&mut driver, &clock);
    let best = driver.state().high_score;
    assert_eq!(best, 20);

    // Restart: the first tick of the new run has already run
    assert!(driver.command(Command::Start));
    step(&mut driver, &clock);
    let state = driver.state();
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.high_score, best);
    assert_eq!(state.score.raw, 1);
    assert_eq!(state.frame, 1);
    assert!(state.obstacles.is_empty());
    assert_eq!(state.actor.pos, fresh_actor.pos);
    assert!(!state.actor.shield_active);
}

#[test]
fn shield_follows_wall_clock_not_frames() {
    let clock = ManualClock::new(0.0);
    let mut audio = RecordingAudio::default();
    let mut driver = FrameDriver::with_tuning(
        5,
        Tuning::without_spawns(),
        MemoryHighScores::default(),
        &mut audio,
        &clock,
    );
    driver.command(Command::Start);
    step(&mut driver, &clock);

    {
        let state = driver.state_mut();
        let pos = Vec2::new(state.actor.pos.x + state.speed, state.actor.pos.y + 5.0);
        let hat = PowerUp::new(PowerUpKind::ShieldHat, pos, &state.tuning);
        state.power_ups.push(hat);
    }
    step(&mut driver, &clock);
    assert!(driver.snapshot().actor.shield_active);
    assert!(!driver.snapshot().particles.is_empty());

    // A slow host: few frames, lots of wall time
    clock.advance(4_900.0);
    step(&mut driver, &clock);
    assert!(driver.snapshot().actor.shield_active);

    // Obstacles pass harmlessly while shielded
    drop_obstacle_on_actor(&mut driver);
    assert_eq!(step(&mut driver, &clock), FrameRequest::Continue);

    // Expiry is checked before obstacles, so the lingering obstacle now hits
    clock.advance(1_000.0);
    assert_eq!(step(&mut driver, &clock), FrameRequest::Stop);
    assert!(!driver.snapshot().actor.shield_active);
    assert_eq!(driver.snapshot().phase, GamePhase::GameOver);

    drop(driver);
    assert_eq!(audio.tones, vec![Tone::PowerUp, Tone::GameOver]);
}
