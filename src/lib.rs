//! Shield Runner - A side-scrolling arcade runner
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (physics, spawning, collisions, session state)
//! - `driver`: Per-frame orchestration and collaborator dispatch
//! - `platform`: Browser/native platform abstraction (wall clock)
//! - `highscores`: Best-score persistence
//! - `audio`: Tone feedback for jump, pickup and game over
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod driver;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::{Command, FrameDriver, FrameRequest};
pub use highscores::{HighScoreStore, MemoryHighScores, StoreError};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// Everything is in logical pixels and frame ticks unless the name says otherwise.
pub mod consts {
    /// Logical canvas dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 400.0;
    /// Top of the ground strip; entities stand on this line
    pub const GROUND_Y: f32 = 350.0;

    /// Actor defaults
    pub const ACTOR_X: f32 = 100.0;
    pub const ACTOR_WIDTH: f32 = 40.0;
    pub const ACTOR_HEIGHT: f32 = 50.0;

    /// Added to vertical velocity every tick (no dt scaling)
    pub const GRAVITY: f32 = 0.6;
    /// Vertical velocity set by a jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -12.0;

    /// Scroll speed at frame 0
    pub const BASE_SPEED: f32 = 4.0;
    /// Frames per +1 of scroll speed. The ramp has no ceiling.
    pub const SPEED_RAMP_FRAMES: f32 = 3600.0;

    /// Spawn cadence
    pub const OBSTACLE_COOLDOWN_FRAMES: u32 = 120;
    pub const OBSTACLE_SPAWN_CHANCE: f64 = 0.01;
    pub const POWER_UP_COOLDOWN_FRAMES: u32 = 300;
    pub const POWER_UP_SPAWN_CHANCE: f64 = 0.003;

    /// Obstacle sizes (camera and pursuer share a footprint, ledger is smaller)
    pub const CAMERA_SIZE: (f32, f32) = (40.0, 40.0);
    pub const PURSUER_SIZE: (f32, f32) = (40.0, 40.0);
    pub const LEDGER_SIZE: (f32, f32) = (30.0, 30.0);
    pub const POWER_UP_SIZE: (f32, f32) = (30.0, 30.0);

    /// Spawn heights, measured up from the ground line
    pub const OBSTACLE_GROUND_OFFSET: f32 = 40.0;
    pub const POWER_UP_GROUND_OFFSET: f32 = 80.0;

    /// Shield lifetime in wall-clock milliseconds
    pub const SHIELD_DURATION_MS: f64 = 5000.0;
    /// Raw score added per tick while shielded (1 otherwise)
    pub const SHIELD_SCORE_MULTIPLIER: u64 = 2;
    /// Raw accumulator units per displayed point
    pub const SCORE_DIVISOR: u64 = 10;

    /// Collection burst
    pub const PARTICLE_BURST: usize = 15;
    pub const PARTICLE_LIFE: u32 = 30;
    pub const PARTICLE_SPEED: f32 = 4.0;
}
