//! Game state and core simulation types
//!
//! A `GameState` owns the actor and every entity sequence for the lifetime of
//! a session. Nothing here is global; the driver hands it to `tick` by `&mut`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::spawner::Spawner;
use crate::tuning::{Size, Tuning};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Run ended by a collision
    GameOver,
}

/// Things that happened during a tick that collaborators care about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Actor left the ground
    Jumped,
    /// A shield hat was picked up at this position
    PowerUpCollected { pos: Vec2 },
    /// Run terminated
    GameOver { score: u64, new_high_score: bool },
}

#[inline]
fn size_vec(size: Size) -> Vec2 {
    Vec2::new(size.w, size.h)
}

/// The player-controlled runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity, positive is down
    pub vel_y: f32,
    pub airborne: bool,
    pub shield_active: bool,
    /// Wall-clock expiry (ms) of the current shield
    pub shield_expires_ms: f64,
}

impl Actor {
    /// Standing on the ground, at rest, unshielded
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.actor_x, tuning.actor_ground_y()),
            size: size_vec(tuning.actor_size),
            vel_y: 0.0,
            airborne: false,
            shield_active: false,
            shield_expires_ms: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Turn the shield on until `now_ms + duration_ms`
    pub fn activate_shield(&mut self, now_ms: f64, duration_ms: f64) {
        self.shield_active = true;
        self.shield_expires_ms = now_ms + duration_ms;
    }
}

/// Obstacle variants. Size is fixed per kind and baked in at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Camera,
    Pursuer,
    Ledger,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Camera, ObstacleKind::Pursuer, ObstacleKind::Ledger];

    pub fn size(&self, tuning: &Tuning) -> Vec2 {
        match self {
            ObstacleKind::Camera => size_vec(tuning.camera_size),
            ObstacleKind::Pursuer => size_vec(tuning.pursuer_size),
            ObstacleKind::Ledger => size_vec(tuning.ledger_size),
        }
    }
}

/// A scrolling hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            size: kind.size(tuning),
            kind,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Still (partly) on screen: right edge has not passed x = 0
    #[inline]
    pub fn on_screen(&self) -> bool {
        self.pos.x > -self.size.x
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Grants the shield
    #[default]
    ShieldHat,
}

/// A collectible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PowerUpKind,
    pub collected: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            size: size_vec(tuning.power_up_size),
            kind,
            collected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn on_screen(&self) -> bool {
        self.pos.x > -self.size.x
    }
}

/// A particle for visual effects (not gameplay-affecting)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining ticks
    pub life: u32,
    pub max_life: u32,
}

/// Raw accumulator plus the displayed score derived from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub raw: u64,
    pub display: u64,
}

impl Score {
    pub fn add(&mut self, points: u64, divisor: u64) {
        self.raw += points;
        self.display = self.raw / divisor;
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance values (fixed for the session)
    pub tuning: Tuning,
    /// RNG seed the session was created with
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Ticks since the run started
    pub frame: u64,
    /// Current scroll speed
    pub speed: f32,
    pub actor: Actor,
    /// Spawn order, front is oldest
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub spawner: Spawner,
    pub score: Score,
    /// Best displayed score seen so far (loaded from storage at init)
    pub high_score: u64,
}

impl GameState {
    /// Create a session in the menu with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            frame: 0,
            speed: tuning.base_speed,
            actor: Actor::new(&tuning),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            spawner: Spawner::default(),
            score: Score::default(),
            high_score: 0,
            tuning,
        }
    }

    /// Score multiplier for the current shield state
    #[inline]
    pub fn score_multiplier(&self) -> u64 {
        if self.actor.shield_active {
            self.tuning.shield_multiplier
        } else {
            1
        }
    }
}
