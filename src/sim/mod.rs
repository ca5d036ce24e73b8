//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - Fixed logical timestep (one tick per rendered frame)
//! - Seeded RNG only
//! - Spawn-ordered entity sequences
//! - No rendering, audio, storage or platform dependencies
//!
//! The wall clock enters only as the `now_ms` argument to `tick`.

pub mod collision;
pub mod session;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use snapshot::{ActorView, Snapshot};
pub use spawner::Spawner;
pub use state::{
    Actor, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Particle, PowerUp,
    PowerUpKind, Score,
};
pub use tick::{TickInput, tick};
