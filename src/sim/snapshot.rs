//! Read-only view of a session for the presentation layer

use glam::Vec2;
use serde::Serialize;

use super::state::{GamePhase, GameState, Obstacle, Particle, PowerUp};

/// Actor pose as the renderer needs it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorView {
    pub pos: Vec2,
    pub size: Vec2,
    pub shield_active: bool,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub actor: ActorView,
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub score: u64,
    pub high_score: u64,
    pub speed: f32,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            actor: ActorView {
                pos: state.actor.pos,
                size: state.actor.size,
                shield_active: state.actor.shield_active,
            },
            obstacles: state.obstacles.clone(),
            power_ups: state.power_ups.clone(),
            particles: state.particles.clone(),
            score: state.score.display,
            high_score: state.high_score,
            speed: state.speed,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
