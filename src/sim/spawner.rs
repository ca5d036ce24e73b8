//! Obstacle and power-up spawning
//!
//! Each tick runs one Bernoulli trial per category, gated by a cooldown in
//! frames since that category last spawned. The spawner owns no entities.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, ObstacleKind, PowerUp, PowerUpKind};
use crate::tuning::Tuning;

/// Spawn cadence counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawner {
    pub frames_since_obstacle: u32,
    pub frames_since_power_up: u32,
}

impl Spawner {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance the obstacle counter and maybe emit an obstacle at the right edge
    pub fn try_spawn_obstacle<R: Rng>(&mut self, tuning: &Tuning, rng: &mut R) -> Option<Obstacle> {
        self.frames_since_obstacle = self.frames_since_obstacle.saturating_add(1);
        if self.frames_since_obstacle < tuning.obstacle_cooldown || !roll(rng, tuning.obstacle_chance) {
            return None;
        }
        self.frames_since_obstacle = 0;

        let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
        let pos = Vec2::new(tuning.screen_width, tuning.ground_y - tuning.obstacle_offset);
        log::debug!("Spawned {:?} obstacle", kind);
        Some(Obstacle::new(kind, pos, tuning))
    }

    /// Advance the power-up counter and maybe emit a shield hat at the right edge
    pub fn try_spawn_power_up<R: Rng>(&mut self, tuning: &Tuning, rng: &mut R) -> Option<PowerUp> {
        self.frames_since_power_up = self.frames_since_power_up.saturating_add(1);
        if self.frames_since_power_up < tuning.power_up_cooldown || !roll(rng, tuning.power_up_chance) {
            return None;
        }
        self.frames_since_power_up = 0;

        let pos = Vec2::new(tuning.screen_width, tuning.ground_y - tuning.power_up_offset);
        Some(PowerUp::new(PowerUpKind::ShieldHat, pos, tuning))
    }
}

#[inline]
fn roll<R: Rng>(rng: &mut R, chance: f64) -> bool {
    rng.random::<f64>() < chance
}
