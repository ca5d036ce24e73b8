//! Session phase transitions
//!
//! Menu -> Playing -> GameOver -> Playing ... Commands that don't apply in the
//! current phase are silently ignored.

use super::state::{Actor, GameEvent, GamePhase, GameState, Score};

impl GameState {
    /// Begin a fresh run from `Menu` or `GameOver`. Returns false if ignored.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            return false;
        }

        self.actor = Actor::new(&self.tuning);
        self.obstacles.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.score = Score::default();
        self.spawner.reset();
        self.frame = 0;
        self.speed = self.tuning.base_speed;
        self.phase = GamePhase::Playing;

        log::info!("Run started (seed {}, best {})", self.seed, self.high_score);
        true
    }

    /// Jump if playing and grounded. No double jumps.
    pub fn jump(&mut self) -> Option<GameEvent> {
        if self.phase != GamePhase::Playing || self.actor.airborne {
            return None;
        }
        self.actor.vel_y = self.tuning.jump_impulse;
        self.actor.airborne = true;
        Some(GameEvent::Jumped)
    }

    /// Collision-terminated run. Only the first call per run transitions.
    pub fn end_run(&mut self) -> Option<GameEvent> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        self.phase = GamePhase::GameOver;

        let score = self.score.display;
        let new_high_score = score > self.high_score;
        if new_high_score {
            self.high_score = score;
        }
        log::info!("Game over: score {} (best {}{})", score, self.high_score, if new_high_score { ", new" } else { "" });

        Some(GameEvent::GameOver { score, new_high_score })
    }
}
