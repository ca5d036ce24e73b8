//! Game balance values
//!
//! A `Tuning` is fixed for the lifetime of a session. Defaults come from
//! [`crate::consts`].

use crate::consts::*;

/// Width and height pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

impl Size {
    pub const fn new((w, h): (f32, f32)) -> Self {
        Self { w, h }
    }
}

/// Every tunable constant the simulation reads
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    pub screen_width: f32,
    pub ground_y: f32,

    pub actor_x: f32,
    pub actor_size: Size,
    pub gravity: f32,
    pub jump_impulse: f32,

    pub base_speed: f32,
    pub speed_ramp_frames: f32,

    pub obstacle_cooldown: u32,
    pub obstacle_chance: f64,
    pub power_up_cooldown: u32,
    pub power_up_chance: f64,

    pub camera_size: Size,
    pub pursuer_size: Size,
    pub ledger_size: Size,
    pub power_up_size: Size,
    pub obstacle_offset: f32,
    pub power_up_offset: f32,

    pub shield_duration_ms: f64,
    pub shield_multiplier: u64,
    pub score_divisor: u64,

    pub particle_burst: usize,
    pub particle_life: u32,
    pub particle_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            ground_y: GROUND_Y,

            actor_x: ACTOR_X,
            actor_size: Size::new((ACTOR_WIDTH, ACTOR_HEIGHT)),
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,

            base_speed: BASE_SPEED,
            speed_ramp_frames: SPEED_RAMP_FRAMES,

            obstacle_cooldown: OBSTACLE_COOLDOWN_FRAMES,
            obstacle_chance: OBSTACLE_SPAWN_CHANCE,
            power_up_cooldown: POWER_UP_COOLDOWN_FRAMES,
            power_up_chance: POWER_UP_SPAWN_CHANCE,

            camera_size: Size::new(CAMERA_SIZE),
            pursuer_size: Size::new(PURSUER_SIZE),
            ledger_size: Size::new(LEDGER_SIZE),
            power_up_size: Size::new(POWER_UP_SIZE),
            obstacle_offset: OBSTACLE_GROUND_OFFSET,
            power_up_offset: POWER_UP_GROUND_OFFSET,

            shield_duration_ms: SHIELD_DURATION_MS,
            shield_multiplier: SHIELD_SCORE_MULTIPLIER,
            score_divisor: SCORE_DIVISOR,

            particle_burst: PARTICLE_BURST,
            particle_life: PARTICLE_LIFE,
            particle_speed: PARTICLE_SPEED,
        }
    }
}

impl Tuning {
    /// Tuning with both spawn rolls disabled (scripted scenarios, demos)
    pub fn without_spawns() -> Self {
        Self {
            obstacle_chance: 0.0,
            power_up_chance: 0.0,
            ..Self::default()
        }
    }

    /// Y coordinate of the actor's top edge when standing on the ground
    #[inline]
    pub fn actor_ground_y(&self) -> f32 {
        self.ground_y - self.actor_size.h
    }

    /// Scroll speed after `frames` ticks. Unbounded linear ramp.
    #[inline]
    pub fn speed_at(&self, frames: u64) -> f32 {
        self.base_speed + frames as f32 / self.speed_ramp_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.obstacle_cooldown, 120);
        assert_eq!(t.power_up_cooldown, 300);
        assert_eq!(t.obstacle_chance, 0.01);
        assert_eq!(t.power_up_chance, 0.003);
        assert_eq!(t.actor_ground_y(), GROUND_Y - ACTOR_HEIGHT);
        assert!(t.ledger_size.w < t.camera_size.w);
        assert!(t.ledger_size.h < t.pursuer_size.h);
    }

    #[test]
    fn test_shipped_tunings_are_well_formed() {
        // Divisors and the burst speed range must be non-empty or the tick panics
        for t in [Tuning::default(), Tuning::without_spawns()] {
            assert!(t.score_divisor > 0);
            assert!(t.speed_ramp_frames > 0.0);
            assert!(t.particle_speed > 0.0);
            assert!(t.speed_at(0).is_finite());
            assert!((0.0..=1.0).contains(&t.obstacle_chance));
            assert!((0.0..=1.0).contains(&t.power_up_chance));
        }
    }

    #[test]
    fn test_speed_ramp_is_unbounded() {
        let t = Tuning::default();
        assert_eq!(t.speed_at(0), BASE_SPEED);
        assert_eq!(t.speed_at(3600), BASE_SPEED + 1.0);
        assert!(t.speed_at(3600 * 100) > 100.0);
    }
}
