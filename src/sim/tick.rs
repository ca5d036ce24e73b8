//! Frame-stepped simulation tick
//!
//! One call per rendered frame while playing. Gravity, scroll and scoring are
//! per tick with no dt scaling; only the shield reads the wall clock.

use glam::Vec2;
use rand::Rng;

use super::state::{Actor, GameEvent, GamePhase, GameState, Particle};
use crate::tuning::Tuning;

/// Commands observed since the previous tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Begin (or restart) a run
    pub start: bool,
    /// Jump, if grounded
    pub jump: bool,
}

/// Advance the game by one frame
///
/// Commands are applied first. Outside `Playing` nothing else happens. The
/// step order below is part of the game's observable behaviour; a collision
/// ends the run but the rest of the tick still runs.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.start {
        state.start();
    }
    if input.jump {
        events.extend(state.jump());
    }

    if state.phase != GamePhase::Playing {
        return events;
    }

    state.frame += 1;

    integrate_actor(&mut state.actor, &state.tuning);
    expire_shield(&mut state.actor, now_ms);

    if let Some(obstacle) = state.spawner.try_spawn_obstacle(&state.tuning, &mut state.rng) {
        state.obstacles.push(obstacle);
    }
    if let Some(power_up) = state.spawner.try_spawn_power_up(&state.tuning, &mut state.rng) {
        state.power_ups.push(power_up);
    }

    events.extend(update_obstacles(state));
    events.extend(update_power_ups(state, now_ms));
    update_particles(&mut state.particles);

    let points = state.score_multiplier();
    state.score.add(points, state.tuning.score_divisor);

    state.speed = state.tuning.speed_at(state.frame);

    events
}

/// Semi-implicit Euler step plus ground clamp
fn integrate_actor(actor: &mut Actor, tuning: &Tuning) {
    actor.vel_y += tuning.gravity;
    actor.pos.y += actor.vel_y;

    let ground = tuning.actor_ground_y();
    if actor.pos.y >= ground {
        actor.pos.y = ground;
        actor.vel_y = 0.0;
        actor.airborne = false;
    }
}

fn expire_shield(actor: &mut Actor, now_ms: f64) {
    if actor.shield_active && now_ms > actor.shield_expires_ms {
        actor.shield_active = false;
        log::debug!("Shield expired");
    }
}

/// Scroll, hit-test and filter obstacles. A hit keeps the obstacle.
fn update_obstacles(state: &mut GameState) -> Option<GameEvent> {
    let speed = state.speed;
    let actor = state.actor.rect();
    let shielded = state.actor.shield_active;

    let mut hit = false;
    state.obstacles.retain_mut(|obstacle| {
        obstacle.pos.x -= speed;
        if !shielded && obstacle.rect().overlaps(&actor) {
            hit = true;
        }
        obstacle.on_screen()
    });

    if hit { state.end_run() } else { None }
}

/// Scroll, collect and filter power-ups. Collection ignores phase and shield.
fn update_power_ups(state: &mut GameState, now_ms: f64) -> Vec<GameEvent> {
    let speed = state.speed;
    let actor = state.actor.rect();

    let mut collected: Vec<Vec2> = Vec::new();
    state.power_ups.retain_mut(|power_up| {
        power_up.pos.x -= speed;
        if power_up.rect().overlaps(&actor) {
            power_up.collected = true;
            collected.push(power_up.center());
            return false;
        }
        power_up.on_screen()
    });

    collected
        .into_iter()
        .map(|pos| {
            state.actor.activate_shield(now_ms, state.tuning.shield_duration_ms);
            spawn_burst(state, pos);
            log::debug!("Shield hat collected at ({:.0}, {:.0})", pos.x, pos.y);
            GameEvent::PowerUpCollected { pos }
        })
        .collect()
}

/// Collection sparkle at `pos`
fn spawn_burst(state: &mut GameState, pos: Vec2) {
    let speed = state.tuning.particle_speed;
    let life = state.tuning.particle_life;
    for _ in 0..state.tuning.particle_burst {
        let vel = Vec2::new(
            state.rng.random_range(-speed..speed),
            state.rng.random_range(-speed..speed),
        );
        state.particles.push(Particle {
            pos,
            vel,
            life,
            max_life: life,
        });
    }
}

fn update_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}
