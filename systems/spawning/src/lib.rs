#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded spawning system responsible for emitting enemy spawn commands.
//!
//! The system fills the roster when a level starts and answers every
//! replenishment the world schedules after an enemy death. Candidate
//! positions are drawn on the integer lattice of the playfield and rejected
//! when they land too close to the player, inside an obstacle or on top of
//! another enemy.

use dimension_shooter_core::{
    Aabb, Archetype, Command, EnemyView, Event, DEFAULT_SPAWN_DISTANCE, ENEMY_RADIUS,
    ENEMY_SEPARATION, ENEMY_SPAWN_HEIGHT, LEVEL_SIZE, MAX_ACTIVE_ENEMIES,
    SPAWN_PLACEMENT_ATTEMPTS,
};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::warn;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_distance: f32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided player clearance and seed.
    #[must_use]
    pub const fn new(spawn_distance: f32, rng_seed: u64) -> Self {
        Self {
            spawn_distance,
            rng_seed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_SPAWN_DISTANCE, 0)
    }
}

/// Pure system that emits spawn commands for level starts and replenishments.
#[derive(Debug)]
pub struct Spawning {
    spawn_distance: f32,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_distance: config.spawn_distance,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and immutable views to emit spawn commands.
    ///
    /// `obstacles` should mirror the world's `query::solid_obstacles` helper
    /// and `enemies` its `query::enemy_view`.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: Vec3,
        obstacles: &[Aabb],
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        let mut requested: usize = 0;
        for event in events {
            match event {
                Event::LevelStarted { quota, .. } => {
                    requested = MAX_ACTIVE_ENEMIES.min(*quota as usize);
                }
                Event::ReplenishmentDue { count, .. } => {
                    requested = requested.saturating_add(*count as usize);
                }
                _ => {}
            }
        }
        if requested == 0 {
            return;
        }

        let count = requested.min(MAX_ACTIVE_ENEMIES.saturating_sub(enemies.len()));
        let mut occupied: Vec<Vec3> = enemies.iter().map(|enemy| enemy.position).collect();
        for slot in 0..count {
            let archetype = self.roll_archetype();
            let Some(position) = place(
                &mut self.rng,
                player,
                self.spawn_distance,
                obstacles,
                &occupied,
            ) else {
                warn!(
                    slot,
                    attempts = SPAWN_PLACEMENT_ATTEMPTS,
                    "no valid spawn position; skipping slot"
                );
                continue;
            };
            occupied.push(position);
            out.push(Command::SpawnEnemy {
                archetype,
                position,
            });
        }
    }

    fn roll_archetype(&mut self) -> Archetype {
        Archetype::ALL[self.rng.gen_range(0..Archetype::ALL.len())]
    }
}

/// Draws a spawn position, trying up to [`SPAWN_PLACEMENT_ATTEMPTS`] candidates.
///
/// Candidates are uniform integer `x` and `z` inside the playfield at the
/// enemy spawn height. A candidate is rejected when it lies closer than
/// `spawn_distance` to the player, inside any obstacle grown by the enemy
/// radius, or within the separation distance of an occupied position.
pub fn place<R: Rng + ?Sized>(
    rng: &mut R,
    player: Vec3,
    spawn_distance: f32,
    obstacles: &[Aabb],
    occupied: &[Vec3],
) -> Option<Vec3> {
    let half = (LEVEL_SIZE / 2.0) as i32;
    (0..SPAWN_PLACEMENT_ATTEMPTS).find_map(|_| {
        let x = rng.gen_range(-half..=half) as f32;
        let z = rng.gen_range(-half..=half) as f32;
        let candidate = Vec3::new(x, ENEMY_SPAWN_HEIGHT, z);
        is_clear(candidate, player, spawn_distance, obstacles, occupied).then_some(candidate)
    })
}

fn is_clear(
    candidate: Vec3,
    player: Vec3,
    spawn_distance: f32,
    obstacles: &[Aabb],
    occupied: &[Vec3],
) -> bool {
    if candidate.distance(player) < spawn_distance {
        return false;
    }
    if obstacles
        .iter()
        .any(|bounds| bounds.expanded(ENEMY_RADIUS).contains_point(candidate))
    {
        return false;
    }
    occupied
        .iter()
        .all(|other| other.distance(candidate) >= ENEMY_SEPARATION)
}
