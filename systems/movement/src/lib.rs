#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement resolver that corrects the player and steps enemies every tick.
//!
//! The player is integrated from its intent velocity and then pushed out of
//! any solid obstacle along the axis of least penetration, followed by a
//! radius push away from nearby enemies. Enemies take speculative steps
//! toward the player and keep their previous position whenever the step
//! would land inside an obstacle or on top of another enemy.

use std::time::Duration;

use dimension_shooter_core::{
    Aabb, Command, EnemySnapshot, EnemyView, Event, PickupSnapshot, PlayerSnapshot,
    ENEMY_ATTACK_RANGE, ENEMY_RADIUS, ENEMY_SEPARATION, ENEMY_UPDATE_RADIUS, PICKUP_RADIUS,
    PLAYER_HEIGHT, PLAYER_RADIUS,
};
use glam::Vec3;
use tracing::trace;

/// What an enemy does during a tick given its distance to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyBehavior {
    /// Too far away to react at all.
    OutOfRange,
    /// Walking toward the player.
    Approaching,
    /// Close enough to strike.
    Attacking {
        /// Whether the strike cooldown has elapsed.
        ready: bool,
    },
}

/// Classifies an enemy's behaviour for the current tick.
#[must_use]
pub fn classify(enemy: Vec3, player: Vec3, attack_ready: bool) -> EnemyBehavior {
    let distance = enemy.distance(player);
    if distance >= ENEMY_UPDATE_RADIUS {
        EnemyBehavior::OutOfRange
    } else if distance > ENEMY_ATTACK_RANGE {
        EnemyBehavior::Approaching
    } else {
        EnemyBehavior::Attacking {
            ready: attack_ready,
        }
    }
}

/// Resolves a proposed player position against obstacles and enemies.
///
/// Each obstacle that contains the position pushes it out along the single
/// axis with the smallest face distance, using the position already corrected
/// by earlier obstacles. Ties fall through to `z`, and a downward push that
/// would sink the player below eye height is never chosen. Enemies then push
/// the player horizontally until the two bodies no longer overlap. The eye
/// height is clamped to the floor before and after both passes.
#[must_use]
pub fn resolve_player(position: Vec3, obstacles: &[Aabb], enemies: &[Vec3]) -> Vec3 {
    let mut resolved = position;
    resolved.y = resolved.y.max(PLAYER_HEIGHT);

    for bounds in obstacles {
        if bounds.contains_point(resolved) {
            resolved = push_out(resolved, bounds);
        }
    }

    let reach = PLAYER_RADIUS + ENEMY_RADIUS;
    for enemy in enemies {
        let delta = Vec3::new(resolved.x - enemy.x, 0.0, resolved.z - enemy.z);
        if delta.length() < reach {
            let direction = if delta.length_squared() > f32::EPSILON {
                delta.normalize()
            } else {
                Vec3::X
            };
            let pushed = *enemy + direction * reach;
            resolved.x = pushed.x;
            resolved.z = pushed.z;
        }
    }

    resolved.y = resolved.y.max(PLAYER_HEIGHT);
    resolved
}

fn push_out(position: Vec3, bounds: &Aabb) -> Vec3 {
    let center = bounds.center();
    let half = bounds.half_extents();
    let face = |value: f32, center: f32, half: f32| -> f32 {
        (value - (center + half)).abs().min((value - (center - half)).abs())
    };
    let push_y = center.y + (half.y + PLAYER_RADIUS) * (position.y - center.y).signum();
    let dx = face(position.x, center.x, half.x);
    let dy = if push_y < PLAYER_HEIGHT {
        f32::INFINITY
    } else {
        face(position.y, center.y, half.y)
    };
    let dz = face(position.z, center.z, half.z);

    let mut pushed = position;
    if dx < dy && dx < dz {
        pushed.x = center.x + (half.x + PLAYER_RADIUS) * (position.x - center.x).signum();
    } else if dy < dx && dy < dz {
        pushed.y = push_y;
    } else {
        pushed.z = center.z + (half.z + PLAYER_RADIUS) * (position.z - center.z).signum();
    }
    pushed
}

/// Accepts or rejects a speculative enemy step.
///
/// Returns `candidate` when it is clear of every obstacle grown by the enemy
/// radius and keeps the separation distance to every other enemy, otherwise
/// returns `current`.
#[must_use]
pub fn resolve_enemy_step(current: Vec3, candidate: Vec3, obstacles: &[Aabb], others: &[Vec3]) -> Vec3 {
    let blocked = obstacles
        .iter()
        .any(|bounds| bounds.expanded(ENEMY_RADIUS).contains_point(candidate));
    let crowded = others
        .iter()
        .any(|other| other.distance(candidate) < ENEMY_SEPARATION);
    if blocked || crowded {
        current
    } else {
        candidate
    }
}

/// Pure system that reacts to elapsed time and emits movement commands.
#[derive(Debug, Default)]
pub struct Movement {
    scratch: Vec<Vec3>,
}

impl Movement {
    /// Consumes world events and immutable views to emit movement commands.
    ///
    /// `obstacles` should mirror the world's `query::solid_obstacles` helper.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: &PlayerSnapshot,
        enemies: &EnemyView,
        obstacles: &[Aabb],
        pickups: &[PickupSnapshot],
        out: &mut Vec<Command>,
    ) {
        let elapsed = events
            .iter()
            .filter_map(|event| match event {
                Event::TimeAdvanced { dt } => Some(*dt),
                _ => None,
            })
            .fold(Duration::ZERO, Duration::saturating_add);
        if elapsed.is_zero() {
            return;
        }
        let dt = elapsed.as_secs_f32();

        self.scratch.clear();
        self.scratch.extend(enemies.iter().map(|enemy| enemy.position));

        let candidate = player.position + player.velocity * dt;
        let player_position = resolve_player(candidate, obstacles, &self.scratch);
        if player_position != player.position {
            out.push(Command::MovePlayer {
                position: player_position,
            });
        }

        for (index, enemy) in enemies.iter().enumerate() {
            self.step_enemy(index, enemy, player_position, obstacles, dt, out);
        }

        if let Some(pickup) = pickups
            .iter()
            .find(|pickup| pickup.position.distance(player_position) < PICKUP_RADIUS)
        {
            out.push(Command::CollectPickup { pickup: pickup.id });
        }
    }

    fn step_enemy(
        &mut self,
        index: usize,
        enemy: &EnemySnapshot,
        player: Vec3,
        obstacles: &[Aabb],
        dt: f32,
        out: &mut Vec<Command>,
    ) {
        let current = self.scratch[index];
        let behavior = classify(current, player, enemy.attack_ready);
        if behavior == EnemyBehavior::OutOfRange {
            return;
        }

        let heading = Vec3::new(player.x - current.x, 0.0, player.z - current.z);
        let facing = heading.try_normalize().unwrap_or(enemy.facing);

        match behavior {
            EnemyBehavior::Approaching => {
                let candidate = current + facing * enemy.speed * dt;
                let others: Vec<Vec3> = self
                    .scratch
                    .iter()
                    .enumerate()
                    .filter(|(other, _)| *other != index)
                    .map(|(_, position)| *position)
                    .collect();
                let position = resolve_enemy_step(current, candidate, obstacles, &others);
                if position == current {
                    trace!(enemy = enemy.id.get(), "enemy step blocked");
                }
                self.scratch[index] = position;
                out.push(Command::MoveEnemy {
                    enemy: enemy.id,
                    position,
                    facing,
                });
            }
            EnemyBehavior::Attacking { ready } => {
                if facing != enemy.facing {
                    out.push(Command::MoveEnemy {
                        enemy: enemy.id,
                        position: current,
                        facing,
                    });
                }
                if ready {
                    out.push(Command::EnemyAttack { enemy: enemy.id });
                }
            }
            EnemyBehavior::OutOfRange => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_uses_radius_thresholds() {
        let player = Vec3::ZERO;
        assert_eq!(
            classify(Vec3::new(40.0, 0.0, 0.0), player, true),
            EnemyBehavior::OutOfRange
        );
        assert_eq!(
            classify(Vec3::new(39.0, 0.0, 0.0), player, true),
            EnemyBehavior::Approaching
        );
        assert_eq!(
            classify(Vec3::new(2.0, 0.0, 0.0), player, false),
            EnemyBehavior::Attacking { ready: false }
        );
    }

    #[test]
    fn face_ties_resolve_along_z() {
        let bounds = Aabb::new(Vec3::new(0.0, 2.0, 0.0), Vec3::splat(2.0));
        let pushed = push_out(Vec3::new(0.0, 2.0, 0.0), &bounds);
        assert_eq!(pushed, Vec3::new(0.0, 2.0, 2.0 + PLAYER_RADIUS));
    }

    #[test]
    fn centred_player_is_pushed_toward_positive_axis() {
        let bounds = Aabb::new(Vec3::new(0.0, 2.5, 0.0), Vec3::new(0.5, 2.5, 3.0));
        let pushed = push_out(Vec3::new(0.0, 1.8, 0.0), &bounds);
        assert_eq!(pushed, Vec3::new(1.0, 1.8, 0.0));
    }

    #[test]
    fn boxes_resting_on_the_floor_push_sideways() {
        let bounds = Aabb::new(Vec3::new(0.0, 2.5, 0.0), Vec3::new(3.0, 2.5, 3.0));
        let pushed = push_out(Vec3::new(0.0, 1.8, 0.0), &bounds);
        assert_eq!(pushed, Vec3::new(0.0, 1.8, 3.0 + PLAYER_RADIUS));
    }

    #[test]
    fn enemy_push_keeps_eye_height() {
        let resolved = resolve_player(
            Vec3::new(0.5, 1.8, 0.0),
            &[],
            &[Vec3::new(0.0, 1.0, 0.0)],
        );
        assert!((resolved.x - (PLAYER_RADIUS + ENEMY_RADIUS)).abs() < 1e-5);
        assert_eq!(resolved.y, 1.8);
    }
}
