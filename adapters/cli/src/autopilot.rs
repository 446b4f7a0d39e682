//! Scripted player that keeps a headless session moving.

use std::time::Duration;

use dimension_shooter_core::Command;
use dimension_shooter_world::{query, LevelPhase, World};
use glam::Vec3;

use crate::config::AutopilotConfig;

/// Hitscan shooter that targets the nearest enemy and heals when hurt.
#[derive(Debug)]
pub(crate) struct Autopilot {
    config: AutopilotConfig,
    reload: Duration,
    heading: Vec3,
}

impl Autopilot {
    pub(crate) fn new(config: AutopilotConfig) -> Self {
        Self {
            config,
            reload: Duration::ZERO,
            heading: Vec3::ZERO,
        }
    }

    /// Emits the player's commands for the upcoming tick.
    pub(crate) fn plan(&mut self, world: &World, dt: Duration, out: &mut Vec<Command>) {
        let player = query::player(world);
        let active = query::session(world).phase == LevelPhase::Active && player.health > 0;

        let heading = if active && player.health < self.config.seek_pickups_below {
            query::pickups(world)
                .iter()
                .map(|pickup| pickup.position - player.position)
                .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
                .map(|offset| Vec3::new(offset.x, 0.0, offset.z))
                .unwrap_or(Vec3::ZERO)
        } else {
            Vec3::ZERO
        };
        let stopped = heading != Vec3::ZERO && player.velocity == Vec3::ZERO;
        if heading != self.heading || stopped {
            self.heading = heading;
            out.push(Command::SetPlayerIntent {
                heading,
                sprint: true,
            });
        }

        if !active {
            return;
        }

        if self.config.shift_dimensions && query::dimension_shift_ready(world) {
            out.push(Command::ShiftDimension);
        }

        self.reload = self.reload.saturating_sub(dt);
        if !self.reload.is_zero() {
            return;
        }
        let target = query::enemy_view(world)
            .iter()
            .min_by(|a, b| {
                a.position
                    .distance_squared(player.position)
                    .total_cmp(&b.position.distance_squared(player.position))
            })
            .map(|enemy| enemy.id);
        if let Some(enemy) = target {
            out.push(Command::DamageEnemy {
                enemy,
                amount: self.config.damage,
            });
            self.reload = Duration::from_millis(self.config.fire_interval_ms);
        }
    }
}
