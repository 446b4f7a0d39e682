//! Live enemy roster owned by the current level.

use std::{collections::BTreeMap, time::Duration};

use dimension_shooter_core::{
    Archetype, EnemySnapshot, EntityId, ENEMY_ATTACK_COOLDOWN, MAX_ACTIVE_ENEMIES,
};
use glam::Vec3;

/// State of a single live enemy stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct EnemyState {
    /// Identifier allocated by the world for the enemy.
    pub(crate) id: EntityId,
    /// Template the enemy was built from.
    pub(crate) archetype: Archetype,
    /// World-space position of the enemy.
    pub(crate) position: Vec3,
    /// Direction the enemy faces.
    pub(crate) facing: Vec3,
    /// Remaining health.
    pub(crate) health: u32,
    /// Walking speed including the dimension multiplier.
    pub(crate) speed: f32,
    /// Clock reading of the most recent strike.
    pub(crate) last_attack: Option<Duration>,
}

impl EnemyState {
    pub(crate) fn spawn(id: EntityId, archetype: Archetype, position: Vec3, multiplier: f32) -> Self {
        Self {
            id,
            archetype,
            position,
            facing: Vec3::Z,
            health: archetype.base_health(),
            speed: archetype.base_speed() * multiplier,
            last_attack: None,
        }
    }

    /// Reports whether the strike cooldown elapsed at the provided clock reading.
    pub(crate) fn attack_ready(&self, now: Duration) -> bool {
        self.last_attack
            .map_or(true, |last| now.saturating_sub(last) > ENEMY_ATTACK_COOLDOWN)
    }

    pub(crate) fn snapshot(&self, now: Duration) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            archetype: self.archetype,
            position: self.position,
            facing: self.facing,
            health: self.health,
            speed: self.speed,
            attack_ready: self.attack_ready(now),
        }
    }
}

/// Registry that stores live enemies ordered by identifier.
#[derive(Debug, Default)]
pub(crate) struct Roster {
    entries: BTreeMap<EntityId, EnemyState>,
}

impl Roster {
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.entries.len() >= MAX_ACTIVE_ENEMIES
    }

    pub(crate) fn vacancies(&self) -> usize {
        MAX_ACTIVE_ENEMIES.saturating_sub(self.entries.len())
    }

    pub(crate) fn insert(&mut self, enemy: EnemyState) {
        let _ = self.entries.insert(enemy.id, enemy);
    }

    pub(crate) fn remove(&mut self, id: EntityId) -> Option<EnemyState> {
        self.entries.remove(&id)
    }

    pub(crate) fn get(&self, id: EntityId) -> Option<&EnemyState> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Option<&mut EnemyState> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &EnemyState> {
        self.entries.values()
    }

    /// Removes every enemy, returning their identifiers in ascending order.
    pub(crate) fn drain_ids(&mut self) -> Vec<EntityId> {
        let ids = self.entries.keys().copied().collect();
        self.entries.clear();
        ids
    }
}
