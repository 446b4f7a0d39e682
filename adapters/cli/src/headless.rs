//! In-memory collaborators that stand in for a scene graph and HUD.

use std::collections::HashMap;

use dimension_shooter_core::{Aabb, Archetype, Dimension, ObstacleKind, ENEMY_RADIUS};
use dimension_shooter_rendering::{CurrencyLedger, EventSink, PropKind, RenderableFactory};
use glam::Vec3;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug)]
struct Renderable {
    position: Vec3,
    size: Vec3,
}

/// Scene that only remembers where renderables are.
#[derive(Debug, Default)]
pub(crate) struct HeadlessScene {
    next_handle: u64,
    renderables: HashMap<u64, Renderable>,
    dimension: Dimension,
}

impl HeadlessScene {
    /// Number of renderables alive in the scene.
    pub(crate) fn len(&self) -> usize {
        self.renderables.len()
    }

    /// Dimension the scene is currently skinned for.
    pub(crate) fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn insert(&mut self, position: Vec3, size: Vec3) -> u64 {
        self.next_handle += 1;
        let _ = self
            .renderables
            .insert(self.next_handle, Renderable { position, size });
        self.next_handle
    }
}

impl RenderableFactory for HeadlessScene {
    type Handle = u64;

    fn create_obstacle(&mut self, kind: ObstacleKind, position: Vec3, size: Vec3) -> u64 {
        let handle = self.insert(position, size);
        debug!(handle, ?kind, "obstacle created");
        handle
    }

    fn create_enemy(&mut self, archetype: Archetype, position: Vec3) -> u64 {
        let handle = self.insert(position, Vec3::splat(ENEMY_RADIUS * 2.0));
        debug!(handle, archetype = archetype.name(), "enemy created");
        handle
    }

    fn create_prop(&mut self, kind: PropKind, position: Vec3) -> u64 {
        let handle = self.insert(position, Vec3::ONE);
        debug!(handle, ?kind, "prop created");
        handle
    }

    fn remove(&mut self, handle: u64) {
        let _ = self.renderables.remove(&handle);
    }

    fn position(&self, handle: u64) -> Option<Vec3> {
        self.renderables.get(&handle).map(|entry| entry.position)
    }

    fn bounds(&self, handle: u64) -> Option<Aabb> {
        self.renderables
            .get(&handle)
            .map(|entry| Aabb::from_center_size(entry.position, entry.size))
    }

    fn move_to(&mut self, handle: u64, position: Vec3) {
        if let Some(entry) = self.renderables.get_mut(&handle) {
            entry.position = position;
        }
    }

    fn apply_dimension(&mut self, dimension: Dimension) {
        self.dimension = dimension;
    }
}

/// HUD that logs notifications and keeps the latest counters.
#[derive(Debug, Default)]
pub(crate) struct LogHud {
    pub(crate) levels_cleared: u32,
    pub(crate) enemies_defeated: u32,
}

impl EventSink for LogHud {
    fn on_level_complete(&mut self, level: u32) {
        self.levels_cleared = self.levels_cleared.max(level);
        info!(level, "level complete");
    }

    fn on_enemy_defeated(&mut self, total: u32) {
        self.enemies_defeated = total;
    }

    fn on_message(&mut self, text: &str) {
        info!("{text}");
    }
}

/// Running total of credited currency.
#[derive(Debug, Default)]
pub(crate) struct Wallet {
    pub(crate) balance: u64,
}

impl CurrencyLedger for Wallet {
    fn reward(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(u64::from(amount));
    }
}
