#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Dimension Shooter adapters.
//!
//! The simulation never talks to a scene graph directly. Adapters implement
//! [`RenderableFactory`], [`EventSink`] and [`CurrencyLedger`], and a
//! [`Presenter`] replays world events against them, keeping the mapping from
//! world entity identifiers to adapter handles.

use std::{collections::HashMap, fmt::Debug};

use dimension_shooter_core::{Aabb, Archetype, Dimension, EntityId, Event, ObstacleKind};
use glam::Vec3;
use tracing::debug;

/// Non-blocking props an adapter may be asked to create.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropKind {
    /// Health pickup dropped by a defeated enemy.
    HealthPickup,
    /// Upgrade kiosk placed by the layout realizer.
    Kiosk,
}

/// Scene-graph side of the simulation.
pub trait RenderableFactory {
    /// Opaque reference to a renderable owned by the adapter.
    type Handle: Copy + Eq + Debug;

    /// Creates a renderable obstacle centred at `position` with the full `size`.
    fn create_obstacle(&mut self, kind: ObstacleKind, position: Vec3, size: Vec3) -> Self::Handle;

    /// Creates a renderable enemy.
    fn create_enemy(&mut self, archetype: Archetype, position: Vec3) -> Self::Handle;

    /// Creates a non-blocking prop such as a pickup or kiosk.
    fn create_prop(&mut self, kind: PropKind, position: Vec3) -> Self::Handle;

    /// Destroys a renderable.
    fn remove(&mut self, handle: Self::Handle);

    /// Current position of a renderable, if it still exists.
    fn position(&self, handle: Self::Handle) -> Option<Vec3>;

    /// Current bounds of a renderable, if it still exists.
    fn bounds(&self, handle: Self::Handle) -> Option<Aabb>;

    /// Moves a renderable to a new position.
    fn move_to(&mut self, handle: Self::Handle, position: Vec3);

    /// Re-skins the scene for the active dimension.
    fn apply_dimension(&mut self, dimension: Dimension);
}

/// Receives gameplay notifications meant for the HUD.
pub trait EventSink {
    /// Called once when a level quota is met.
    fn on_level_complete(&mut self, level: u32);

    /// Called after every defeat with the session-wide total.
    fn on_enemy_defeated(&mut self, total: u32);

    /// Called for every human-readable message.
    fn on_message(&mut self, text: &str);
}

/// Write-only currency account.
pub trait CurrencyLedger {
    /// Credits the provided amount.
    fn reward(&mut self, amount: u32);
}

/// Replays world events against adapter collaborators.
#[derive(Debug)]
pub struct Presenter<F: RenderableFactory> {
    factory: F,
    handles: HashMap<EntityId, F::Handle>,
}

impl<F: RenderableFactory> Presenter<F> {
    /// Creates a presenter that owns the provided factory.
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            handles: HashMap::new(),
        }
    }

    /// Read access to the wrapped factory.
    #[must_use]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Number of live renderables tracked by the presenter.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Reports whether no renderable is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Handle the adapter assigned to a world entity.
    #[must_use]
    pub fn handle(&self, entity: EntityId) -> Option<F::Handle> {
        self.handles.get(&entity).copied()
    }

    /// Rendered position of a world entity.
    #[must_use]
    pub fn locate(&self, entity: EntityId) -> Option<Vec3> {
        self.handle(entity)
            .and_then(|handle| self.factory.position(handle))
    }

    /// Rendered bounds of a world entity.
    #[must_use]
    pub fn bounds(&self, entity: EntityId) -> Option<Aabb> {
        self.handle(entity).and_then(|handle| self.factory.bounds(handle))
    }

    /// Forwards every event to the matching collaborator.
    pub fn present<S, L>(&mut self, events: &[Event], sink: &mut S, ledger: &mut L)
    where
        S: EventSink + ?Sized,
        L: CurrencyLedger + ?Sized,
    {
        for event in events {
            match event {
                Event::LevelTornDown { removed, .. } => {
                    for entity in removed {
                        self.release(*entity);
                    }
                }
                Event::ObstaclePlaced {
                    obstacle,
                    kind,
                    bounds,
                } => {
                    let handle = self
                        .factory
                        .create_obstacle(*kind, bounds.center(), bounds.size());
                    self.track(*obstacle, handle);
                }
                Event::KioskPlaced { kiosk, position } => {
                    let handle = self.factory.create_prop(PropKind::Kiosk, *position);
                    self.track(*kiosk, handle);
                }
                Event::HealthPickupDropped { pickup, position } => {
                    let handle = self.factory.create_prop(PropKind::HealthPickup, *position);
                    self.track(*pickup, handle);
                }
                Event::PickupCollected { pickup, .. } => self.release(*pickup),
                Event::EnemySpawned {
                    enemy,
                    archetype,
                    position,
                } => {
                    let handle = self.factory.create_enemy(*archetype, *position);
                    self.track(*enemy, handle);
                }
                Event::EnemyMoved { enemy, to, .. } => match self.handles.get(enemy) {
                    Some(handle) => self.factory.move_to(*handle, *to),
                    None => debug!(enemy = enemy.get(), "move for untracked enemy"),
                },
                Event::EnemyDefeated {
                    enemy,
                    total_defeated,
                    ..
                } => {
                    self.release(*enemy);
                    sink.on_enemy_defeated(*total_defeated);
                }
                Event::CurrencyRewarded { amount } => ledger.reward(*amount),
                Event::LevelCompleted { level } => sink.on_level_complete(*level),
                Event::Message { text } => sink.on_message(text),
                Event::DimensionShifted { dimension } => self.factory.apply_dimension(*dimension),
                _ => {}
            }
        }
    }

    fn track(&mut self, entity: EntityId, handle: F::Handle) {
        if let Some(previous) = self.handles.insert(entity, handle) {
            debug!(entity = entity.get(), "entity re-registered; dropping old renderable");
            self.factory.remove(previous);
        }
    }

    fn release(&mut self, entity: EntityId) {
        match self.handles.remove(&entity) {
            Some(handle) => self.factory.remove(handle),
            None => debug!(entity = entity.get(), "release of untracked entity"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimension_shooter_core::{Command, LEVEL_SIZE};
    use dimension_shooter_world::{apply, World};

    #[derive(Debug, Default)]
    struct Recorder {
        next: u32,
        live: HashMap<u32, (Vec3, Vec3)>,
        removed: Vec<u32>,
        dimension: Dimension,
    }

    impl Recorder {
        fn create(&mut self, position: Vec3, size: Vec3) -> u32 {
            self.next += 1;
            let _ = self.live.insert(self.next, (position, size));
            self.next
        }
    }

    impl RenderableFactory for Recorder {
        type Handle = u32;

        fn create_obstacle(&mut self, _: ObstacleKind, position: Vec3, size: Vec3) -> u32 {
            self.create(position, size)
        }

        fn create_enemy(&mut self, _: Archetype, position: Vec3) -> u32 {
            self.create(position, Vec3::splat(2.0))
        }

        fn create_prop(&mut self, _: PropKind, position: Vec3) -> u32 {
            self.create(position, Vec3::ONE)
        }

        fn remove(&mut self, handle: u32) {
            let _ = self.live.remove(&handle);
            self.removed.push(handle);
        }

        fn position(&self, handle: u32) -> Option<Vec3> {
            self.live.get(&handle).map(|(position, _)| *position)
        }

        fn bounds(&self, handle: u32) -> Option<Aabb> {
            self.live
                .get(&handle)
                .map(|(position, size)| Aabb::from_center_size(*position, *size))
        }

        fn move_to(&mut self, handle: u32, position: Vec3) {
            if let Some(entry) = self.live.get_mut(&handle) {
                entry.0 = position;
            }
        }

        fn apply_dimension(&mut self, dimension: Dimension) {
            self.dimension = dimension;
        }
    }

    #[derive(Debug, Default)]
    struct Hud {
        completed: Vec<u32>,
        defeated: Vec<u32>,
        messages: Vec<String>,
    }

    impl EventSink for Hud {
        fn on_level_complete(&mut self, level: u32) {
            self.completed.push(level);
        }

        fn on_enemy_defeated(&mut self, total: u32) {
            self.defeated.push(total);
        }

        fn on_message(&mut self, text: &str) {
            self.messages.push(text.to_owned());
        }
    }

    fn run(world: &mut World, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, command, &mut events);
        events
    }

    #[test]
    fn presenter_mirrors_world_entities() {
        let mut world = World::with_seed(4);
        let mut presenter = Presenter::new(Recorder::default());
        let mut hud = Hud::default();
        let mut wallet = Wallet::default();

        let events = run(&mut world, Command::StartLevel { level: 1 });
        presenter.present(&events, &mut hud, &mut wallet);
        assert_eq!(hud.messages, vec!["Level 1 - Defeat 10 Guardians".to_owned()]);

        let bounds = Aabb::from_center_size(Vec3::new(0.0, -0.1, 0.0), Vec3::new(LEVEL_SIZE, 0.0, LEVEL_SIZE));
        let placed = run(
            &mut world,
            Command::PlaceObstacle {
                kind: ObstacleKind::Floor,
                bounds,
            },
        );
        let floor = match placed.first() {
            Some(Event::ObstaclePlaced { obstacle, .. }) => *obstacle,
            other => panic!("unexpected event {other:?}"),
        };
        presenter.present(&placed, &mut hud, &mut wallet);
        assert_eq!(presenter.bounds(floor), Some(bounds));

        let spawned = run(
            &mut world,
            Command::SpawnEnemy {
                archetype: Archetype::Shifter,
                position: Vec3::new(5.0, 1.0, 5.0),
            },
        );
        presenter.present(&spawned, &mut hud, &mut wallet);
        let enemy = match spawned.first() {
            Some(Event::EnemySpawned { enemy, .. }) => *enemy,
            other => panic!("unexpected event {other:?}"),
        };
        assert_eq!(presenter.locate(enemy), Some(Vec3::new(5.0, 1.0, 5.0)));

        let moved = run(
            &mut world,
            Command::MoveEnemy {
                enemy,
                position: Vec3::new(4.0, 1.0, 5.0),
                facing: Vec3::NEG_X,
            },
        );
        presenter.present(&moved, &mut hud, &mut wallet);
        assert_eq!(presenter.locate(enemy), Some(Vec3::new(4.0, 1.0, 5.0)));

        let defeated = run(&mut world, Command::DefeatEnemy { enemy });
        presenter.present(&defeated, &mut hud, &mut wallet);
        assert_eq!(presenter.locate(enemy), None);
        assert_eq!(hud.defeated, vec![1]);
        assert_eq!(wallet.0, 5);
        assert_eq!(presenter.len(), 2, "floor plus the dropped pickup");
    }

    #[test]
    fn teardown_removes_every_renderable() {
        let mut world = World::with_seed(8);
        let mut presenter = Presenter::new(Recorder::default());
        let mut hud = Hud::default();
        let mut wallet = Wallet::default();

        let mut events = run(&mut world, Command::StartLevel { level: 2 });
        events.extend(run(
            &mut world,
            Command::PlaceKiosk {
                position: Vec3::new(12.0, 0.0, 12.0),
            },
        ));
        events.extend(run(
            &mut world,
            Command::SpawnEnemy {
                archetype: Archetype::Sonar,
                position: Vec3::new(-12.0, 1.0, 12.0),
            },
        ));
        presenter.present(&events, &mut hud, &mut wallet);
        assert_eq!(presenter.len(), 2);

        let restarted = run(&mut world, Command::StartLevel { level: 3 });
        presenter.present(&restarted, &mut hud, &mut wallet);

        assert!(presenter.is_empty());
        assert!(presenter.factory().live.is_empty());
        assert_eq!(presenter.factory().removed.len(), 2);
    }

    #[test]
    fn dimension_shifts_reskin_the_scene() {
        let mut presenter = Presenter::new(Recorder::default());
        let mut hud = Hud::default();
        let mut wallet = Wallet::default();
        presenter.present(
            &[Event::DimensionShifted {
                dimension: Dimension::Nexus,
            }],
            &mut hud,
            &mut wallet,
        );
        assert_eq!(presenter.factory().dimension, Dimension::Nexus);
    }

    #[test]
    fn level_rewards_reach_sink_and_ledger() {
        let mut presenter = Presenter::new(Recorder::default());
        let mut hud = Hud::default();
        let mut wallet = Wallet::default();
        presenter.present(
            &[
                Event::LevelCompleted { level: 3 },
                Event::CurrencyRewarded { amount: 50 },
            ],
            &mut hud,
            &mut wallet,
        );
        assert_eq!(hud.completed, vec![3]);
        assert_eq!(wallet.0, 50);
    }

    #[derive(Debug, Default)]
    struct Wallet(u32);

    impl CurrencyLedger for Wallet {
        fn reward(&mut self, amount: u32) {
            self.0 += amount;
        }
    }
}
