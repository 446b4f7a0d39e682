#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state management for Dimension Shooter.
//!
//! The world owns the level session, the live enemy roster, every fixture
//! realized for the level, the player's movement state and the deferred
//! replenishment queue. It is mutated exclusively through [`apply`] and
//! exposes read-only snapshots through the [`query`] module.

mod roster;
mod scheduler;

use std::{
    collections::{BTreeMap, HashSet},
    time::Duration,
};

use dimension_shooter_core::{
    kill_name, total_enemy_quota, Aabb, AbsorbedPower, Archetype, Command, Dimension, EntityId,
    EntityKind, Event, LevelGeneration, ShiftRejection, SpawnRejection, ADVANCE_HEALTH_FLOOR,
    CURRENCY_PER_ENEMY, CURRENCY_PER_LEVEL, DIMENSION_SHIFT_COOLDOWN, ENEMY_DAMAGE_AMOUNT,
    HEALTH_PICKUP_VALUE, MAX_HEALTH, PLAYER_HEIGHT, PLAYER_SPEED, REPLENISH_DELAY,
    SPRINT_MULTIPLIER,
};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use roster::{EnemyState, Roster};
use scheduler::{Replenishment, Scheduler};
use tracing::{debug, info};

const DEFAULT_WORLD_SEED: u64 = 0x6d1f_03a7_9e2b_c415;
const KIOSK_SIZE: Vec3 = Vec3::new(2.0, 1.4, 2.0);
const PICKUP_SIZE: Vec3 = Vec3::new(0.6, 0.6, 0.6);

/// Spawn point of the player at the start of every level.
pub const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, PLAYER_HEIGHT, 0.0);

/// Lifecycle phase of the level session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelPhase {
    /// No level has been started yet.
    Idle,
    /// The level accepts spawns and counts defeats.
    Active,
    /// The quota was met; the level waits for the next one to start.
    Cleared,
}

/// Represents the authoritative Dimension Shooter world state.
#[derive(Debug)]
pub struct World {
    session: Session,
    roster: Roster,
    fixtures: BTreeMap<EntityId, Fixture>,
    player: Player,
    powers: Vec<AbsorbedPower>,
    scheduler: Scheduler,
    clock: Duration,
    last_shift: Option<Duration>,
    next_entity_id: u32,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a new world seeded with the default seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_WORLD_SEED)
    }

    /// Creates a new world whose random rolls derive from the provided seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            session: Session::new(),
            roster: Roster::default(),
            fixtures: BTreeMap::new(),
            player: Player::new(),
            powers: Vec::new(),
            scheduler: Scheduler::default(),
            clock: Duration::ZERO,
            last_shift: None,
            next_entity_id: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId::new(self.next_entity_id);
        self.next_entity_id = self.next_entity_id.wrapping_add(1);
        id
    }

    fn speed_multiplier(&mut self) -> f32 {
        let (low, high) = self.session.dimension.speed_multiplier_range();
        if high > low {
            self.rng.gen_range(low..=high)
        } else {
            low
        }
    }

    fn start_level(&mut self, level: u32, out_events: &mut Vec<Event>) {
        if level == 0 {
            debug!("ignoring request to start level 0");
            return;
        }

        let previous = self.session.level;
        let advancing = self.session.phase == LevelPhase::Cleared;

        let mut removed: Vec<EntityId> = self.fixtures.keys().copied().collect();
        self.fixtures.clear();
        removed.extend(self.roster.drain_ids());
        removed.sort();
        if previous > 0 || !removed.is_empty() {
            out_events.push(Event::LevelTornDown {
                level: previous,
                removed,
            });
        }

        if advancing && self.player.health < ADVANCE_HEALTH_FLOOR {
            self.player.health = ADVANCE_HEALTH_FLOOR;
        }
        self.player.position = PLAYER_SPAWN;
        self.player.velocity = Vec3::ZERO;
        self.player.sprinting = false;

        self.session.begin(level);
        let quota = self.session.quota;
        info!(
            level,
            quota,
            generation = self.session.generation.get(),
            "level started"
        );
        out_events.push(Event::LevelStarted {
            level,
            generation: self.session.generation,
            quota,
        });
        out_events.push(Event::Message {
            text: format!("Level {level} - Defeat {quota} {}", kill_name(level)),
        });
    }

    fn place_fixture(&mut self, kind: EntityKind, bounds: Aabb) -> Option<EntityId> {
        if self.session.phase == LevelPhase::Idle {
            debug!(?kind, "ignoring fixture placed before any level started");
            return None;
        }
        let id = self.allocate_id();
        let _ = self.fixtures.insert(id, Fixture { kind, bounds });
        Some(id)
    }

    fn spawn_enemy(&mut self, archetype: Archetype, position: Vec3, out_events: &mut Vec<Event>) {
        let rejection = if self.session.phase != LevelPhase::Active {
            Some(SpawnRejection::LevelInactive)
        } else if self.roster.is_full() {
            Some(SpawnRejection::RosterFull)
        } else {
            None
        };
        if let Some(reason) = rejection {
            debug!(?archetype, ?reason, "spawn rejected");
            out_events.push(Event::EnemySpawnRejected { archetype, reason });
            return;
        }

        let multiplier = self.speed_multiplier();
        let id = self.allocate_id();
        self.roster
            .insert(EnemyState::spawn(id, archetype, position, multiplier));
        out_events.push(Event::EnemySpawned {
            enemy: id,
            archetype,
            position,
        });
    }

    fn advance_clock(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.clock = self.clock.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });

        let mut reserved = 0u32;
        for task in self.scheduler.drain_due(self.clock) {
            if task.generation != self.session.generation {
                debug!(
                    scheduled_for = task.generation.get(),
                    live = self.session.generation.get(),
                    "discarding stale replenishment"
                );
                continue;
            }
            if self.session.phase != LevelPhase::Active {
                continue;
            }

            let remaining = self
                .session
                .quota
                .saturating_sub(self.session.defeated)
                .saturating_sub(reserved);
            let vacancies = u32::try_from(self.roster.vacancies())
                .unwrap_or(u32::MAX)
                .saturating_sub(reserved);
            let count = remaining.min(vacancies);
            if count > 0 {
                reserved += count;
                out_events.push(Event::ReplenishmentDue {
                    level: self.session.level,
                    count,
                });
            }
        }
    }

    fn enemy_attack(&mut self, enemy: EntityId, out_events: &mut Vec<Event>) {
        let now = self.clock;
        let Some(state) = self.roster.get_mut(enemy) else {
            debug!(enemy = enemy.get(), "attack from unknown enemy");
            out_events.push(Event::StaleEntity { entity: enemy });
            return;
        };
        if self.player.health == 0 || !state.attack_ready(now) {
            return;
        }

        state.last_attack = Some(now);
        self.player.health = self.player.health.saturating_sub(ENEMY_DAMAGE_AMOUNT);
        out_events.push(Event::PlayerDamaged {
            enemy,
            amount: ENEMY_DAMAGE_AMOUNT,
            health: self.player.health,
        });
        if self.player.health == 0 {
            info!(enemy = enemy.get(), "player defeated");
            out_events.push(Event::PlayerDefeated);
        }
    }

    fn damage_enemy(&mut self, enemy: EntityId, amount: u32, out_events: &mut Vec<Event>) {
        let Some(state) = self.roster.get_mut(enemy) else {
            debug!(enemy = enemy.get(), "damage against unknown enemy");
            out_events.push(Event::StaleEntity { entity: enemy });
            return;
        };
        if amount < state.health {
            state.health -= amount;
            out_events.push(Event::EnemyDamaged {
                enemy,
                amount,
                remaining: state.health,
            });
        } else {
            self.defeat_enemy(enemy, out_events);
        }
    }

    fn defeat_enemy(&mut self, enemy: EntityId, out_events: &mut Vec<Event>) {
        if self.session.defeated_ids.contains(&enemy) {
            debug!(enemy = enemy.get(), "enemy already defeated");
            out_events.push(Event::StaleEntity { entity: enemy });
            return;
        }
        if self.session.phase != LevelPhase::Active {
            debug!(enemy = enemy.get(), "ignoring defeat outside an active level");
            return;
        }
        let Some(state) = self.roster.remove(enemy) else {
            debug!(enemy = enemy.get(), "defeat of unknown enemy");
            out_events.push(Event::StaleEntity { entity: enemy });
            return;
        };
        let _ = self.session.defeated_ids.insert(enemy);

        self.session.defeated = self.session.defeated.saturating_add(1);
        self.session.total_defeated = self.session.total_defeated.saturating_add(1);
        out_events.push(Event::EnemyDefeated {
            enemy,
            archetype: state.archetype,
            position: state.position,
            defeated: self.session.defeated,
            total_defeated: self.session.total_defeated,
        });
        out_events.push(Event::CurrencyRewarded {
            amount: CURRENCY_PER_ENEMY,
        });

        let power = state.archetype.power();
        if self.powers.iter().all(|held| held.kind != power) {
            let absorbed = AbsorbedPower::base(power);
            self.powers.push(absorbed);
            out_events.push(Event::PowerAbsorbed { power: absorbed });
        }

        let pickup = self.allocate_id();
        let _ = self.fixtures.insert(
            pickup,
            Fixture {
                kind: EntityKind::HealthPickup,
                bounds: Aabb::from_center_size(state.position, PICKUP_SIZE),
            },
        );
        out_events.push(Event::HealthPickupDropped {
            pickup,
            position: state.position,
        });

        if self.session.defeated >= self.session.quota {
            self.session.phase = LevelPhase::Cleared;
            info!(level = self.session.level, "level completed");
            out_events.push(Event::LevelCompleted {
                level: self.session.level,
            });
            out_events.push(Event::CurrencyRewarded {
                amount: CURRENCY_PER_LEVEL,
            });
        } else {
            self.scheduler.schedule(Replenishment {
                generation: self.session.generation,
                due_at: self.clock.saturating_add(REPLENISH_DELAY),
            });
        }
    }

    fn collect_pickup(&mut self, pickup: EntityId, out_events: &mut Vec<Event>) {
        let is_pickup = self
            .fixtures
            .get(&pickup)
            .map_or(false, |fixture| fixture.kind == EntityKind::HealthPickup);
        if !is_pickup {
            debug!(pickup = pickup.get(), "collecting unknown pickup");
            out_events.push(Event::StaleEntity { entity: pickup });
            return;
        }

        let _ = self.fixtures.remove(&pickup);
        let before = self.player.health;
        self.player.health = before.saturating_add(HEALTH_PICKUP_VALUE).min(MAX_HEALTH);
        out_events.push(Event::PickupCollected {
            pickup,
            amount: self.player.health - before,
            health: self.player.health,
        });
    }

    fn shift_dimension(&mut self, out_events: &mut Vec<Event>) {
        if let Some(last) = self.last_shift {
            let elapsed = self.clock.saturating_sub(last);
            if elapsed < DIMENSION_SHIFT_COOLDOWN {
                let reason = ShiftRejection::CoolingDown {
                    ready_in: DIMENSION_SHIFT_COOLDOWN - elapsed,
                };
                debug!(?reason, "dimension shift rejected");
                out_events.push(Event::DimensionShiftRejected { reason });
                return;
            }
        }

        self.last_shift = Some(self.clock);
        self.session.dimension = self.session.dimension.next();
        let ids: Vec<EntityId> = self.roster.iter().map(|enemy| enemy.id).collect();
        for id in ids {
            let multiplier = self.speed_multiplier();
            if let Some(enemy) = self.roster.get_mut(id) {
                enemy.speed = enemy.archetype.base_speed() * multiplier;
            }
        }
        info!(dimension = self.session.dimension.name(), "dimension shifted");
        out_events.push(Event::DimensionShifted {
            dimension: self.session.dimension,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartLevel { level } => world.start_level(level, out_events),
        Command::PlaceObstacle { kind, bounds } => {
            if let Some(obstacle) = world.place_fixture(EntityKind::from(kind), bounds) {
                out_events.push(Event::ObstaclePlaced {
                    obstacle,
                    kind,
                    bounds,
                });
            }
        }
        Command::PlaceKiosk { position } => {
            let center = position + Vec3::new(0.0, KIOSK_SIZE.y * 0.5, 0.0);
            let bounds = Aabb::from_center_size(center, KIOSK_SIZE);
            if let Some(kiosk) = world.place_fixture(EntityKind::Kiosk, bounds) {
                out_events.push(Event::KioskPlaced { kiosk, position });
            }
        }
        Command::SpawnEnemy {
            archetype,
            position,
        } => world.spawn_enemy(archetype, position, out_events),
        Command::Tick { dt } => world.advance_clock(dt, out_events),
        Command::SetPlayerIntent { heading, sprint } => {
            let horizontal = Vec3::new(heading.x, 0.0, heading.z).normalize_or_zero();
            let speed = if sprint {
                PLAYER_SPEED * SPRINT_MULTIPLIER
            } else {
                PLAYER_SPEED
            };
            world.player.velocity = horizontal * speed;
            world.player.sprinting = sprint;
        }
        Command::MovePlayer { position } => {
            let from = world.player.position;
            world.player.position = position;
            out_events.push(Event::PlayerMoved { from, to: position });
        }
        Command::MoveEnemy {
            enemy,
            position,
            facing,
        } => {
            if let Some(state) = world.roster.get_mut(enemy) {
                let from = state.position;
                state.position = position;
                state.facing = facing;
                out_events.push(Event::EnemyMoved {
                    enemy,
                    from,
                    to: position,
                });
            } else {
                debug!(enemy = enemy.get(), "move of unknown enemy");
                out_events.push(Event::StaleEntity { entity: enemy });
            }
        }
        Command::EnemyAttack { enemy } => world.enemy_attack(enemy, out_events),
        Command::DamageEnemy { enemy, amount } => world.damage_enemy(enemy, amount, out_events),
        Command::DefeatEnemy { enemy } => world.defeat_enemy(enemy, out_events),
        Command::CollectPickup { pickup } => world.collect_pickup(pickup, out_events),
        Command::ShiftDimension => world.shift_dimension(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use dimension_shooter_core::{
        Aabb, AbsorbedPower, CollisionClass, Dimension, EnemySnapshot, EnemyView, EntityId,
        EntityKind, LevelGeneration, PickupSnapshot, PlayerSnapshot, DIMENSION_SHIFT_COOLDOWN,
    };

    use super::{LevelPhase, World};

    /// Captures the level session counters.
    #[must_use]
    pub fn session(world: &World) -> SessionSnapshot {
        let session = &world.session;
        SessionSnapshot {
            level: session.level,
            quota: session.quota,
            defeated: session.defeated,
            total_defeated: session.total_defeated,
            phase: session.phase,
            generation: session.generation,
            dimension: session.dimension,
            active_enemies: world.roster.len(),
        }
    }

    /// Captures a read-only view of the live enemies in identifier order.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .roster
                .iter()
                .map(|enemy| enemy.snapshot(world.clock))
                .collect(),
        )
    }

    /// Captures a single enemy, if it is still alive.
    #[must_use]
    pub fn enemy(world: &World, id: EntityId) -> Option<EnemySnapshot> {
        world.roster.get(id).map(|enemy| enemy.snapshot(world.clock))
    }

    /// Bounds of every obstacle that blocks movement, in identifier order.
    #[must_use]
    pub fn solid_obstacles(world: &World) -> Vec<Aabb> {
        world
            .fixtures
            .values()
            .filter(|fixture| fixture.kind.collision() == CollisionClass::Solid)
            .map(|fixture| fixture.bounds)
            .collect()
    }

    /// Captures every fixture owned by the level, in identifier order.
    #[must_use]
    pub fn fixtures(world: &World) -> Vec<FixtureSnapshot> {
        world
            .fixtures
            .iter()
            .map(|(id, fixture)| FixtureSnapshot {
                id: *id,
                kind: fixture.kind,
                bounds: fixture.bounds,
            })
            .collect()
    }

    /// Captures the health pickups lying in the level.
    #[must_use]
    pub fn pickups(world: &World) -> Vec<PickupSnapshot> {
        world
            .fixtures
            .iter()
            .filter(|(_, fixture)| fixture.kind == EntityKind::HealthPickup)
            .map(|(id, fixture)| PickupSnapshot {
                id: *id,
                position: fixture.bounds.center(),
            })
            .collect()
    }

    /// Captures the player's movement state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            position: world.player.position,
            velocity: world.player.velocity,
            sprinting: world.player.sprinting,
            health: world.player.health,
        }
    }

    /// Powers absorbed so far, in absorption order.
    #[must_use]
    pub fn absorbed_powers(world: &World) -> &[AbsorbedPower] {
        &world.powers
    }

    /// Currently active dimension.
    #[must_use]
    pub fn dimension(world: &World) -> Dimension {
        world.session.dimension
    }

    /// Total simulated time elapsed.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Reports whether a dimension shift would currently be accepted.
    #[must_use]
    pub fn dimension_shift_ready(world: &World) -> bool {
        world.last_shift.map_or(true, |last| {
            world.clock.saturating_sub(last) >= DIMENSION_SHIFT_COOLDOWN
        })
    }

    /// Number of replenishment tasks waiting in the queue, stale ones included.
    #[must_use]
    pub fn pending_replenishments(world: &World) -> usize {
        world.scheduler.len()
    }

    /// Snapshot of the level session counters.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct SessionSnapshot {
        /// Number of the current level, zero before the first level starts.
        pub level: u32,
        /// Defeats required to clear the level.
        pub quota: u32,
        /// Defeats recorded in the current level.
        pub defeated: u32,
        /// Defeats recorded across the session.
        pub total_defeated: u32,
        /// Lifecycle phase of the level.
        pub phase: LevelPhase,
        /// Generation token of the live level.
        pub generation: LevelGeneration,
        /// Active dimension.
        pub dimension: Dimension,
        /// Number of enemies currently alive.
        pub active_enemies: usize,
    }

    /// Immutable representation of a fixture used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct FixtureSnapshot {
        /// Identifier of the fixture.
        pub id: EntityId,
        /// Kind of the fixture.
        pub kind: EntityKind,
        /// World-space bounds of the fixture.
        pub bounds: Aabb,
    }
}

#[derive(Debug)]
struct Session {
    level: u32,
    quota: u32,
    defeated: u32,
    total_defeated: u32,
    phase: LevelPhase,
    generation: LevelGeneration,
    dimension: Dimension,
    defeated_ids: HashSet<EntityId>,
}

impl Session {
    fn new() -> Self {
        Self {
            level: 0,
            quota: 0,
            defeated: 0,
            total_defeated: 0,
            phase: LevelPhase::Idle,
            generation: LevelGeneration::default(),
            dimension: Dimension::default(),
            defeated_ids: HashSet::new(),
        }
    }

    fn begin(&mut self, level: u32) {
        self.level = level;
        self.quota = total_enemy_quota(level);
        self.defeated = 0;
        self.phase = LevelPhase::Active;
        self.generation = self.generation.next();
        self.defeated_ids.clear();
    }
}

#[derive(Clone, Copy, Debug)]
struct Fixture {
    kind: EntityKind,
    bounds: Aabb,
}

#[derive(Clone, Copy, Debug)]
struct Player {
    position: Vec3,
    velocity: Vec3,
    sprinting: bool,
    health: u32,
}

impl Player {
    fn new() -> Self {
        Self {
            position: PLAYER_SPAWN,
            velocity: Vec3::ZERO,
            sprinting: false,
            health: MAX_HEALTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimension_shooter_core::{ObstacleKind, PowerKind};

    fn started(level: u32) -> (World, Vec<Event>) {
        let mut world = World::with_seed(11);
        let mut events = Vec::new();
        apply(&mut world, Command::StartLevel { level }, &mut events);
        (world, events)
    }

    fn spawn(world: &mut World, archetype: Archetype) -> EntityId {
        let mut events = Vec::new();
        apply(
            world,
            Command::SpawnEnemy {
                archetype,
                position: Vec3::new(15.0, 1.0, 15.0),
            },
            &mut events,
        );
        match events.as_slice() {
            [Event::EnemySpawned { enemy, .. }] => *enemy,
            other => panic!("unexpected spawn events: {other:?}"),
        }
    }

    #[test]
    fn start_level_announces_quota_and_kill_name() {
        let (world, events) = started(3);

        assert_eq!(
            events,
            vec![
                Event::LevelStarted {
                    level: 3,
                    generation: LevelGeneration::new(1),
                    quota: 16,
                },
                Event::Message {
                    text: "Level 3 - Defeat 16 Devourers".to_owned(),
                },
            ]
        );
        assert_eq!(query::session(&world).phase, LevelPhase::Active);
    }

    #[test]
    fn fixtures_before_first_level_are_ignored() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceObstacle {
                kind: ObstacleKind::Wall,
                bounds: Aabb::new(Vec3::ZERO, Vec3::ONE),
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert!(query::fixtures(&world).is_empty());
    }

    #[test]
    fn only_solid_fixtures_block_movement() {
        let (mut world, _) = started(2);
        let mut events = Vec::new();
        for kind in [ObstacleKind::Wall, ObstacleKind::Floor, ObstacleKind::Pillar] {
            apply(
                &mut world,
                Command::PlaceObstacle {
                    kind,
                    bounds: Aabb::new(Vec3::ZERO, Vec3::ONE),
                },
                &mut events,
            );
        }
        apply(
            &mut world,
            Command::PlaceKiosk {
                position: Vec3::new(12.0, 0.0, 12.0),
            },
            &mut events,
        );

        assert_eq!(query::fixtures(&world).len(), 4);
        assert_eq!(query::solid_obstacles(&world).len(), 2);
    }

    #[test]
    fn lethal_damage_defeats_and_drops_a_pickup() {
        let (mut world, _) = started(1);
        let enemy = spawn(&mut world, Archetype::Pyro);
        let mut events = Vec::new();

        apply(&mut world, Command::DamageEnemy { enemy, amount: 10 }, &mut events);
        assert_eq!(
            events,
            vec![Event::EnemyDamaged {
                enemy,
                amount: 10,
                remaining: 20,
            }]
        );

        events.clear();
        apply(&mut world, Command::DamageEnemy { enemy, amount: 25 }, &mut events);
        assert!(matches!(events[0], Event::EnemyDefeated { defeated: 1, .. }));
        assert!(events.contains(&Event::CurrencyRewarded { amount: 5 }));
        assert!(events.contains(&Event::PowerAbsorbed {
            power: AbsorbedPower::base(PowerKind::Fireball)
        }));
        assert_eq!(query::pickups(&world).len(), 1);
        assert_eq!(query::pending_replenishments(&world), 1);
    }

    #[test]
    fn enemy_attack_respects_cooldown() {
        let (mut world, _) = started(1);
        let enemy = spawn(&mut world, Archetype::Sentinel);
        let mut events = Vec::new();

        apply(&mut world, Command::EnemyAttack { enemy }, &mut events);
        apply(&mut world, Command::EnemyAttack { enemy }, &mut events);
        assert_eq!(
            events,
            vec![Event::PlayerDamaged {
                enemy,
                amount: ENEMY_DAMAGE_AMOUNT,
                health: 90,
            }]
        );

        events.clear();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(1_000),
            },
            &mut events,
        );
        apply(&mut world, Command::EnemyAttack { enemy }, &mut events);
        assert_eq!(query::player(&world).health, 90, "exactly one second is not enough");

        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(1),
            },
            &mut events,
        );
        apply(&mut world, Command::EnemyAttack { enemy }, &mut events);
        assert_eq!(query::player(&world).health, 80);
    }

    #[test]
    fn pickups_heal_up_to_the_maximum() {
        let (mut world, _) = started(1);
        let enemy = spawn(&mut world, Archetype::Sonar);
        let mut events = Vec::new();
        apply(&mut world, Command::EnemyAttack { enemy }, &mut events);
        apply(&mut world, Command::DefeatEnemy { enemy }, &mut events);
        let pickup = query::pickups(&world)[0].id;

        events.clear();
        apply(&mut world, Command::CollectPickup { pickup }, &mut events);
        assert_eq!(
            events,
            vec![Event::PickupCollected {
                pickup,
                amount: 10,
                health: MAX_HEALTH,
            }]
        );

        events.clear();
        apply(&mut world, Command::CollectPickup { pickup }, &mut events);
        assert_eq!(events, vec![Event::StaleEntity { entity: pickup }]);
    }

    #[test]
    fn dimension_shift_cycles_and_cools_down() {
        let (mut world, _) = started(1);
        let _ = spawn(&mut world, Archetype::Guardian);
        let mut events = Vec::new();

        apply(&mut world, Command::ShiftDimension, &mut events);
        assert_eq!(
            events,
            vec![Event::DimensionShifted {
                dimension: Dimension::Void
            }]
        );
        let speed = query::enemy_view(&world).iter().next().map(|enemy| enemy.speed);
        assert_eq!(speed, Some(1.5 * 0.7));

        events.clear();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(4),
            },
            &mut events,
        );
        apply(&mut world, Command::ShiftDimension, &mut events);
        assert!(events.contains(&Event::DimensionShiftRejected {
            reason: ShiftRejection::CoolingDown {
                ready_in: Duration::from_secs(6)
            }
        }));
        assert!(!query::dimension_shift_ready(&world));
    }

    #[test]
    fn quantum_speeds_stay_within_range() {
        let (mut world, _) = started(1);
        let mut events = Vec::new();
        for _ in 0..3 {
            apply(&mut world, Command::ShiftDimension, &mut events);
            apply(
                &mut world,
                Command::Tick {
                    dt: DIMENSION_SHIFT_COOLDOWN,
                },
                &mut events,
            );
        }
        assert_eq!(query::dimension(&world), Dimension::Quantum);

        for archetype in Archetype::ALL {
            let _ = spawn(&mut world, archetype);
        }
        for enemy in query::enemy_view(&world).iter() {
            let base = enemy.archetype.base_speed();
            assert!(enemy.speed >= base * 0.8 - f32::EPSILON);
            assert!(enemy.speed <= base * 1.2 + f32::EPSILON);
        }
    }

    #[test]
    fn player_intent_scales_with_sprint() {
        let (mut world, _) = started(1);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetPlayerIntent {
                heading: Vec3::new(0.0, 5.0, -3.0),
                sprint: true,
            },
            &mut events,
        );

        let velocity = query::player(&world).velocity;
        assert_eq!(velocity.y, 0.0);
        assert!((velocity.z + PLAYER_SPEED * SPRINT_MULTIPLIER).abs() < 1e-5);
        assert!(events.is_empty());
    }

    #[test]
    fn new_levels_start_with_the_player_at_rest() {
        let (mut world, _) = started(1);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetPlayerIntent {
                heading: Vec3::X,
                sprint: true,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::MovePlayer {
                position: Vec3::new(7.0, 1.8, -4.0),
            },
            &mut events,
        );
        apply(&mut world, Command::StartLevel { level: 2 }, &mut events);

        let player = query::player(&world);
        assert_eq!(player.position, PLAYER_SPAWN);
        assert_eq!(player.velocity, Vec3::ZERO);
        assert!(!player.sprinting);
    }
}
