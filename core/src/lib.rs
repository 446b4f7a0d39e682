#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Dimension Shooter level engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems and collaborators to react to. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command
//! batches.

use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Side length of the square playfield measured in world units.
pub const LEVEL_SIZE: f32 = 40.0;
/// Height of regular walls and pillars.
pub const WALL_HEIGHT: f32 = 5.0;
/// Eye height of the player; the player never sinks below it.
pub const PLAYER_HEIGHT: f32 = 1.8;
/// Collision radius of the player.
pub const PLAYER_RADIUS: f32 = 0.5;
/// Collision radius of an enemy body.
pub const ENEMY_RADIUS: f32 = 1.0;
/// Minimum centre distance two enemies keep from each other.
pub const ENEMY_SEPARATION: f32 = 2.0;
/// Height at which enemies are spawned and move.
pub const ENEMY_SPAWN_HEIGHT: f32 = 1.0;
/// Walking speed of the player in units per second.
pub const PLAYER_SPEED: f32 = 8.0;
/// Multiplier applied to the player speed while sprinting.
pub const SPRINT_MULTIPLIER: f32 = 1.8;
/// Maximum health of the player.
pub const MAX_HEALTH: u32 = 100;
/// Health the player is raised to, at minimum, when advancing to a new level.
pub const ADVANCE_HEALTH_FLOOR: u32 = 30;
/// Number of enemies that may be alive at the same time.
pub const MAX_ACTIVE_ENEMIES: usize = 6;
/// Distance at which enemies start reacting to the player.
pub const ENEMY_UPDATE_RADIUS: f32 = 40.0;
/// Distance within which an enemy strikes instead of advancing.
pub const ENEMY_ATTACK_RANGE: f32 = 2.0;
/// Minimum time between two strikes of the same enemy.
pub const ENEMY_ATTACK_COOLDOWN: Duration = Duration::from_millis(1_000);
/// Damage dealt to the player by a single enemy strike.
pub const ENEMY_DAMAGE_AMOUNT: u32 = 10;
/// Default minimum distance between the player and a freshly spawned enemy.
pub const DEFAULT_SPAWN_DISTANCE: f32 = 20.0;
/// Number of candidate positions tried before a spawn slot is skipped.
pub const SPAWN_PLACEMENT_ATTEMPTS: u32 = 20;
/// Delay between an enemy death and the replenishment it triggers.
pub const REPLENISH_DELAY: Duration = Duration::from_millis(1_000);
/// Currency credited for every defeated enemy.
pub const CURRENCY_PER_ENEMY: u32 = 5;
/// Currency credited for every completed level.
pub const CURRENCY_PER_LEVEL: u32 = 50;
/// Health restored by a single health pickup.
pub const HEALTH_PICKUP_VALUE: u32 = 25;
/// Distance within which the player collects a health pickup.
pub const PICKUP_RADIUS: f32 = 2.0;
/// Minimum time between two dimension shifts.
pub const DIMENSION_SHIFT_COOLDOWN: Duration = Duration::from_secs(10);

/// Foe names rotated through as levels advance.
pub const KILL_NAMES: [&str; 5] = ["Guardians", "Anomalies", "Devourers", "Entities", "Fragments"];

/// Number of enemies that must be defeated to clear the provided level.
///
/// The first level asks for ten defeats; every later level asks for
/// `10 + 2 * level`.
#[must_use]
pub const fn total_enemy_quota(level: u32) -> u32 {
    if level <= 1 {
        10
    } else {
        10 + 2 * level
    }
}

/// Name used for the foes of the provided level.
#[must_use]
pub fn kill_name(level: u32) -> &'static str {
    let index = level.saturating_sub(1) as usize % KILL_NAMES.len();
    KILL_NAMES[index]
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Tears down the current level and starts the provided one.
    StartLevel {
        /// Number of the level to start, beginning at one.
        level: u32,
    },
    /// Registers a collidable (or surface) obstacle for the current level.
    PlaceObstacle {
        /// Kind of obstacle being placed.
        kind: ObstacleKind,
        /// World-space bounds of the obstacle.
        bounds: Aabb,
    },
    /// Registers a kiosk fixture for the current level.
    PlaceKiosk {
        /// Floor position of the kiosk.
        position: Vec3,
    },
    /// Requests that a new enemy join the active roster.
    SpawnEnemy {
        /// Template the enemy is built from.
        archetype: Archetype,
        /// World-space position of the new enemy.
        position: Vec3,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Updates the movement intent of the player.
    SetPlayerIntent {
        /// Desired world-space heading; only the horizontal part is used.
        heading: Vec3,
        /// Whether the player is sprinting.
        sprint: bool,
    },
    /// Moves the player to an already resolved position.
    MovePlayer {
        /// Resolved world-space position of the player.
        position: Vec3,
    },
    /// Moves an enemy to an already resolved position.
    MoveEnemy {
        /// Identifier of the enemy.
        enemy: EntityId,
        /// Resolved world-space position of the enemy.
        position: Vec3,
        /// Direction the enemy faces after the move.
        facing: Vec3,
    },
    /// Requests that an enemy strike the player.
    EnemyAttack {
        /// Identifier of the attacking enemy.
        enemy: EntityId,
    },
    /// Applies damage to an enemy.
    DamageEnemy {
        /// Identifier of the damaged enemy.
        enemy: EntityId,
        /// Amount of health removed.
        amount: u32,
    },
    /// Defeats an enemy outright regardless of its remaining health.
    DefeatEnemy {
        /// Identifier of the defeated enemy.
        enemy: EntityId,
    },
    /// Collects a health pickup on behalf of the player.
    CollectPickup {
        /// Identifier of the pickup.
        pickup: EntityId,
    },
    /// Cycles the active dimension.
    ShiftDimension,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Reports every entity removed while tearing down the previous level.
    LevelTornDown {
        /// Level that was torn down.
        level: u32,
        /// Entities that no longer exist.
        removed: Vec<EntityId>,
    },
    /// Announces that a new level became active.
    LevelStarted {
        /// Number of the level.
        level: u32,
        /// Generation token identifying this level instance.
        generation: LevelGeneration,
        /// Number of defeats required to clear the level.
        quota: u32,
    },
    /// Confirms that an obstacle was registered.
    ObstaclePlaced {
        /// Identifier assigned to the obstacle.
        obstacle: EntityId,
        /// Kind of the obstacle.
        kind: ObstacleKind,
        /// World-space bounds of the obstacle.
        bounds: Aabb,
    },
    /// Confirms that a kiosk was registered.
    KioskPlaced {
        /// Identifier assigned to the kiosk.
        kiosk: EntityId,
        /// Floor position of the kiosk.
        position: Vec3,
    },
    /// Confirms that an enemy joined the roster.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EntityId,
        /// Template the enemy was built from.
        archetype: Archetype,
        /// World-space position of the enemy.
        position: Vec3,
    },
    /// Reports that a spawn request was refused.
    EnemySpawnRejected {
        /// Template of the refused enemy.
        archetype: Archetype,
        /// Reason the request was refused.
        reason: SpawnRejection,
    },
    /// Confirms that an enemy moved.
    EnemyMoved {
        /// Identifier of the enemy.
        enemy: EntityId,
        /// Position before the move.
        from: Vec3,
        /// Position after the move.
        to: Vec3,
    },
    /// Confirms that the player moved.
    PlayerMoved {
        /// Position before the move.
        from: Vec3,
        /// Position after the move.
        to: Vec3,
    },
    /// Reports damage dealt to the player by an enemy.
    PlayerDamaged {
        /// Enemy that dealt the damage.
        enemy: EntityId,
        /// Amount of health removed.
        amount: u32,
        /// Health remaining afterwards.
        health: u32,
    },
    /// Reports that the player's health reached zero.
    PlayerDefeated,
    /// Reports damage dealt to an enemy that survived it.
    EnemyDamaged {
        /// Identifier of the enemy.
        enemy: EntityId,
        /// Amount of health removed.
        amount: u32,
        /// Health remaining afterwards.
        remaining: u32,
    },
    /// Reports that an enemy was defeated and left the roster.
    EnemyDefeated {
        /// Identifier of the defeated enemy.
        enemy: EntityId,
        /// Template the enemy was built from.
        archetype: Archetype,
        /// Position the enemy died at.
        position: Vec3,
        /// Defeats recorded in the current level, including this one.
        defeated: u32,
        /// Defeats recorded across the whole session.
        total_defeated: u32,
    },
    /// Reports that a new power type joined the absorbed set.
    PowerAbsorbed {
        /// Power that was absorbed.
        power: AbsorbedPower,
    },
    /// Reports currency credited to the player.
    CurrencyRewarded {
        /// Amount credited.
        amount: u32,
    },
    /// Reports that a health pickup was dropped.
    HealthPickupDropped {
        /// Identifier assigned to the pickup.
        pickup: EntityId,
        /// Position of the pickup.
        position: Vec3,
    },
    /// Reports that the player collected a health pickup.
    PickupCollected {
        /// Identifier of the collected pickup.
        pickup: EntityId,
        /// Health restored.
        amount: u32,
        /// Player health afterwards.
        health: u32,
    },
    /// Reports that a deferred replenishment came due for the live level.
    ReplenishmentDue {
        /// Level the replenishment belongs to.
        level: u32,
        /// Number of enemies that should be spawned.
        count: u32,
    },
    /// Announces that the level quota was met.
    LevelCompleted {
        /// Number of the completed level.
        level: u32,
    },
    /// Announces that the active dimension changed.
    DimensionShifted {
        /// Dimension that became active.
        dimension: Dimension,
    },
    /// Reports that a dimension shift was refused.
    DimensionShiftRejected {
        /// Reason the shift was refused.
        reason: ShiftRejection,
    },
    /// Reports that a command referenced an entity that no longer exists.
    StaleEntity {
        /// Identifier that could not be resolved.
        entity: EntityId,
    },
    /// Human-readable message for the player.
    Message {
        /// Text of the message.
        text: String,
    },
}

/// Unique identifier assigned to any entity owned by a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Token identifying one instance of a level; bumped on every level start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelGeneration(u64);

impl LevelGeneration {
    /// Creates a generation token from its numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the token.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns the token that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Location of a single maze grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Chebyshev (king move) distance between two cell coordinates.
    #[must_use]
    pub fn chebyshev_distance(self, other: CellCoord) -> u32 {
        self.column()
            .abs_diff(other.column())
            .max(self.row().abs_diff(other.row()))
    }
}

/// Axis-aligned box expressed as a centre and half extents.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    center: Vec3,
    half_extents: Vec3,
}

impl Aabb {
    /// Creates a box from its centre and half extents.
    #[must_use]
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    /// Creates a box from its centre and full size.
    #[must_use]
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        Self::new(center, size * 0.5)
    }

    /// Centre of the box.
    #[must_use]
    pub const fn center(&self) -> Vec3 {
        self.center
    }

    /// Half extents of the box along each axis.
    #[must_use]
    pub const fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Full size of the box along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.half_extents * 2.0
    }

    /// Minimum corner of the box.
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    /// Maximum corner of the box.
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Reports whether the point lies inside the box; faces count as inside.
    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x
            && point.x <= max.x
            && point.y >= min.y
            && point.y <= max.y
            && point.z >= min.z
            && point.z <= max.z
    }

    /// Returns a copy grown by `amount` on every side.
    #[must_use]
    pub fn expanded(&self, amount: f32) -> Self {
        Self::new(self.center, self.half_extents + Vec3::splat(amount))
    }
}

/// Kinds of static obstacles produced by the layout realizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Interior wall segment or wall cell.
    Wall,
    /// Free-standing pillar.
    Pillar,
    /// Thick boundary wall of the outer skirt.
    OuterWall,
    /// Walkable floor slab.
    Floor,
    /// Ceiling slab.
    Ceiling,
}

/// Every kind of entity a level can own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Interior wall segment or wall cell.
    Wall,
    /// Free-standing pillar.
    Pillar,
    /// Thick boundary wall of the outer skirt.
    OuterWall,
    /// Walkable floor slab.
    Floor,
    /// Ceiling slab.
    Ceiling,
    /// Health pickup dropped by a defeated enemy.
    HealthPickup,
    /// Live enemy of the given archetype.
    Enemy(Archetype),
    /// Merchant kiosk fixture.
    Kiosk,
}

impl EntityKind {
    /// Describes how the entity takes part in collision resolution.
    #[must_use]
    pub const fn collision(self) -> CollisionClass {
        match self {
            Self::Wall | Self::Pillar | Self::OuterWall => CollisionClass::Solid,
            Self::Floor | Self::Ceiling => CollisionClass::Surface,
            Self::HealthPickup => CollisionClass::Pickup,
            Self::Enemy(_) => CollisionClass::Body,
            Self::Kiosk => CollisionClass::Passive,
        }
    }
}

impl From<ObstacleKind> for EntityKind {
    fn from(kind: ObstacleKind) -> Self {
        match kind {
            ObstacleKind::Wall => Self::Wall,
            ObstacleKind::Pillar => Self::Pillar,
            ObstacleKind::OuterWall => Self::OuterWall,
            ObstacleKind::Floor => Self::Floor,
            ObstacleKind::Ceiling => Self::Ceiling,
        }
    }
}

/// Role an entity plays during collision resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollisionClass {
    /// Blocks the player and enemies.
    Solid,
    /// Floor or ceiling; handled by the height clamp instead of push-out.
    Surface,
    /// Never blocks; collected on contact.
    Pickup,
    /// Round body pushed apart by radius.
    Body,
    /// Never blocks and is never collected.
    Passive,
}

/// Power an enemy carries and the player absorbs when defeating it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PowerKind {
    /// Rapid energy bolt.
    Bullet,
    /// Slow, heavy fireball.
    Fireball,
    /// Freezing shard.
    Ice,
    /// Sonic wave.
    Sonic,
    /// Protective shield.
    Shield,
    /// Short-range teleport.
    Teleport,
}

impl PowerKind {
    /// Damage dealt by the absorbed power.
    #[must_use]
    pub const fn damage(self) -> u32 {
        match self {
            Self::Bullet => 10,
            Self::Fireball => 20,
            Self::Ice => 15,
            Self::Sonic => 12,
            Self::Shield => 5,
            Self::Teleport => 10,
        }
    }

    /// Energy cost of using the absorbed power.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Bullet => 5,
            Self::Fireball => 15,
            Self::Ice => 10,
            Self::Sonic => 5,
            Self::Shield => 20,
            Self::Teleport => 25,
        }
    }

    /// Projectile speed of the absorbed power.
    #[must_use]
    pub const fn speed(self) -> f32 {
        match self {
            Self::Bullet => 0.5,
            Self::Fireball => 0.3,
            Self::Ice => 0.4,
            Self::Sonic => 0.6,
            Self::Shield => 0.2,
            Self::Teleport => 0.7,
        }
    }
}

/// Entry in the player's absorbed power set; each type appears at most once.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbsorbedPower {
    /// Type of the power.
    pub kind: PowerKind,
    /// Damage dealt by the power.
    pub damage: u32,
    /// Energy cost of the power.
    pub cost: u32,
    /// Projectile speed of the power.
    pub speed: f32,
    /// Whether the power has been enhanced by fusion.
    pub enhanced: bool,
}

impl AbsorbedPower {
    /// Builds the base (unenhanced) entry for the provided power type.
    #[must_use]
    pub const fn base(kind: PowerKind) -> Self {
        Self {
            kind,
            damage: kind.damage(),
            cost: kind.cost(),
            speed: kind.speed(),
            enhanced: false,
        }
    }
}

/// Fixed enemy templates; each fixes base stats and the carried power.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Archetype {
    /// Balanced ranged guard.
    Sentinel,
    /// Fragile fire caster.
    Pyro,
    /// Ice caster.
    Frost,
    /// Weak sonic caster.
    Sonar,
    /// Sturdy, slower shield bearer.
    Guardian,
    /// Teleporting skirmisher.
    Shifter,
}

impl Archetype {
    /// Every archetype, in a stable order used for uniform selection.
    pub const ALL: [Archetype; 6] = [
        Self::Sentinel,
        Self::Pyro,
        Self::Frost,
        Self::Sonar,
        Self::Guardian,
        Self::Shifter,
    ];

    /// Display name of the archetype.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sentinel => "Sentinel",
            Self::Pyro => "Pyro",
            Self::Frost => "Frost",
            Self::Sonar => "Sonar",
            Self::Guardian => "Guardian",
            Self::Shifter => "Shifter",
        }
    }

    /// Health an enemy of this archetype spawns with.
    #[must_use]
    pub const fn base_health(self) -> u32 {
        match self {
            Self::Sentinel => 50,
            Self::Pyro => 30,
            Self::Frost => 40,
            Self::Sonar => 35,
            Self::Guardian => 80,
            Self::Shifter => 45,
        }
    }

    /// Walking speed in units per second before dimension modifiers.
    #[must_use]
    pub const fn base_speed(self) -> f32 {
        match self {
            Self::Guardian => 1.5,
            Self::Sentinel | Self::Pyro | Self::Frost | Self::Sonar | Self::Shifter => 1.8,
        }
    }

    /// Power absorbed when an enemy of this archetype is defeated.
    #[must_use]
    pub const fn power(self) -> PowerKind {
        match self {
            Self::Sentinel => PowerKind::Bullet,
            Self::Pyro => PowerKind::Fireball,
            Self::Frost => PowerKind::Ice,
            Self::Sonar => PowerKind::Sonic,
            Self::Guardian => PowerKind::Shield,
            Self::Shifter => PowerKind::Teleport,
        }
    }
}

/// Biomes that modify enemy pacing and visuals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Baseline dimension.
    #[default]
    Prime,
    /// Dark dimension that slows enemies.
    Void,
    /// Bright dimension that speeds enemies up.
    Nexus,
    /// Unstable dimension with per-enemy random pacing.
    Quantum,
}

impl Dimension {
    /// Dimension reached by shifting from this one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Prime => Self::Void,
            Self::Void => Self::Nexus,
            Self::Nexus => Self::Quantum,
            Self::Quantum => Self::Prime,
        }
    }

    /// Inclusive range the enemy speed multiplier is drawn from.
    ///
    /// Only [`Dimension::Quantum`] yields a non-degenerate range.
    #[must_use]
    pub const fn speed_multiplier_range(self) -> (f32, f32) {
        match self {
            Self::Prime => (1.0, 1.0),
            Self::Void => (0.7, 0.7),
            Self::Nexus => (1.2, 1.2),
            Self::Quantum => (0.8, 1.2),
        }
    }

    /// Lowercase name of the dimension.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Prime => "prime",
            Self::Void => "void",
            Self::Nexus => "nexus",
            Self::Quantum => "quantum",
        }
    }
}

/// Reasons a spawn request may be refused by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnRejection {
    /// The roster already holds the maximum number of live enemies.
    RosterFull,
    /// No level is currently accepting enemies.
    LevelInactive,
}

/// Reasons a dimension shift may be refused by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShiftRejection {
    /// The previous shift happened too recently.
    CoolingDown {
        /// Time left until the next shift is allowed.
        ready_in: Duration,
    },
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EntityId,
    /// Template the enemy was built from.
    pub archetype: Archetype,
    /// World-space position of the enemy.
    pub position: Vec3,
    /// Direction the enemy faces.
    pub facing: Vec3,
    /// Remaining health.
    pub health: u32,
    /// Walking speed in units per second including dimension modifiers.
    pub speed: f32,
    /// Whether the enemy's strike cooldown has elapsed.
    pub attack_ready: bool,
}

/// Read-only snapshot describing all live enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// World-space position of the player.
    pub position: Vec3,
    /// Velocity requested by the current intent, in units per second.
    pub velocity: Vec3,
    /// Whether the player is sprinting.
    pub sprinting: bool,
    /// Remaining health.
    pub health: u32,
}

/// Immutable representation of a pickup used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupSnapshot {
    /// Identifier of the pickup.
    pub id: EntityId,
    /// World-space position of the pickup.
    pub position: Vec3,
}
