#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Layout realizer that turns a level number into world-space obstacle placements.
//!
//! Every level receives the same shell: floor, ceiling, an outer floor, a
//! boundary ring around the playfield and a closed outer skirt. Level one adds
//! a hand-authored hub with four rooms; later levels realize a generated maze
//! grid as wall blocks and sprinkle pillars over open cells. Kiosk fixtures
//! are scattered from level two onwards.

use dimension_shooter_core::{
    Aabb, CellCoord, Command, Event, ObstacleKind, LEVEL_SIZE, WALL_HEIGHT,
};
use dimension_shooter_system_maze::{generate, Cell, Grid};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

const WALL_THICKNESS: f32 = 1.5;
const PILLAR_WIDTH: f32 = 2.0;
const WALL_CELL_FILL: f32 = 0.9;
const SKIRT_GAP: f32 = 10.0;
const SKIRT_THICKNESS: f32 = 4.0;
const SKIRT_HEIGHT: f32 = WALL_HEIGHT * 1.5;
const PILLAR_KEEP_PROBABILITY: f64 = 0.7;
const KIOSK_MARGIN: f32 = 6.0;
const KIOSK_CLEARANCE: f32 = 10.0;
const KIOSK_PLACEMENT_ATTEMPTS: u32 = 64;

/// Single obstacle the world should register for the level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Kind of obstacle.
    pub kind: ObstacleKind,
    /// World-space bounds of the obstacle.
    pub bounds: Aabb,
}

impl Placement {
    fn new(kind: ObstacleKind, center: Vec3, size: Vec3) -> Self {
        Self {
            kind,
            bounds: Aabb::from_center_size(center, size),
        }
    }
}

/// Complete realization of a level.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    /// Obstacles in placement order.
    pub placements: Vec<Placement>,
    /// Floor positions of the kiosk fixtures.
    pub kiosks: Vec<Vec3>,
}

/// Realizes the provided level, generating its maze grid when needed.
pub fn realize<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Layout {
    let mut placements = shell_placements();
    if level <= 1 {
        placements.extend(starter_placements());
    } else {
        let grid = generate(level, rng);
        placements.extend(grid_placements(level, &grid, rng));
    }
    let kiosks = kiosk_positions(level, rng);
    Layout { placements, kiosks }
}

/// Floor, ceiling, outer floor, boundary ring and outer skirt shared by every level.
#[must_use]
pub fn shell_placements() -> Vec<Placement> {
    let half = LEVEL_SIZE / 2.0;
    let ring_length = LEVEL_SIZE + WALL_THICKNESS;
    let skirt_offset = half + SKIRT_GAP;
    let skirt_length = LEVEL_SIZE + 2.0 * (SKIRT_GAP + SKIRT_THICKNESS);
    let wall_y = WALL_HEIGHT / 2.0;
    let skirt_y = SKIRT_HEIGHT / 2.0;

    vec![
        Placement::new(
            ObstacleKind::Floor,
            Vec3::ZERO,
            Vec3::new(LEVEL_SIZE * 2.0, 0.0, LEVEL_SIZE * 2.0),
        ),
        Placement::new(
            ObstacleKind::Ceiling,
            Vec3::new(0.0, WALL_HEIGHT, 0.0),
            Vec3::new(LEVEL_SIZE * 2.0, 0.0, LEVEL_SIZE * 2.0),
        ),
        Placement::new(
            ObstacleKind::Floor,
            Vec3::new(0.0, -0.1, 0.0),
            Vec3::new(LEVEL_SIZE * 3.0, 0.0, LEVEL_SIZE * 3.0),
        ),
        Placement::new(
            ObstacleKind::Wall,
            Vec3::new(-half, wall_y, 0.0),
            Vec3::new(WALL_THICKNESS, WALL_HEIGHT, ring_length),
        ),
        Placement::new(
            ObstacleKind::Wall,
            Vec3::new(half, wall_y, 0.0),
            Vec3::new(WALL_THICKNESS, WALL_HEIGHT, ring_length),
        ),
        Placement::new(
            ObstacleKind::Wall,
            Vec3::new(0.0, wall_y, -half),
            Vec3::new(ring_length, WALL_HEIGHT, WALL_THICKNESS),
        ),
        Placement::new(
            ObstacleKind::Wall,
            Vec3::new(0.0, wall_y, half),
            Vec3::new(ring_length, WALL_HEIGHT, WALL_THICKNESS),
        ),
        Placement::new(
            ObstacleKind::OuterWall,
            Vec3::new(0.0, skirt_y, -skirt_offset),
            Vec3::new(skirt_length, SKIRT_HEIGHT, SKIRT_THICKNESS),
        ),
        Placement::new(
            ObstacleKind::OuterWall,
            Vec3::new(0.0, skirt_y, skirt_offset),
            Vec3::new(skirt_length, SKIRT_HEIGHT, SKIRT_THICKNESS),
        ),
        Placement::new(
            ObstacleKind::OuterWall,
            Vec3::new(skirt_offset, skirt_y, 0.0),
            Vec3::new(SKIRT_THICKNESS, SKIRT_HEIGHT, skirt_length),
        ),
        Placement::new(
            ObstacleKind::OuterWall,
            Vec3::new(-skirt_offset, skirt_y, 0.0),
            Vec3::new(SKIRT_THICKNESS, SKIRT_HEIGHT, skirt_length),
        ),
    ]
}

/// Hand-authored hub with four corner rooms used by the first level.
#[must_use]
pub fn starter_placements() -> Vec<Placement> {
    let room = LEVEL_SIZE / 4.0;
    let wall_y = WALL_HEIGHT / 2.0;
    let along_x = Vec3::new(room * 1.5, WALL_HEIGHT, WALL_THICKNESS);
    let along_z = Vec3::new(WALL_THICKNESS, WALL_HEIGHT, room);
    let pillar = Vec3::new(PILLAR_WIDTH, WALL_HEIGHT, PILLAR_WIDTH);

    let mut placements = Vec::with_capacity(12);
    for (sx, sz) in [(1.0, -1.0), (1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0)] {
        placements.push(Placement::new(
            ObstacleKind::Wall,
            Vec3::new(sx * room, wall_y, sz * room),
            along_x,
        ));
        placements.push(Placement::new(
            ObstacleKind::Wall,
            Vec3::new(sx * room * 2.0, wall_y, sz * room * 1.5),
            along_z,
        ));
    }
    for (sx, sz) in [(1.0, -1.0), (1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0)] {
        placements.push(Placement::new(
            ObstacleKind::Pillar,
            Vec3::new(sx * room * 1.5, wall_y, sz * room * 1.5),
            pillar,
        ));
    }
    placements
}

/// Realizes wall cells as blocks and rolls pillars over open cells.
pub fn grid_placements<R: Rng + ?Sized>(level: u32, grid: &Grid, rng: &mut R) -> Vec<Placement> {
    let size = grid.size();
    if size == 0 {
        return Vec::new();
    }
    let cell_length = LEVEL_SIZE / size as f32;
    let center = grid.center();
    let jitter = (cell_length / 6.0).floor() as i32;
    let pillar_probability = f64::from(0.2 * level as f32 / 10.0).min(1.0);
    let wall_y = WALL_HEIGHT / 2.0;

    let mut placements = Vec::new();
    for (coord, cell) in grid.iter() {
        let (wx, wz) = cell_offset(coord, center, cell_length);
        match cell {
            Cell::Wall => {
                let width = cell_length * WALL_CELL_FILL;
                placements.push(Placement::new(
                    ObstacleKind::Wall,
                    Vec3::new(wx, wall_y, wz),
                    Vec3::new(width, WALL_HEIGHT, width),
                ));
            }
            Cell::Open => {
                if !rng.gen_bool(pillar_probability) {
                    continue;
                }
                let px = wx + rng.gen_range(-jitter..=jitter) as f32;
                let pz = wz + rng.gen_range(-jitter..=jitter) as f32;
                if coord.chebyshev_distance(center) <= 1 {
                    continue;
                }
                if rng.gen_bool(PILLAR_KEEP_PROBABILITY) {
                    placements.push(Placement::new(
                        ObstacleKind::Pillar,
                        Vec3::new(px, wall_y, pz),
                        Vec3::new(PILLAR_WIDTH, WALL_HEIGHT, PILLAR_WIDTH),
                    ));
                }
            }
        }
    }
    placements
}

/// Number of kiosks placed in the provided level.
#[must_use]
pub fn kiosk_count(level: u32) -> u32 {
    if level <= 1 {
        0
    } else {
        (level / 3).max(1)
    }
}

/// Scatters kiosks inside the playfield, away from the central spawn area.
pub fn kiosk_positions<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Vec<Vec3> {
    let span = LEVEL_SIZE - KIOSK_MARGIN;
    (0..kiosk_count(level))
        .filter_map(|_| {
            (0..KIOSK_PLACEMENT_ATTEMPTS).find_map(|_| {
                let x = rng.gen_range(0.0..span) - span / 2.0;
                let z = rng.gen_range(0.0..span) - span / 2.0;
                let near_spawn = x.abs() < KIOSK_CLEARANCE && z.abs() < KIOSK_CLEARANCE;
                (!near_spawn).then_some(Vec3::new(x, 0.0, z))
            })
        })
        .collect()
}

fn cell_offset(coord: CellCoord, center: CellCoord, cell_length: f32) -> (f32, f32) {
    let dx = i64::from(coord.column()) - i64::from(center.column());
    let dz = i64::from(coord.row()) - i64::from(center.row());
    (dx as f32 * cell_length, dz as f32 * cell_length)
}

/// System that realizes a fresh layout whenever a level starts.
#[derive(Debug)]
pub struct Realizer {
    rng: ChaCha8Rng,
}

impl Realizer {
    /// Creates a realizer whose layouts derive from the provided seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Consumes world events and emits placement commands for started levels.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            let Event::LevelStarted { level, .. } = event else {
                continue;
            };

            let layout = realize(*level, &mut self.rng);
            debug!(
                level,
                obstacles = layout.placements.len(),
                kiosks = layout.kiosks.len(),
                "realized layout"
            );
            out.extend(layout.placements.into_iter().map(|placement| {
                Command::PlaceObstacle {
                    kind: placement.kind,
                    bounds: placement.bounds,
                }
            }));
            out.extend(
                layout
                    .kiosks
                    .into_iter()
                    .map(|position| Command::PlaceKiosk { position }),
            );
        }
    }
}
