use dimension_shooter_core::{
    CollisionClass, Command, EntityKind, Event, LevelGeneration, ObstacleKind, LEVEL_SIZE,
    WALL_HEIGHT,
};
use dimension_shooter_system_layout::{grid_placements, realize, shell_placements, Realizer};
use dimension_shooter_system_maze::Grid;
use dimension_shooter_world::{apply, query, World};
use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn wall_cells_become_scaled_blocks() {
    let grid = Grid::from_rows(&["#.#", "...", "#.#"]).expect("square grid");
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let placements = grid_placements(2, &grid, &mut rng);
    let walls: Vec<_> = placements
        .iter()
        .filter(|placement| placement.kind == ObstacleKind::Wall)
        .collect();

    assert_eq!(walls.len(), 4, "one block per wall cell");
    let cell = LEVEL_SIZE / 3.0;
    for wall in &walls {
        let size = wall.bounds.size();
        assert!((size.x - cell * 0.9).abs() < 1e-4);
        assert!((size.z - cell * 0.9).abs() < 1e-4);
        assert_eq!(size.y, WALL_HEIGHT);
        assert_eq!(wall.bounds.center().y, WALL_HEIGHT / 2.0);
        assert!((wall.bounds.center().x.abs() - cell).abs() < 1e-4);
        assert!((wall.bounds.center().z.abs() - cell).abs() < 1e-4);
    }
}

#[test]
fn pillars_never_crowd_the_spawn_cell() {
    let grid = Grid::from_rows(&[".....", ".....", ".....", ".....", "....."]).expect("square grid");
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let cell = LEVEL_SIZE / 5.0;

    for _ in 0..50 {
        for placement in grid_placements(30, &grid, &mut rng) {
            assert_eq!(placement.kind, ObstacleKind::Pillar);
            let center = placement.bounds.center();
            let ring = center.x.abs().max(center.z.abs());
            assert!(ring > cell, "pillar at {center:?} sits next to the spawn cell");
        }
    }
}

#[test]
fn first_level_uses_the_starter_hub() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let layout = realize(1, &mut rng);

    assert_eq!(layout.placements.len(), shell_placements().len() + 12);
    assert!(layout.kiosks.is_empty());
    assert_eq!(
        layout
            .placements
            .iter()
            .filter(|placement| placement.kind == ObstacleKind::Pillar)
            .count(),
        4
    );
}

#[test]
fn later_levels_leave_the_spawn_point_clear() {
    let spawn = Vec3::new(0.0, 1.8, 0.0);
    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for level in 2..=20 {
            let layout = realize(level, &mut rng);
            assert!(
                layout
                    .placements
                    .iter()
                    .filter(|placement| {
                        EntityKind::from(placement.kind).collision() == CollisionClass::Solid
                    })
                    .all(|placement| !placement.bounds.expanded(0.5).contains_point(spawn)),
                "level {level} seed {seed} blocks the spawn point"
            );
        }
    }
}

#[test]
fn realizer_registers_the_layout_with_the_world() {
    let mut world = World::with_seed(9);
    let mut events = Vec::new();
    apply(&mut world, Command::StartLevel { level: 6 }, &mut events);

    let mut realizer = Realizer::new(17);
    let mut commands = Vec::new();
    realizer.handle(&events, &mut commands);

    let kiosk_commands = commands
        .iter()
        .filter(|command| matches!(command, Command::PlaceKiosk { .. }))
        .count();
    assert_eq!(kiosk_commands, 2);

    let mut placed = Vec::new();
    for command in commands {
        apply(&mut world, command, &mut placed);
    }

    let solid = query::solid_obstacles(&world);
    let expected_solid = placed
        .iter()
        .filter(|event| {
            matches!(
                event,
                Event::ObstaclePlaced {
                    kind: ObstacleKind::Wall | ObstacleKind::Pillar | ObstacleKind::OuterWall,
                    ..
                }
            )
        })
        .count();
    assert_eq!(solid.len(), expected_solid);
    assert!(expected_solid >= 8);
}

#[test]
fn realizer_ignores_other_events() {
    let mut realizer = Realizer::new(1);
    let mut commands = Vec::new();
    realizer.handle(
        &[
            Event::LevelCompleted { level: 1 },
            Event::Message {
                text: "noise".to_owned(),
            },
        ],
        &mut commands,
    );
    assert!(commands.is_empty());

    realizer.handle(
        &[Event::LevelStarted {
            level: 2,
            generation: LevelGeneration::new(4),
            quota: 14,
        }],
        &mut commands,
    );
    assert!(!commands.is_empty());
}
