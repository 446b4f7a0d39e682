use std::time::Duration;

use dimension_shooter_core::{
    Aabb, Archetype, Command, EnemySnapshot, Event, ObstacleKind, PlayerSnapshot,
};
use dimension_shooter_system_movement::Movement;
use dimension_shooter_world::{self as world, query, World};
use glam::Vec3;

#[test]
fn deterministic_replay_produces_identical_runs() {
    let first = replay(scripted_commands());
    let second = replay(scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert!(
        first
            .events
            .iter()
            .any(|event| matches!(event, Event::PlayerDamaged { .. })),
        "script should bring enemies into striking range"
    );
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    enemies: Vec<EnemySnapshot>,
    player: PlayerSnapshot,
    events: Vec<Event>,
}

fn replay(commands: Vec<Command>) -> ReplayOutcome {
    let mut world = World::with_seed(0x5eed);
    let mut movement = Movement::default();
    let mut log = Vec::new();

    for command in commands {
        let mut events = Vec::new();
        world::apply(&mut world, command, &mut events);
        log.extend(events.iter().cloned());
        process_movement(&mut world, &mut movement, &events, &mut log);
    }

    ReplayOutcome {
        enemies: query::enemy_view(&world).into_vec(),
        player: query::player(&world),
        events: log,
    }
}

fn process_movement(world: &mut World, movement: &mut Movement, events: &[Event], log: &mut Vec<Event>) {
    let mut commands = Vec::new();
    movement.handle(
        events,
        &query::player(world),
        &query::enemy_view(world),
        &query::solid_obstacles(world),
        &query::pickups(world),
        &mut commands,
    );

    for command in commands {
        let mut generated = Vec::new();
        world::apply(world, command, &mut generated);
        log.extend(generated);
    }
}

fn scripted_commands() -> Vec<Command> {
    let mut commands = vec![
        Command::StartLevel { level: 3 },
        Command::PlaceObstacle {
            kind: ObstacleKind::Pillar,
            bounds: Aabb::new(Vec3::new(4.0, 2.5, 4.0), Vec3::new(1.0, 2.5, 1.0)),
        },
        Command::PlaceObstacle {
            kind: ObstacleKind::Wall,
            bounds: Aabb::new(Vec3::new(-8.0, 2.5, 0.0), Vec3::new(0.5, 2.5, 6.0)),
        },
        Command::SpawnEnemy {
            archetype: Archetype::Pyro,
            position: Vec3::new(12.0, 1.0, 9.0),
        },
        Command::SpawnEnemy {
            archetype: Archetype::Guardian,
            position: Vec3::new(-14.0, 1.0, 1.0),
        },
        Command::SpawnEnemy {
            archetype: Archetype::Sonar,
            position: Vec3::new(0.0, 1.0, -15.0),
        },
        Command::SetPlayerIntent {
            heading: Vec3::new(1.0, 0.0, 1.0),
            sprint: false,
        },
    ];

    for step in 0..240 {
        commands.push(Command::Tick {
            dt: Duration::from_millis(50),
        });
        if step == 20 {
            commands.push(Command::SetPlayerIntent {
                heading: Vec3::ZERO,
                sprint: false,
            });
        }
        if step == 120 {
            commands.push(Command::ShiftDimension);
        }
    }

    commands
}
