#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that drives the session from one level to the next.

use dimension_shooter_core::{Command, Event};
use dimension_shooter_world::{query, World};
use tracing::info;

/// Emits the level transitions of a play session.
#[derive(Debug, Default)]
pub struct Bootstrap {
    final_level: Option<u32>,
}

impl Bootstrap {
    /// Creates a bootstrap that stops advancing after `final_level`, if provided.
    #[must_use]
    pub const fn new(final_level: Option<u32>) -> Self {
        Self { final_level }
    }

    /// Emits the command that opens the first level.
    pub fn boot(&self, world: &World, out: &mut Vec<Command>) {
        if query::session(world).level == 0 {
            out.push(Command::StartLevel { level: 1 });
        }
    }

    /// Starts the next level whenever the current one completes.
    pub fn handle(&self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if let Event::LevelCompleted { level } = event {
                let next = level.saturating_add(1);
                if self.final_level.map_or(false, |last| next > last) {
                    info!(level, "final level cleared");
                    continue;
                }
                out.push(Command::StartLevel { level: next });
            }
        }
    }

    /// Reports whether the session has cleared its final level.
    #[must_use]
    pub fn is_finished(&self, events: &[Event]) -> bool {
        self.final_level.map_or(false, |last| {
            events
                .iter()
                .any(|event| matches!(event, Event::LevelCompleted { level } if *level >= last))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimension_shooter_world::apply;

    #[test]
    fn boot_starts_the_first_level_once() {
        let bootstrap = Bootstrap::default();
        let mut world = World::new();
        let mut commands = Vec::new();
        bootstrap.boot(&world, &mut commands);
        assert_eq!(commands, vec![Command::StartLevel { level: 1 }]);

        let mut events = Vec::new();
        for command in commands.drain(..) {
            apply(&mut world, command, &mut events);
        }
        bootstrap.boot(&world, &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn completed_levels_advance() {
        let bootstrap = Bootstrap::default();
        let mut commands = Vec::new();
        bootstrap.handle(&[Event::LevelCompleted { level: 4 }], &mut commands);
        assert_eq!(commands, vec![Command::StartLevel { level: 5 }]);
    }

    #[test]
    fn final_level_stops_the_session() {
        let bootstrap = Bootstrap::new(Some(2));
        let mut commands = Vec::new();
        let events = [Event::LevelCompleted { level: 2 }];
        bootstrap.handle(&events, &mut commands);

        assert!(commands.is_empty());
        assert!(bootstrap.is_finished(&events));
        assert!(!bootstrap.is_finished(&[Event::LevelCompleted { level: 1 }]));
    }
}
