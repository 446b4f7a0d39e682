//! Headless session driver wiring the world, the systems and the presenter.

use std::{fmt, time::Duration};

use dimension_shooter_core::{Command, Dimension, Event};
use dimension_shooter_rendering::Presenter;
use dimension_shooter_system_bootstrap::Bootstrap;
use dimension_shooter_system_layout::Realizer;
use dimension_shooter_system_movement::Movement;
use dimension_shooter_system_spawning::{Config as SpawningConfig, Spawning};
use dimension_shooter_world::{self as world, query, LevelPhase, World};
use tracing::{info, warn};

use crate::{
    autopilot::Autopilot,
    config::SessionConfig,
    headless::{HeadlessScene, LogHud, Wallet},
};

const LAYOUT_STREAM: u64 = 0x4c41_594f;
const SPAWN_STREAM: u64 = 0x5350_574e;

/// Reason a session stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// The configured final level was cleared.
    Completed,
    /// The player's health reached zero.
    PlayerDefeated,
    /// The level has no enemies left and nothing scheduled to replace them.
    Stalled {
        /// Level that stopped progressing.
        level: u32,
    },
    /// The tick limit was reached first.
    TimedOut,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::PlayerDefeated => write!(f, "player defeated"),
            Self::Stalled { level } => write!(f, "stalled on level {level}"),
            Self::TimedOut => write!(f, "tick limit reached"),
        }
    }
}

/// Final report of a session.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Summary {
    pub(crate) outcome: Outcome,
    pub(crate) ticks: u64,
    pub(crate) elapsed: Duration,
    pub(crate) levels_cleared: u32,
    pub(crate) enemies_defeated: u32,
    pub(crate) currency: u64,
    pub(crate) health: u32,
    pub(crate) dimension: Dimension,
    pub(crate) powers: usize,
    pub(crate) renderables: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "outcome: {}", self.outcome)?;
        writeln!(
            f,
            "ticks: {} ({:.1}s simulated)",
            self.ticks,
            self.elapsed.as_secs_f32()
        )?;
        writeln!(f, "levels cleared: {}", self.levels_cleared)?;
        writeln!(f, "enemies defeated: {}", self.enemies_defeated)?;
        writeln!(f, "currency: {}", self.currency)?;
        writeln!(f, "player health: {}", self.health)?;
        writeln!(f, "dimension: {}", self.dimension.name())?;
        writeln!(f, "absorbed powers: {}", self.powers)?;
        write!(f, "renderables: {}", self.renderables)
    }
}

/// Owns every participant of a headless session.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    bootstrap: Bootstrap,
    realizer: Realizer,
    spawning: Spawning,
    movement: Movement,
    autopilot: Autopilot,
    presenter: Presenter<HeadlessScene>,
    hud: LogHud,
    wallet: Wallet,
    tick: Duration,
    max_ticks: u64,
    ticks: u64,
}

impl Simulation {
    pub(crate) fn new(config: &SessionConfig) -> Self {
        Self {
            world: World::with_seed(config.seed),
            bootstrap: Bootstrap::new(config.final_level()),
            realizer: Realizer::new(config.seed ^ LAYOUT_STREAM),
            spawning: Spawning::new(SpawningConfig::new(
                config.spawn_distance,
                config.seed ^ SPAWN_STREAM,
            )),
            movement: Movement::default(),
            autopilot: Autopilot::new(config.autopilot.clone()),
            presenter: Presenter::new(HeadlessScene::default()),
            hud: LogHud::default(),
            wallet: Wallet::default(),
            tick: config.tick(),
            max_ticks: config.max_ticks,
            ticks: 0,
        }
    }

    /// Plays the session until it ends and reports the result.
    pub(crate) fn run(mut self) -> Summary {
        let mut commands = Vec::new();
        self.bootstrap.boot(&self.world, &mut commands);
        let booted = self.execute(commands);
        let _ = self.settle(booted);

        let outcome = loop {
            if self.ticks >= self.max_ticks {
                break Outcome::TimedOut;
            }
            let events = self.step();
            if let Some(outcome) = self.outcome(&events) {
                break outcome;
            }
        };
        info!(%outcome, ticks = self.ticks, "session finished");
        self.summary(outcome)
    }

    /// Advances the session by one tick and returns every resulting event.
    pub(crate) fn step(&mut self) -> Vec<Event> {
        let mut commands = Vec::new();
        self.autopilot.plan(&self.world, self.tick, &mut commands);
        commands.push(Command::Tick { dt: self.tick });
        let mut events = self.execute(commands);

        let mut commands = Vec::new();
        self.movement.handle(
            &events,
            &query::player(&self.world),
            &query::enemy_view(&self.world),
            &query::solid_obstacles(&self.world),
            &query::pickups(&self.world),
            &mut commands,
        );
        events.extend(self.execute(commands));
        self.ticks += 1;

        let events = self.settle(events);
        self.verify_scene();
        events
    }

    fn execute(&mut self, commands: Vec<Command>) -> Vec<Event> {
        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }
        events
    }

    /// Feeds events to the reactive systems until none of them has anything to add.
    fn settle(&mut self, initial: Vec<Event>) -> Vec<Event> {
        let mut log = Vec::new();
        let mut round = initial;
        while !round.is_empty() {
            let mut commands = Vec::new();
            self.realizer.handle(&round, &mut commands);
            let placed = self.execute(commands);

            let mut commands = Vec::new();
            self.spawning.handle(
                &round,
                query::player(&self.world).position,
                &query::solid_obstacles(&self.world),
                &query::enemy_view(&self.world),
                &mut commands,
            );
            let spawned = self.execute(commands);

            let mut commands = Vec::new();
            self.bootstrap.handle(&round, &mut commands);
            let next = self.execute(commands);

            log.extend(round);
            log.extend(placed);
            log.extend(spawned);
            round = next;
        }

        self.presenter.present(&log, &mut self.hud, &mut self.wallet);
        log
    }

    fn outcome(&self, events: &[Event]) -> Option<Outcome> {
        if events
            .iter()
            .any(|event| matches!(event, Event::PlayerDefeated))
        {
            return Some(Outcome::PlayerDefeated);
        }
        if self.bootstrap.is_finished(events) {
            return Some(Outcome::Completed);
        }
        let session = query::session(&self.world);
        let starved = session.phase == LevelPhase::Active
            && session.active_enemies == 0
            && query::pending_replenishments(&self.world) == 0;
        if starved {
            warn!(level = session.level, "no enemies left to defeat");
            return Some(Outcome::Stalled {
                level: session.level,
            });
        }
        None
    }

    fn verify_scene(&self) {
        for enemy in query::enemy_view(&self.world).iter() {
            let rendered = self.presenter.locate(enemy.id);
            if rendered != Some(enemy.position) {
                warn!(
                    enemy = enemy.id.get(),
                    ?rendered,
                    actual = ?enemy.position,
                    "renderable out of sync"
                );
            }
        }
    }

    fn summary(&self, outcome: Outcome) -> Summary {
        let player = query::player(&self.world);
        Summary {
            outcome,
            ticks: self.ticks,
            elapsed: query::clock(&self.world),
            levels_cleared: self.hud.levels_cleared,
            enemies_defeated: self.hud.enemies_defeated,
            currency: self.wallet.balance,
            health: player.health,
            dimension: self.presenter.factory().dimension(),
            powers: query::absorbed_powers(&self.world).len(),
            renderables: self.presenter.factory().len(),
        }
    }
}
