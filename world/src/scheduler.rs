//! Deferred replenishment queue keyed by simulated time.

use std::time::Duration;

use dimension_shooter_core::LevelGeneration;

/// Replenishment task scheduled after an enemy death.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Replenishment {
    /// Level instance that was live when the task was scheduled.
    pub(crate) generation: LevelGeneration,
    /// Clock reading at which the task fires.
    pub(crate) due_at: Duration,
}

/// Queue of pending replenishment tasks.
#[derive(Debug, Default)]
pub(crate) struct Scheduler {
    pending: Vec<Replenishment>,
}

impl Scheduler {
    pub(crate) fn schedule(&mut self, task: Replenishment) {
        self.pending.push(task);
    }

    /// Removes and returns every task due at or before `now`, earliest first.
    pub(crate) fn drain_due(&mut self, now: Duration) -> Vec<Replenishment> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|task| task.due_at <= now);
        self.pending = pending;
        due.sort_by_key(|task| task.due_at);
        due
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_only_tasks_that_came_due() {
        let mut scheduler = Scheduler::default();
        let generation = LevelGeneration::new(1);
        scheduler.schedule(Replenishment {
            generation,
            due_at: Duration::from_millis(1_500),
        });
        scheduler.schedule(Replenishment {
            generation,
            due_at: Duration::from_millis(900),
        });

        let due = scheduler.drain_due(Duration::from_secs(1));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].due_at, Duration::from_millis(900));
        assert_eq!(scheduler.len(), 1);
    }
}
