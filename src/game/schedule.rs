//! Deferred, round-tagged tasks
//!
//! Delayed effects (the pause after a solving move, the level-up banner, the
//! reveal after a rewarded solve) are queued as tasks tagged with the round they
//! belong to. The session drops a task on firing if its round has been
//! superseded.

use std::time::Duration;

/// What a deferred task does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Run level completion for a round solved by a move
    CompleteLevel,
    /// Dismiss the level-up banner and deal the next word
    AdvanceWord,
    /// Skip to the next level after a rewarded solve
    RewardAdvance,
}

/// A queued task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    /// When the task falls due
    pub due: Duration,
    /// Round the task belongs to
    pub round_id: u64,
    /// Level at scheduling time
    pub level: u32,
    pub action: DeferredAction,
    seq: u64,
}

/// Pending deferred tasks, fired in due order (ties in scheduling order)
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    tasks: Vec<ScheduledTask>,
    next_seq: u64,
}

impl Schedule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire `delay` after `now`
    pub fn schedule(
        &mut self,
        now: Duration,
        delay: Duration,
        round_id: u64,
        level: u32,
        action: DeferredAction,
    ) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.push(ScheduledTask {
            due: now + delay,
            round_id,
            level,
            action,
            seq,
        });
    }

    /// Earliest due time among pending tasks
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.tasks.iter().map(|t| t.due).min()
    }

    /// Remove and return the earliest task due at or before `now`
    pub fn pop_due(&mut self, now: Duration) -> Option<ScheduledTask> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;
        Some(self.tasks.swap_remove(index))
    }

    /// Drop every pending task
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
