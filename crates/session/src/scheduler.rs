//! Virtual-time task scheduler
//!
//! Clock ticks and delayed automated moves are queued here instead of on
//! real timers. Time only moves when the owner calls [`Scheduler::pop_due`]
//! or [`Scheduler::advance_to`], so a test can fast-forward ten minutes of
//! play in microseconds.
//!
//! Every entry remembers the epoch it was scheduled under. [`Scheduler::cancel_all`]
//! bumps the epoch, which retires everything queued before it: a callback
//! from an earlier session can never fire into a later one.

use std::time::Duration;

/// Work the session can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    ClockTick,
    AutomatedMove,
}

#[derive(Debug, Clone)]
struct Entry {
    due: Duration,
    seq: u64,
    task: Task,
    period: Option<Duration>,
    epoch: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: Duration,
    epoch: u64,
    next_seq: u64,
    queue: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Run `task` once, `delay` from now.
    pub fn schedule(&mut self, delay: Duration, task: Task) {
        self.push(self.now.saturating_add(delay), task, None);
    }

    /// Run `task` every `period`, first firing one period from now.
    pub fn schedule_repeating(&mut self, period: Duration, task: Task) {
        self.push(self.now.saturating_add(period), task, Some(period));
    }

    fn push(&mut self, due: Duration, task: Task, period: Option<Duration>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry {
            due,
            seq,
            task,
            period,
            epoch: self.epoch,
        });
    }

    /// Retire every queued task, repeating ones included.
    pub fn cancel_all(&mut self) {
        self.epoch += 1;
        let epoch = self.epoch;
        self.queue.retain(|e| e.epoch == epoch);
    }

    /// Drop pending occurrences of one kind of task.
    pub fn cancel(&mut self, task: Task) {
        self.queue.retain(|e| e.task != task);
    }

    pub fn is_pending(&self, task: Task) -> bool {
        self.live().any(|e| e.task == task)
    }

    pub fn pending_count(&self) -> usize {
        self.live().count()
    }

    /// Time from now until the next live task is due.
    pub fn next_due(&self) -> Option<Duration> {
        self.live()
            .map(|e| e.due.saturating_sub(self.now))
            .min()
    }

    /// Pops the earliest task due at or before `until`, moving the clock to
    /// its due time. Ties fire in the order they were scheduled. Repeating
    /// tasks are queued again one period later.
    pub fn pop_due(&mut self, until: Duration) -> Option<Task> {
        let epoch = self.epoch;
        let idx = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, e)| e.epoch == epoch && e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(i, _)| i)?;

        let entry = self.queue.swap_remove(idx);
        if entry.due > self.now {
            self.now = entry.due;
        }
        if let Some(period) = entry.period {
            self.push(entry.due.saturating_add(period), entry.task, Some(period));
        }
        Some(entry.task)
    }

    /// Moves virtual time forward without firing anything.
    pub fn advance_to(&mut self, t: Duration) {
        if t > self.now {
            self.now = t;
        }
    }

    fn live(&self) -> impl Iterator<Item = &Entry> {
        let epoch = self.epoch;
        self.queue.iter().filter(move |e| e.epoch == epoch)
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod scheduler_tests;
