//! One-shot deferred tasks.
//!
//! Modal and notification dismissal and the checkout redirect all run after
//! a fixed delay. Every scheduled task can be cancelled through its
//! [`TaskId`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Work to run once when its delay elapses.
pub type Task = Box<dyn FnOnce()>;

/// Identifies a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Runs tasks after a delay.
pub trait Scheduler {
    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: Task) -> TaskId;

    /// Cancel a task that has not run yet. Returns `false` if it already ran
    /// or was never scheduled.
    fn cancel(&self, id: TaskId) -> bool;
}

struct Pending {
    id: TaskId,
    due: Duration,
    task: Task,
}

/// Scheduler driven by an explicit clock.
///
/// Nothing runs until [`ManualScheduler::advance`] is called. Tasks run in
/// deadline order; tasks with the same deadline run in the order they were
/// scheduled. Used on hosts without a browser event loop and in tests.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    pending: RefCell<Vec<Pending>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Move the clock forward by `by`, running every task that falls due.
    ///
    /// Tasks scheduled by a running task also run if they fall due within
    /// the same window. Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get() + by;
        let mut ran = 0;

        while let Some(next) = self.take_due(target) {
            self.now.set(next.due);
            tracing::trace!(task = next.id.as_u64(), "running scheduled task");
            (next.task)();
            ran += 1;
        }

        self.now.set(target);
        ran
    }

    fn take_due(&self, target: Duration) -> Option<Pending> {
        let mut pending = self.pending.borrow_mut();
        let index = pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(i, _)| i)?;
        Some(pending.remove(index))
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskId {
        let id = TaskId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.pending.borrow_mut().push(Pending {
            id,
            due: self.now.get() + delay,
            task,
        });
        id
    }

    fn cancel(&self, id: TaskId) -> bool {
        let mut pending = self.pending.borrow_mut();
        let len_before = pending.len();
        pending.retain(|p| p.id != id);
        pending.len() < len_before
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("now", &self.now.get())
            .field("pending", &self.pending())
            .finish()
    }
}

/// Host timer handles for tasks that have not run yet.
///
/// Host schedulers arm a timer per task and disarm it when the task runs,
/// so cancelling a task that already ran finds nothing.
#[derive(Debug)]
pub struct TimerHandles<H> {
    next_id: Cell<u64>,
    live: RefCell<HashMap<TaskId, H>>,
}

impl<H> Default for TimerHandles<H> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            live: RefCell::new(HashMap::new()),
        }
    }
}

impl<H> TimerHandles<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the id for a new task.
    pub fn next_id(&self) -> TaskId {
        let id = TaskId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        id
    }

    /// Record the host timer backing `id`.
    pub fn arm(&self, id: TaskId, handle: H) {
        self.live.borrow_mut().insert(id, handle);
    }

    /// Take the timer backing `id`, if it has not fired or been cancelled.
    pub fn disarm(&self, id: TaskId) -> Option<H> {
        self.live.borrow_mut().remove(&id)
    }

    /// Number of timers still pending.
    pub fn len(&self) -> usize {
        self.live.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.borrow().is_empty()
    }
}
