// src/services/scheduler.rs
//
// Deferred execution on the main loop. Tasks only ever run on the thread
// that calls `advance`, so they may freely touch Rc/RefCell state.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use tracing::trace;

pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    /// Run `task` on the main queue once `delay` has passed.
    fn schedule_after(&self, delay: Duration, task: Task);
}

struct DeferredTask {
    due: Duration,
    seq: u64,
    task: Task,
}

/// Main-queue timer list, clocked by the frame loop.
#[derive(Default)]
pub struct DeferredQueue {
    now: Cell<Duration>,
    next_seq: Cell<u64>,
    tasks: RefCell<Vec<DeferredTask>>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Move the queue clock forward and run every task that is due, earliest
    /// first and in scheduling order on ties. Returns how many ran.
    pub fn advance(&self, dt: Duration) -> usize {
        self.now.set(self.now.get() + dt);
        let mut ran = 0;
        while let Some(task) = self.pop_due() {
            task();
            ran += 1;
        }
        if ran > 0 {
            trace!(ran, now = ?self.now.get(), "ran deferred tasks");
        }
        ran
    }

    // the borrow is released before the task runs so tasks can reschedule
    fn pop_due(&self) -> Option<Task> {
        let now = self.now.get();
        let mut tasks = self.tasks.borrow_mut();
        let index = tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due <= now)
            .min_by_key(|(_, task)| (task.due, task.seq))
            .map(|(index, _)| index)?;
        Some(tasks.swap_remove(index).task)
    }
}

impl Scheduler for DeferredQueue {
    fn schedule_after(&self, delay: Duration, task: Task) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.tasks.borrow_mut().push(DeferredTask {
            due: self.now.get() + delay,
            seq,
            task,
        });
    }
}
