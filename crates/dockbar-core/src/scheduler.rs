//! Deferred work for a bar: a monotonic clock and cancellable one-shot tasks.
//!
//! Tasks carry no payload. When one fires, the bar re-reads its own
//! state to decide what to do, so a task scheduled against stale state
//! never acts on it.

use std::cell::Cell;
use std::time::Instant;

/// Source of monotonic milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall-clock implementation backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// A clock that only moves when told to. Used to step time in tests
/// and in replay tooling.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Kinds of deferred bar work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Re-run the geometry resolver after a short delay.
    DelayedPosition,
    /// Re-apply the last rectangle assigned by the docking authority.
    CorrectivePosition,
    /// End of a peek; retract if hiding is allowed again.
    PeekExpiry,
}

/// Identifies one scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone, Copy)]
struct Pending {
    handle: TaskHandle,
    task: Task,
    due: u64,
}

/// One-shot task queue.
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `task` to fire `delay_ms` after `now`.
    pub fn schedule(&mut self, task: Task, now: u64, delay_ms: u64) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        self.pending.push(Pending {
            handle,
            task,
            due: now + delay_ms,
        });
        handle
    }

    /// Cancels every pending task of the same kind, then schedules it anew.
    pub fn replace(&mut self, task: Task, now: u64, delay_ms: u64) -> TaskHandle {
        self.cancel_all(task);
        self.schedule(task, now, delay_ms)
    }

    /// Cancels one task. Returns whether it was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    /// Cancels every pending task of a kind. Returns how many were dropped.
    pub fn cancel_all(&mut self, task: Task) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| p.task != task);
        before - self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    pub fn has_pending(&self, task: Task) -> bool {
        self.pending.iter().any(|p| p.task == task)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest due time among pending tasks.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Removes and returns every task due at or before `now`, earliest
    /// first; ties keep scheduling order.
    pub fn take_due(&mut self, now: u64) -> Vec<(TaskHandle, Task)> {
        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due <= now {
                due.push(*p);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|p| (p.due, p.handle.0));
        due.into_iter().map(|p| (p.handle, p.task)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_fire_in_deadline_order() {
        // Arrange
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Task::PeekExpiry, 0, 300);
        scheduler.schedule(Task::DelayedPosition, 0, 100);
        scheduler.schedule(Task::CorrectivePosition, 0, 100);

        // Act
        let early = scheduler.take_due(99);
        let due = scheduler.take_due(300);

        // Assert
        assert!(early.is_empty());
        let tasks: Vec<Task> = due.into_iter().map(|(_, t)| t).collect();
        assert_eq!(
            tasks,
            vec![
                Task::DelayedPosition,
                Task::CorrectivePosition,
                Task::PeekExpiry
            ]
        );
        assert!(scheduler.is_empty());
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(Task::PeekExpiry, 0, 100);

        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert!(scheduler.take_due(1000).is_empty());
    }

    #[test]
    fn replace_keeps_a_single_task_of_a_kind() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Task::DelayedPosition, 0, 100);

        let handle = scheduler.replace(Task::DelayedPosition, 50, 100);

        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.next_deadline(), Some(150));
        assert_eq!(
            scheduler.take_due(150),
            vec![(handle, Task::DelayedPosition)]
        );
    }

    #[test]
    fn manual_clock_steps() {
        let clock = ManualClock::new(10);
        clock.advance(5);
        assert_eq!(clock.now_ms(), 15);
        clock.set(100);
        assert_eq!(clock.now_ms(), 100);
    }
}
