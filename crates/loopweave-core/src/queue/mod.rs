//! Queue module: bounded FIFO of deferred iterations.
//!
//! Design:
//! - `total_dequeues` is monotonic and never reset. Policies derive their
//!   liveness goal from it, so it must only ever grow.
//! - Overflow and underflow are reported as errors, never silently ignored.

mod task;

pub use task::{LoopBody, Task};

use std::collections::VecDeque;

use crate::error::ScheduleError;
use crate::observability::QueueStats;

/// Bounded FIFO task queue.
#[derive(Debug)]
pub struct TaskQueue {
    tasks: VecDeque<Task>,
    capacity: usize,
    total_enqueues: u64,
    total_dequeues: u64,
}

impl TaskQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            tasks: VecDeque::new(),
            capacity,
            total_enqueues: 0,
            total_dequeues: 0,
        }
    }

    /// Append a task to the tail.
    pub fn enqueue(&mut self, task: Task) -> Result<(), ScheduleError> {
        if self.is_full() {
            return Err(ScheduleError::QueueFull {
                capacity: self.capacity,
            });
        }
        self.tasks.push_back(task);
        self.total_enqueues += 1;
        Ok(())
    }

    /// Remove and return the head. Counts toward `total_dequeues` only on success.
    pub fn dequeue(&mut self) -> Result<Task, ScheduleError> {
        let task = self.tasks.pop_front().ok_or(ScheduleError::QueueEmpty)?;
        self.total_dequeues += 1;
        Ok(task)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tasks.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn total_enqueues(&self) -> u64 {
        self.total_enqueues
    }

    pub fn total_dequeues(&self) -> u64 {
        self.total_dequeues
    }

    pub fn stats(&self) -> QueueStats {
        QueueStats {
            queued: self.len(),
            capacity: self.capacity,
            total_enqueues: self.total_enqueues,
            total_dequeues: self.total_dequeues,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::scheduler::Scheduler;

    fn noop_task(index: i64) -> Task {
        let body = |_: &mut Scheduler, _: i64| -> Result<(), ScheduleError> { Ok(()) };
        Task::new(Rc::new(body), index)
    }

    #[test]
    fn dequeue_is_fifo() {
        let mut queue = TaskQueue::new(4);
        queue.enqueue(noop_task(7)).unwrap();
        queue.enqueue(noop_task(3)).unwrap();
        queue.enqueue(noop_task(5)).unwrap();

        let order: Vec<i64> = (0..3).map(|_| queue.dequeue().unwrap().index()).collect();
        assert_eq!(order, vec![7, 3, 5]);
        assert!(queue.is_empty());
    }

    #[test]
    fn enqueue_beyond_capacity_fails() {
        let mut queue = TaskQueue::new(2);
        queue.enqueue(noop_task(0)).unwrap();
        queue.enqueue(noop_task(1)).unwrap();
        assert!(queue.is_full());

        let err = queue.enqueue(noop_task(2)).unwrap_err();
        assert_eq!(err, ScheduleError::QueueFull { capacity: 2 });
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.total_enqueues(), 2);
    }

    #[test]
    fn zero_capacity_queue_is_always_full() {
        let mut queue = TaskQueue::new(0);
        assert!(queue.is_full());
        assert!(queue.enqueue(noop_task(0)).is_err());
    }

    #[test]
    fn dequeue_from_empty_fails_without_counting() {
        let mut queue = TaskQueue::new(1);
        assert_eq!(queue.dequeue().unwrap_err(), ScheduleError::QueueEmpty);
        assert_eq!(queue.total_dequeues(), 0);
    }

    #[test]
    fn dequeue_counter_is_monotonic() {
        let mut queue = TaskQueue::new(1);
        for i in 0..5 {
            queue.enqueue(noop_task(i)).unwrap();
            queue.dequeue().unwrap();
            assert_eq!(queue.total_dequeues(), (i + 1) as u64);
        }

        let stats = queue.stats();
        assert_eq!(stats.total_enqueues, 5);
        assert_eq!(stats.total_dequeues, 5);
        assert_eq!(stats.outstanding(), 0);
        assert_eq!(stats.queued, 0);
    }
}
