//! Breadth-first policy: defer everything, then drain.

use super::{Action, DrainGoal, ExecPolicy, PolicyPhase, SchedulerView};

/// Enqueues every iteration of the loop before any of them runs, then
/// dequeues until its own tasks are drained.
///
/// Tasks enqueued by nested loops while draining land behind everything that
/// is already queued, so sibling iterations run before their children. When
/// the queue is full or the depth bound is reached the iteration is executed
/// inline instead. Uses the most queue and stack space of all policies.
#[derive(Debug, Clone)]
pub struct BreadthFirstPolicy {
    cursor: i64,
    end: i64,
    goal: DrainGoal,
}

impl BreadthFirstPolicy {
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            cursor: start,
            end,
            goal: DrainGoal::default(),
        }
    }

    fn indices_left(&self) -> bool {
        self.cursor < self.end
    }
}

impl ExecPolicy for BreadthFirstPolicy {
    fn has_next(&self, view: &SchedulerView) -> bool {
        // Leaving is only allowed once our iterations are executed, not just enqueued.
        self.indices_left() || !self.goal.is_met(view)
    }

    fn next_action(&mut self, view: &SchedulerView) -> Action {
        if !self.indices_left() {
            return Action::Dequeue;
        }
        if view.can_enqueue() {
            self.goal.raise(view);
            Action::Enqueue
        } else {
            Action::Execute
        }
    }

    fn next_iter_idx(&self) -> i64 {
        self.cursor
    }

    fn proceed(&mut self) {
        if self.indices_left() {
            self.cursor += 1;
        }
    }

    fn phase(&self, view: &SchedulerView) -> PolicyPhase {
        PolicyPhase::from_progress(self.indices_left(), self.goal.is_met(view))
    }
}
