//! Execution policies: decide, step by step, whether an iteration runs now,
//! is deferred into the queue, or a deferred task is drained instead.
//!
//! The driver consults a policy in a fixed protocol:
//! `has_next` -> `next_action` -> (perform) -> `proceed`.
//!
//! The set of policies is closed (`Policy` enum). Each variant implements
//! `ExecPolicy` on its own and the enum delegates by `match`.

mod breadth_first;
mod depth_first;
mod random;
mod state;

pub use breadth_first::BreadthFirstPolicy;
pub use depth_first::DepthFirstPolicy;
pub use random::RandomPolicy;
pub use state::PolicyPhase;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::PolicyKind;

/// What the driver does in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Run the iteration `next_iter_idx()` inline.
    Execute,
    /// Defer the iteration `next_iter_idx()` into the queue.
    Enqueue,
    /// Pop the queue head and run it.
    Dequeue,
}

/// Read-only snapshot of the scheduler state a policy is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerView {
    pub queue_len: usize,
    pub queue_capacity: usize,
    pub total_dequeues: u64,
    pub depth: usize,
    pub max_depth: usize,
}

impl SchedulerView {
    /// Enqueue needs spare capacity and headroom below the depth bound.
    pub fn can_enqueue(&self) -> bool {
        self.queue_len < self.queue_capacity && self.depth < self.max_depth
    }

    pub fn can_dequeue(&self) -> bool {
        self.queue_len > 0
    }

    /// Dequeue count at which a task enqueued right now will have been drained.
    ///
    /// The queue is FIFO, so the new task comes out only after everything
    /// already queued.
    pub fn drain_goal(&self) -> u64 {
        self.total_dequeues + self.queue_len as u64 + 1
    }
}

/// The four-operation protocol consulted by the loop driver.
pub trait ExecPolicy {
    /// More work to signal for this invocation (indices left, or own tasks
    /// still sitting in the queue).
    fn has_next(&self, view: &SchedulerView) -> bool;

    /// Decide the next step. Does not move the cursor.
    fn next_action(&mut self, view: &SchedulerView) -> Action;

    /// Index for the `Execute` / `Enqueue` just chosen.
    fn next_iter_idx(&self) -> i64;

    /// Advance after the driver performed the chosen action.
    fn proceed(&mut self);

    fn phase(&self, view: &SchedulerView) -> PolicyPhase;
}

/// Tracks the dequeue count this invocation must wait for.
///
/// `0` means nothing was enqueued yet, which is trivially satisfied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DrainGoal {
    goal_dequeues: u64,
}

impl DrainGoal {
    fn raise(&mut self, view: &SchedulerView) {
        self.goal_dequeues = view.drain_goal();
    }

    fn is_met(&self, view: &SchedulerView) -> bool {
        view.total_dequeues >= self.goal_dequeues
    }
}

/// Per-invocation policy instance.
#[derive(Debug)]
pub enum Policy {
    DepthFirst(DepthFirstPolicy),
    BreadthFirst(BreadthFirstPolicy),
    Random(RandomPolicy),
}

impl Policy {
    /// Build the policy for one loop invocation over `[start, end)`.
    ///
    /// The random policy gets its own generator, seeded from `rng`; the other
    /// policies leave `rng` untouched.
    pub fn new(kind: PolicyKind, start: i64, end: i64, rng: &mut StdRng) -> Self {
        match kind {
            PolicyKind::DepthFirst => Policy::DepthFirst(DepthFirstPolicy::new(start, end)),
            PolicyKind::BreadthFirst => {
                Policy::BreadthFirst(BreadthFirstPolicy::new(start, end))
            }
            PolicyKind::Random => {
                Policy::Random(RandomPolicy::new(start, end, StdRng::seed_from_u64(rng.r#gen())))
            }
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            Policy::DepthFirst(_) => PolicyKind::DepthFirst,
            Policy::BreadthFirst(_) => PolicyKind::BreadthFirst,
            Policy::Random(_) => PolicyKind::Random,
        }
    }
}

impl ExecPolicy for Policy {
    fn has_next(&self, view: &SchedulerView) -> bool {
        match self {
            Policy::DepthFirst(p) => p.has_next(view),
            Policy::BreadthFirst(p) => p.has_next(view),
            Policy::Random(p) => p.has_next(view),
        }
    }

    fn next_action(&mut self, view: &SchedulerView) -> Action {
        match self {
            Policy::DepthFirst(p) => p.next_action(view),
            Policy::BreadthFirst(p) => p.next_action(view),
            Policy::Random(p) => p.next_action(view),
        }
    }

    fn next_iter_idx(&self) -> i64 {
        match self {
            Policy::DepthFirst(p) => p.next_iter_idx(),
            Policy::BreadthFirst(p) => p.next_iter_idx(),
            Policy::Random(p) => p.next_iter_idx(),
        }
    }

    fn proceed(&mut self) {
        match self {
            Policy::DepthFirst(p) => p.proceed(),
            Policy::BreadthFirst(p) => p.proceed(),
            Policy::Random(p) => p.proceed(),
        }
    }

    fn phase(&self, view: &SchedulerView) -> PolicyPhase {
        match self {
            Policy::DepthFirst(p) => p.phase(view),
            Policy::BreadthFirst(p) => p.phase(view),
            Policy::Random(p) => p.phase(view),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn view(queue_len: usize, total_dequeues: u64) -> SchedulerView {
        SchedulerView {
            queue_len,
            queue_capacity: 8,
            total_dequeues,
            depth: 0,
            max_depth: 4,
        }
    }

    #[test]
    fn drain_goal_counts_everything_ahead_in_the_queue() {
        assert_eq!(view(0, 0).drain_goal(), 1);
        assert_eq!(view(3, 10).drain_goal(), 14);
    }

    #[test]
    fn enqueue_blocked_by_capacity_or_depth() {
        let full = SchedulerView {
            queue_len: 8,
            ..view(0, 0)
        };
        let deep = SchedulerView {
            depth: 4,
            ..view(0, 0)
        };
        assert!(view(0, 0).can_enqueue());
        assert!(!full.can_enqueue());
        assert!(!deep.can_enqueue());
        assert!(!view(0, 0).can_dequeue());
        assert!(full.can_dequeue());
    }

    #[test]
    fn policy_reports_the_kind_it_was_built_with() {
        let mut rng = StdRng::seed_from_u64(0);
        for kind in PolicyKind::ALL {
            assert_eq!(Policy::new(kind, 0, 3, &mut rng).kind(), kind);
        }
    }

    #[test]
    fn policy_phase_follows_filling_draining_done() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut policy = Policy::new(PolicyKind::BreadthFirst, 0, 1, &mut rng);
        let mut v = view(0, 0);
        assert_eq!(policy.phase(&v), PolicyPhase::Filling);

        assert_eq!(policy.next_action(&v), Action::Enqueue);
        policy.proceed();
        v.queue_len = 1;
        assert_eq!(policy.phase(&v), PolicyPhase::Draining);

        assert_eq!(policy.next_action(&v), Action::Dequeue);
        policy.proceed();
        v.queue_len = 0;
        v.total_dequeues = 1;
        assert_eq!(policy.phase(&v), PolicyPhase::Done);
        assert!(!policy.has_next(&v));

        let df = Policy::new(PolicyKind::DepthFirst, 0, 0, &mut rng);
        assert!(df.phase(&v).is_terminal());
    }

    #[test]
    fn unset_drain_goal_is_met() {
        let goal = DrainGoal::default();
        assert!(goal.is_met(&view(5, 0)));
    }
}
