//! Random policy: arbitrary but reproducible interleavings.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{Action, DrainGoal, ExecPolicy, PolicyPhase, SchedulerView};

/// Shuffles the range once, then at every step picks uniformly among the
/// actions that are currently possible.
///
/// - `Execute` is always possible.
/// - `Enqueue` needs spare capacity and headroom below the depth bound.
/// - `Dequeue` needs a non-empty queue.
///
/// Once every index is introduced it keeps dequeuing until its own tasks are
/// drained, same as the breadth-first policy. The generator is owned by the
/// instance, so a fixed seed gives a fixed trace.
#[derive(Debug)]
pub struct RandomPolicy {
    /// Unconsumed suffix of the permutation; the next index is at the back.
    remaining: Vec<i64>,
    goal: DrainGoal,
    consumes_index: bool,
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(start: i64, end: i64, mut rng: StdRng) -> Self {
        let mut remaining: Vec<i64> = (start..end).collect();
        remaining.shuffle(&mut rng);
        Self {
            remaining,
            goal: DrainGoal::default(),
            consumes_index: false,
            rng,
        }
    }

    /// Indices not yet executed or enqueued, in the order they will be used.
    pub fn remaining(&self) -> impl Iterator<Item = i64> + '_ {
        self.remaining.iter().rev().copied()
    }
}

impl ExecPolicy for RandomPolicy {
    fn has_next(&self, view: &SchedulerView) -> bool {
        !self.remaining.is_empty() || !self.goal.is_met(view)
    }

    fn next_action(&mut self, view: &SchedulerView) -> Action {
        if !self.remaining.is_empty() {
            let can_enqueue = view.can_enqueue();
            let can_dequeue = view.can_dequeue();
            let choices = 1 + usize::from(can_enqueue) + usize::from(can_dequeue);

            let action = match self.rng.gen_range(0..choices) {
                0 => Action::Execute,
                1 if can_enqueue => Action::Enqueue,
                _ => Action::Dequeue,
            };
            if action == Action::Enqueue {
                self.goal.raise(view);
            }
            self.consumes_index = action != Action::Dequeue;
            return action;
        }

        self.consumes_index = false;
        Action::Dequeue
    }

    fn next_iter_idx(&self) -> i64 {
        // Only meaningful for Execute/Enqueue, which require a remaining index.
        self.remaining.last().copied().unwrap_or_default()
    }

    fn proceed(&mut self) {
        if self.consumes_index {
            self.remaining.pop();
        }
    }

    fn phase(&self, view: &SchedulerView) -> PolicyPhase {
        PolicyPhase::from_progress(!self.remaining.is_empty(), self.goal.is_met(view))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::policy::tests::view;

    #[test]
    fn permutation_covers_the_range() {
        let policy = RandomPolicy::new(-2, 6, StdRng::seed_from_u64(7));
        let mut seen: Vec<i64> = policy.remaining().collect();
        seen.sort_unstable();
        assert_eq!(seen, (-2..6).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_permutation() {
        let a = RandomPolicy::new(0, 16, StdRng::seed_from_u64(42));
        let b = RandomPolicy::new(0, 16, StdRng::seed_from_u64(42));
        assert_eq!(a.remaining().collect::<Vec<_>>(), b.remaining().collect::<Vec<_>>());
    }

    #[test]
    fn only_execute_when_nothing_else_is_available() {
        let mut policy = RandomPolicy::new(0, 20, StdRng::seed_from_u64(1));
        let blocked = SchedulerView {
            queue_len: 0,
            queue_capacity: 0,
            ..view(0, 0)
        };
        let mut seen = Vec::new();
        while policy.has_next(&blocked) {
            assert_eq!(policy.next_action(&blocked), Action::Execute);
            seen.push(policy.next_iter_idx());
            policy.proceed();
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn dequeue_does_not_consume_an_index() {
        let mut policy = RandomPolicy::new(0, 1, StdRng::seed_from_u64(3));
        // Queue full: Execute or Dequeue only.
        let full = SchedulerView {
            queue_len: 8,
            ..view(0, 0)
        };
        loop {
            match policy.next_action(&full) {
                Action::Dequeue => {
                    policy.proceed();
                    assert_eq!(policy.remaining().count(), 1);
                }
                Action::Execute => {
                    policy.proceed();
                    break;
                }
                Action::Enqueue => panic!("enqueue chosen while the queue is full"),
            }
        }
        assert_eq!(policy.remaining().count(), 0);
    }

    #[test]
    fn drains_own_enqueues_before_done() {
        let mut policy = RandomPolicy::new(0, 1, StdRng::seed_from_u64(9));
        // Empty queue, room to enqueue: Execute or Enqueue.
        let mut v = view(0, 0);
        let action = policy.next_action(&v);
        policy.proceed();
        if action == Action::Enqueue {
            v.queue_len = 1;
            assert_eq!(policy.phase(&v), PolicyPhase::Draining);
            assert_eq!(policy.next_action(&v), Action::Dequeue);
            policy.proceed();
            v.queue_len = 0;
            v.total_dequeues = 1;
        } else {
            assert_eq!(action, Action::Execute);
        }
        assert!(!policy.has_next(&v));
        assert_eq!(policy.phase(&v), PolicyPhase::Done);
    }
}
