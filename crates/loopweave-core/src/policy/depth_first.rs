//! Depth-first policy: the sequential baseline.

use super::{Action, ExecPolicy, PolicyPhase, SchedulerView};

/// Executes `[start, end)` in increasing order and never touches the queue.
///
/// Uses the least queue and stack space of all policies.
#[derive(Debug, Clone)]
pub struct DepthFirstPolicy {
    cursor: i64,
    end: i64,
}

impl DepthFirstPolicy {
    pub fn new(start: i64, end: i64) -> Self {
        Self { cursor: start, end }
    }
}

impl ExecPolicy for DepthFirstPolicy {
    fn has_next(&self, _view: &SchedulerView) -> bool {
        self.cursor < self.end
    }

    fn next_action(&mut self, _view: &SchedulerView) -> Action {
        Action::Execute
    }

    fn next_iter_idx(&self) -> i64 {
        self.cursor
    }

    fn proceed(&mut self) {
        self.cursor += 1;
    }

    fn phase(&self, _view: &SchedulerView) -> PolicyPhase {
        PolicyPhase::from_progress(self.cursor < self.end, true)
    }
}
