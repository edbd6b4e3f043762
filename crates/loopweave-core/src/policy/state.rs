//! Policy lifecycle.

/// Where a policy instance is in its lifecycle.
///
/// State transitions:
/// - BreadthFirst / Random: Filling -> Draining -> Done
/// - DepthFirst: Filling -> Done (never enqueues, so never drains)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyPhase {
    /// Some of this invocation's indices have not been executed or enqueued yet.
    Filling,

    /// Every index was introduced; waiting for self-enqueued tasks to drain.
    Draining,

    /// Nothing left to signal.
    Done,
}

impl PolicyPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, PolicyPhase::Done)
    }

    pub(crate) fn from_progress(indices_left: bool, drained: bool) -> Self {
        if indices_left {
            PolicyPhase::Filling
        } else if !drained {
            PolicyPhase::Draining
        } else {
            PolicyPhase::Done
        }
    }
}
