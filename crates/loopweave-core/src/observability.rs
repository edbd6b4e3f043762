use serde::{Deserialize, Serialize};

/// Snapshot of the task queue counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub queued: usize,
    pub capacity: usize,
    pub total_enqueues: u64,
    pub total_dequeues: u64,
}

impl QueueStats {
    /// Tasks that were enqueued but not yet dequeued.
    pub fn outstanding(&self) -> u64 {
        self.total_enqueues - self.total_dequeues
    }
}
