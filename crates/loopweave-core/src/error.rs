use thiserror::Error;

/// Invariant violations raised by the queue or the loop driver.
///
/// None of these are recoverable: they indicate a misconfigured capacity or a
/// broken policy. Once one is returned the `Scheduler` must be discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("task queue is full (capacity={capacity})")]
    QueueFull { capacity: usize },

    #[error("dequeue from an empty task queue")]
    QueueEmpty,

    #[error("task depth mismatch after loop step: expected={expected} actual={actual}")]
    DepthMismatch { expected: usize, actual: usize },
}

/// Errors from building a `SchedulerConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown policy: {0} (expected depth-first, breadth-first or random)")]
    UnknownPolicy(String),

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}
