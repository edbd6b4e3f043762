//! Scheduler - ループドライバ
//!
//! 1 回のループ呼び出しについてポリシーを最後まで駆動する。
//! キューと task depth はここが所有し、ループ本体には `&mut Scheduler` として渡す
//! （プロセス全体の global state は持たない）。
//!
//! # 不変条件
//! - 各 index の本体はちょうど 1 回実行される
//! - `run_loop` から戻るとき、そのループが enqueue したタスクはすべて実行済み
//! - 各ステップの後、depth は呼び出し開始時の値に戻っている

use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use crate::config::{PolicyKind, SchedulerConfig};
use crate::error::ScheduleError;
use crate::observability::QueueStats;
use crate::policy::{Action, ExecPolicy, Policy, SchedulerView};
use crate::ports::{Clock, SystemClock};
use crate::queue::{LoopBody, Task, TaskQueue};

/// Owns the task queue and the task depth counter shared by every nested
/// loop invocation of one run.
///
/// # 使用例
/// ```
/// use loopweave_core::{PolicyKind, ScheduleError, Scheduler, SchedulerConfig};
///
/// fn main() -> Result<(), ScheduleError> {
///     let config = SchedulerConfig::new(PolicyKind::Random).with_seed(42);
///     let mut scheduler = Scheduler::new(config);
///     scheduler.run_loop(0, 4, |s, i| {
///         s.run_loop(0, 2, move |_, j| {
///             println!("{i}{j}");
///             Ok(())
///         })
///     })?;
///
///     assert_eq!(scheduler.depth(), 0);
///     assert!(scheduler.queue().is_empty());
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Scheduler {
    config: SchedulerConfig,
    queue: TaskQueue,
    depth: usize,
    seed: u64,
    rng: StdRng,
}

impl Scheduler {
    /// Missing seeds are derived from the system clock.
    pub fn new(config: SchedulerConfig) -> Self {
        Self::with_clock(config, &SystemClock)
    }

    pub fn with_clock<C: Clock>(config: SchedulerConfig, clock: &C) -> Self {
        let seed = config.seed.unwrap_or_else(|| clock.seed());
        Self {
            queue: TaskQueue::new(config.queue_capacity),
            depth: 0,
            seed,
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    /// Run `body` once for every index in `[start, end)` with the configured
    /// policy. A reversed range is empty.
    pub fn run_loop<F>(&mut self, start: i64, end: i64, body: F) -> Result<(), ScheduleError>
    where
        F: Fn(&mut Scheduler, i64) -> Result<(), ScheduleError> + 'static,
    {
        self.run_loop_with(self.config.policy, start, end, body)
    }

    /// Same as `run_loop`, overriding the policy for this invocation only.
    pub fn run_loop_with<F>(
        &mut self,
        kind: PolicyKind,
        start: i64,
        end: i64,
        body: F,
    ) -> Result<(), ScheduleError>
    where
        F: Fn(&mut Scheduler, i64) -> Result<(), ScheduleError> + 'static,
    {
        let body: LoopBody = Rc::new(body);
        let mut policy = Policy::new(kind, start, end, &mut self.rng);
        let entry_depth = self.depth;
        debug!(policy = %policy.kind(), start, end, depth = entry_depth, "loop started");

        loop {
            let view = self.view();
            if !policy.has_next(&view) {
                break;
            }

            let phase = policy.phase(&view);
            let action = policy.next_action(&view);
            match action {
                Action::Enqueue => {
                    let index = policy.next_iter_idx();
                    trace!(?phase, ?action, index, queued = view.queue_len, "step");
                    self.queue.enqueue(Task::new(Rc::clone(&body), index))?;
                }
                Action::Dequeue => {
                    let task = self.queue.dequeue()?;
                    trace!(?phase, ?action, index = task.index(), depth = self.depth, "step");
                    self.run_task(task)?;
                }
                Action::Execute => {
                    let index = policy.next_iter_idx();
                    trace!(?phase, ?action, index, depth = self.depth, "step");
                    self.run_task(Task::new(Rc::clone(&body), index))?;
                }
            }
            policy.proceed();

            if self.depth != entry_depth {
                return Err(ScheduleError::DepthMismatch {
                    expected: entry_depth,
                    actual: self.depth,
                });
            }
        }

        debug!(
            policy = %policy.kind(),
            phase = ?policy.phase(&self.view()),
            start,
            end,
            depth = entry_depth,
            "loop finished"
        );
        Ok(())
    }

    /// Depth goes back down even when the body fails, so the caller sees the
    /// body's error rather than a depth mismatch.
    fn run_task(&mut self, task: Task) -> Result<(), ScheduleError> {
        self.depth += 1;
        let result = task.run(self);
        self.depth -= 1;
        result
    }

    fn view(&self) -> SchedulerView {
        SchedulerView {
            queue_len: self.queue.len(),
            queue_capacity: self.queue.capacity(),
            total_dequeues: self.queue.total_dequeues(),
            depth: self.depth,
            max_depth: self.config.max_task_depth,
        }
    }

    /// Number of task bodies currently executing on the call stack.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn queue(&self) -> &TaskQueue {
        &self.queue
    }

    pub fn stats(&self) -> QueueStats {
        self.queue.stats()
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Seed actually used, whether configured or derived from the clock.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}
