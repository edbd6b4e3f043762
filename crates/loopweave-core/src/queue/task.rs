//! Deferred iteration.

use std::fmt;
use std::rc::Rc;

use crate::error::ScheduleError;
use crate::scheduler::Scheduler;

/// A loop body shared by every iteration of one loop invocation.
///
/// The body receives the scheduler so nested loops can be started from inside
/// it. It is `'static`: anything it touches must be captured by value or by an
/// owned handle such as `Rc<RefCell<_>>`, since a deferred task may run after
/// the code that created the loop has moved on.
pub type LoopBody = Rc<dyn Fn(&mut Scheduler, i64) -> Result<(), ScheduleError>>;

/// One iteration waiting in the queue (body + index).
pub struct Task {
    body: LoopBody,
    index: i64,
}

impl Task {
    pub fn new(body: LoopBody, index: i64) -> Self {
        Self { body, index }
    }

    pub fn index(&self) -> i64 {
        self.index
    }

    /// Run the iteration. Consumes the task: each task runs at most once.
    pub fn run(self, scheduler: &mut Scheduler) -> Result<(), ScheduleError> {
        (self.body)(scheduler, self.index)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").field("index", &self.index).finish_non_exhaustive()
    }
}
