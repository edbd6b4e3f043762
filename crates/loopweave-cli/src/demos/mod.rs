//! Demo programs built on `Scheduler::run_loop`.

pub mod nested;
pub mod quicksort;
