//! loopweave-core
//!
//! Core building blocks for running independent loop iterations under
//! alternate execution orders.
//!
//! # モジュール構成
//! - **queue**: 遅延された iteration を保持する有界 FIFO（TaskQueue, Task）
//! - **policy**: 実行ポリシー（DepthFirst, BreadthFirst, Random）
//! - **scheduler**: ポリシーを駆動するループドライバ（Scheduler::run_loop）
//! - **config**: キュー容量・最大深さ・ポリシー選択・seed
//! - **ports**: 時刻の抽象化（seed の導出に使う）
//! - **observability**: キュー統計（QueueStats）
//! - **error**: エラー型

pub mod config;
pub mod error;
pub mod observability;
pub mod policy;
pub mod ports;
pub mod queue;
pub mod scheduler;

pub use config::{PolicyKind, SchedulerConfig};
pub use error::{ConfigError, ScheduleError};
pub use observability::QueueStats;
pub use policy::{Action, ExecPolicy, Policy, PolicyPhase, SchedulerView};
pub use queue::{LoopBody, Task, TaskQueue};
pub use scheduler::Scheduler;
