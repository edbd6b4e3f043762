//! Ports - 外部依存の抽象化
//!
//! 今のところ時刻のみ。seed が指定されなかったときの導出に使う。

pub mod clock;

pub use self::clock::{Clock, FixedClock, SystemClock};
