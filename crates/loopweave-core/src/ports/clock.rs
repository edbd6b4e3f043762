//! Clock port - 時刻の抽象化
//!
//! seed 未指定のときは現在時刻から seed を導出する。
//! テストでは FixedClock を使って seed を固定できる。

use chrono::{DateTime, Utc};

/// Clock は現在時刻を提供
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// 時刻から導出した seed
    ///
    /// ナノ秒が表現できない範囲ではミリ秒にフォールバックする。
    fn seed(&self) -> u64 {
        let now = self.now();
        now.timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_millis()) as u64
    }
}

/// SystemClock は実時間（本番用）
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// FixedClock は固定時刻（テスト用）
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}
