//! # Clock（時刻プロバイダ）
//!
//! 予約の作成日時・更新日時に使う現在時刻を抽象化する。
//! ユースケースは `Utc::now()` を直接呼ばず、このトレイト経由で時刻を得る。

use chrono::{DateTime, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;
}

/// システム時刻を返す実装
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 常に同じ時刻を返す実装（テスト用）
pub struct FixedClock {
   now: DateTime<Utc>,
}

impl FixedClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self { now }
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      self.now
   }
}

#[cfg(test)]
mod tests {
   use chrono::TimeZone;

   use super::*;

   #[test]
   fn test_system_clockは呼び出し前後の時刻の間を返す() {
      let before = Utc::now();
      let result = SystemClock.now();
      let after = Utc::now();

      assert!(before <= result && result <= after);
   }

   #[test]
   fn test_fixed_clockは何度呼んでも同じ時刻を返す() {
      let fixed = Utc.with_ymd_and_hms(2024, 12, 21, 9, 0, 0).unwrap();
      let clock = FixedClock::new(fixed);

      assert_eq!(clock.now(), fixed);
      assert_eq!(clock.now(), fixed);
   }
}
