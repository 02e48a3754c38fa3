// ==========================================
// Mandi 供应链智能引擎 - 时钟抽象
// ==========================================
// 职责: 提供"当前时刻",所有引擎通过注入获取
// 红线: 引擎内禁止直接读取系统时间
// ==========================================

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// 时间源
pub trait Clock: Send + Sync {
    /// 当前 UTC 时刻
    fn now(&self) -> DateTime<Utc>;

    /// 当前 UTC 日历日期
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// 当前 UTC 时刻 (无时区,用于序列化时间戳)
    fn now_naive(&self) -> NaiveDateTime {
        self.now().naive_utc()
    }
}

/// 系统时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 固定时钟 (测试及回放使用)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// 按日期与小时构造 (UTC)
    ///
    /// 日期或小时非法时返回 None
    pub fn at(date: NaiveDate, hour: u32) -> Option<Self> {
        date.and_hms_opt(hour, 0, 0)
            .map(|naive| Self::new(naive.and_utc()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_fixed_clock_is_stable() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let clock = FixedClock::at(date, 10).unwrap();
        assert_eq!(clock.today(), date);
        assert_eq!(clock.now().hour(), 10);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_fixed_clock_rejects_invalid_hour() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert!(FixedClock::at(date, 24).is_none());
    }
}
