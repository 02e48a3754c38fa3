// ==========================================
// Mandi 供应链智能引擎 - 确定性随机源
// ==========================================
// 职责: 由注入时钟派生种子,同日(同时段)输出完全一致
// 约束: 每次调用都重新构造随机源,不跨调用保留状态
// ==========================================
// 说明: 抽样顺序属于契约,调用方必须按固定顺序取数
// 确定性范围: 同一构建、同一天;不保证跨实现逐位一致
// ==========================================

use crate::engine::clock::Clock;
use chrono::{Datelike, Timelike};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// 每日时段数 (3 小时一档)
pub const BURST_HOURS: u32 = 3;

// ==========================================
// SeedProvider - 种子提供者
// ==========================================
#[derive(Clone)]
pub struct SeedProvider {
    clock: Arc<dyn Clock>,
}

impl SeedProvider {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// 日种子: UTC 日期序数 (0001-01-01 = 1)
    pub fn daily_seed(&self) -> u64 {
        i64::from(self.clock.today().num_days_from_ce()) as u64
    }

    /// 时段种子: 日种子 × 100 + hour / 3
    pub fn burst_seed(&self) -> u64 {
        let hour_bucket = u64::from(self.clock.now().hour() / BURST_HOURS);
        self.daily_seed().wrapping_mul(100).wrapping_add(hour_bucket)
    }

    /// 日随机源 (概览 / 预测 / 车队 / 干预)
    pub fn daily_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.daily_seed())
    }

    /// 时段随机源 (压力信号,每 3 小时刷新)
    pub fn burst_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.burst_seed())
    }
}

// ==========================================
// 抽样辅助函数
// ==========================================

/// 均匀选取下标
///
/// 调用方保证 `len > 0` (目录在构造时已校验非空)
pub fn pick_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    rng.gen_range(0..len)
}

/// 无放回抽样,返回抽样顺序下的下标
///
/// 对显式下标序列做部分 Fisher–Yates 洗牌后取前 `amount` 个,
/// `amount` 超过 `len` 时截断。
pub fn sample_indices<R: Rng + ?Sized>(rng: &mut R, len: usize, amount: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    let amount = amount.min(len);
    let (picked, _) = indices.partial_shuffle(rng, amount);
    picked.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::FixedClock;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn provider(y: i32, m: u32, d: u32, hour: u32) -> SeedProvider {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        SeedProvider::new(Arc::new(FixedClock::at(date, hour).unwrap()))
    }

    #[test]
    fn test_daily_seed_is_date_ordinal() {
        assert_eq!(provider(1, 1, 1, 0).daily_seed(), 1);
        assert_eq!(provider(1970, 1, 1, 0).daily_seed(), 719_163);
    }

    #[test]
    fn test_burst_seed_buckets_by_three_hours() {
        let base = provider(2026, 5, 1, 0).daily_seed();
        assert_eq!(provider(2026, 5, 1, 0).burst_seed(), base * 100);
        assert_eq!(provider(2026, 5, 1, 2).burst_seed(), base * 100);
        assert_eq!(provider(2026, 5, 1, 3).burst_seed(), base * 100 + 1);
        assert_eq!(provider(2026, 5, 1, 23).burst_seed(), base * 100 + 7);
    }

    #[test]
    fn test_same_day_rng_reproduces_draws() {
        let mut rng_a = provider(2026, 5, 1, 9).daily_rng();
        let mut rng_b = provider(2026, 5, 1, 17).daily_rng();
        let a: Vec<u32> = (0..5).map(|_| rng_a.gen_range(0..1000)).collect();
        let b: Vec<u32> = (0..5).map(|_| rng_b.gen_range(0..1000)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_indices_distinct_and_capped() {
        let mut rng = provider(2026, 5, 1, 0).daily_rng();
        let picked = sample_indices(&mut rng, 6, 4);
        assert_eq!(picked.len(), 4);
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 4);
        assert!(picked.iter().all(|&i| i < 6));

        let capped = sample_indices(&mut rng, 3, 10);
        assert_eq!(capped.len(), 3);
    }
}
