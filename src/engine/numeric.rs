// ==========================================
// Mandi 供应链智能引擎 - 数值取整
// ==========================================
// 口径: 四舍六入五成双 (round half to even)
// ==========================================

/// 取整到整数
pub fn round_whole(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// 数值取整后能否无损落入 i64 (超出时 `round_whole` 饱和截断)
pub fn fits_i64(value: f64) -> bool {
    value.is_finite() && value >= i64::MIN as f64 && value < i64::MAX as f64
}

/// 保留 `decimals` 位小数
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

/// 区间截断 (先增量、后截断由调用方保证)
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}
