// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）和中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// 引擎调用一律显式传入 locale,不依赖全局语言状态
// ==========================================

/// 默认语言（与原始看板文案一致）
pub const DEFAULT_LOCALE: &str = "en";

/// 支持的语言列表
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "zh-CN"];

/// 是否为支持的语言
pub fn is_supported(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// 规范化语言代码（不支持时回退到默认语言）
pub fn normalize_locale(locale: &str) -> &'static str {
    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|supported| *supported == locale)
        .unwrap_or(DEFAULT_LOCALE)
}

/// 按指定语言翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use mandi_supply_chain::i18n::t_in;
/// let msg = t_in("en", "signal.weather.action");
/// ```
pub fn t_in(locale: &str, key: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}

/// 按指定语言翻译消息（带参数）
///
/// 占位符格式: `%{name}`
///
/// # 示例
/// ```no_run
/// use mandi_supply_chain::i18n::t_in_with_args;
/// let msg = t_in_with_args("en", "scenario.shortfall", &[("gap", "2050")]);
/// ```
pub fn t_in_with_args(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    let mut result = t_in(locale, key);
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("zh-CN"), "zh-CN");
        assert_eq!(normalize_locale("en"), "en");
        assert_eq!(normalize_locale("fr"), DEFAULT_LOCALE);
        assert!(is_supported("zh-CN"));
        assert!(!is_supported("hi"));
    }

    #[test]
    fn test_translate_simple() {
        assert_eq!(t_in("en", "common.success"), "Operation successful");
        assert_eq!(t_in("zh-CN", "common.success"), "操作成功");
    }

    #[test]
    fn test_translate_with_args() {
        let msg = t_in_with_args("en", "scenario.risk_alert", &[("risk", "72")]);
        assert_eq!(msg, "Risk score 72/100 — trigger early alerts to all stakeholders");

        let msg = t_in_with_args("zh-CN", "scenario.risk_alert", &[("risk", "72")]);
        assert!(msg.contains("72/100"));
        assert!(msg.contains("风险分"));
    }

    #[test]
    fn test_unknown_locale_falls_back_to_english() {
        let msg = t_in("fr", "signal.weather.action");
        assert_eq!(msg, "Pre-stock perishables, alert retailers");
    }
}
