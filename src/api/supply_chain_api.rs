// ==========================================
// Mandi 供应链智能引擎 - 供应链智能 API
// ==========================================
// 职责: 概览 / 压力 / 预测 / 车队 / 干预 / 情景 六个只读操作
// 说明: 操作间无顺序依赖, 每次调用重新构造引擎与随机源
// ==========================================

use std::sync::Arc;
use tracing::instrument;

use crate::api::error::{validate_coordinates, validate_finite, ApiError, ApiResult};
use crate::config::SupplyChainConfig;
use crate::domain::catalog::{Catalog, GeoPoint};
use crate::domain::fleet::FleetStatus;
use crate::domain::forecast::ForecastReport;
use crate::domain::intervention::InterventionPlan;
use crate::domain::mandi::MandiOwner;
use crate::domain::overview::SupplyOverview;
use crate::domain::scenario::{ScenarioInput, ScenarioResult};
use crate::domain::signal::RiskAssessment;
use crate::engine::{
    Clock, FleetEngine, ForecastEngine, InterventionEngine, OverviewEngine, ScenarioEngine,
    StressEngine, MAX_FORECAST_DAYS,
};
use crate::i18n::normalize_locale;

// ==========================================
// SupplyChainApi - 供应链智能 API
// ==========================================

/// 供应链智能API
///
/// 职责：
/// 1. 解析默认坐标 / 预测天数 / 文案语言
/// 2. 校验调用方输入 (坐标范围, 数值有限)
/// 3. 调用对应引擎
#[derive(Clone)]
pub struct SupplyChainApi {
    catalog: Arc<Catalog>,
    clock: Arc<dyn Clock>,
    config: SupplyChainConfig,
    mandi: GeoPoint,
    locale: String,
}

impl SupplyChainApi {
    /// 创建新的SupplyChainApi实例
    pub fn new(catalog: Arc<Catalog>, clock: Arc<dyn Clock>, config: SupplyChainConfig) -> Self {
        let mandi = config.mandi();
        let locale = normalize_locale(&config.default_locale).to_string();
        Self {
            catalog,
            clock,
            config,
            mandi,
            locale,
        }
    }

    /// 按货主档案定制: 语言取档案 language, 已登记坐标时作为默认 Mandi 坐标
    pub fn for_owner(&self, owner: &MandiOwner) -> Self {
        let mut scoped = self.clone();
        scoped.locale = normalize_locale(&owner.language).to_string();
        if let (Some(lat), Some(lng)) = (owner.latitude, owner.longitude) {
            scoped.mandi = GeoPoint::new(lat, lng);
        }
        scoped
    }

    /// 当前文案语言
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// 默认 Mandi 坐标
    pub fn default_mandi(&self) -> GeoPoint {
        self.mandi
    }

    /// 解析坐标: 两者均缺省时用默认值, 单侧缺省时用默认值补齐
    fn resolve_mandi(&self, lat: Option<f64>, lng: Option<f64>) -> ApiResult<GeoPoint> {
        let point = GeoPoint::new(lat.unwrap_or(self.mandi.lat), lng.unwrap_or(self.mandi.lng));
        validate_coordinates(point.lat, point.lng)?;
        Ok(point)
    }

    /// 库存 / 吞吐量概览
    ///
    /// # 参数
    /// - lat / lng: Mandi 坐标 (可选)
    #[instrument(skip(self))]
    pub fn overview(&self, lat: Option<f64>, lng: Option<f64>) -> ApiResult<SupplyOverview> {
        let mandi = self.resolve_mandi(lat, lng)?;
        Ok(OverviewEngine::new(self.catalog.clone(), self.clock.clone()).generate(mandi))
    }

    /// 压力信号检测
    ///
    /// 坐标仅做校验, 不参与计算
    #[instrument(skip(self))]
    pub fn stress(&self, lat: Option<f64>, lng: Option<f64>) -> ApiResult<RiskAssessment> {
        self.resolve_mandi(lat, lng)?;
        Ok(self.stress_engine().detect())
    }

    /// 价格预测
    ///
    /// # 参数
    /// - days: 预测天数 (缺省取配置 forecast_default_days; <= 0 时预测序列为空)
    ///
    /// # 错误
    /// - days > MAX_FORECAST_DAYS: InvalidInput
    #[instrument(skip(self))]
    pub fn forecast(&self, days: Option<i64>) -> ApiResult<ForecastReport> {
        let days = days.unwrap_or(self.config.forecast_default_days);
        if days > MAX_FORECAST_DAYS {
            return Err(ApiError::InvalidInput(format!(
                "预测天数不能超过 {}: {}",
                MAX_FORECAST_DAYS, days
            )));
        }
        Ok(ForecastEngine::new(self.catalog.clone(), self.clock.clone()).forecast(days))
    }

    /// 车队状态
    #[instrument(skip(self))]
    pub fn fleet(&self, lat: Option<f64>, lng: Option<f64>) -> ApiResult<FleetStatus> {
        let mandi = self.resolve_mandi(lat, lng)?;
        Ok(FleetEngine::new(self.catalog.clone(), self.clock.clone()).generate(mandi))
    }

    /// 干预建议 (附带当前压力评估上下文)
    #[instrument(skip(self))]
    pub fn interventions(&self) -> ApiResult<InterventionPlan> {
        let stress = self.stress_engine().detect();
        Ok(InterventionEngine::new(self.clock.clone())
            .with_locale(&self.locale)
            .recommend(&stress))
    }

    /// 情景模拟
    ///
    /// 输入须为有限数值; 负值照常计算 (引擎内告警)
    #[instrument(skip(self))]
    pub fn scenario(&self, input: ScenarioInput) -> ApiResult<ScenarioResult> {
        validate_finite("rain_days", input.rain_days)?;
        validate_finite("demand_surge_pct", input.demand_surge_pct)?;
        validate_finite("transport_delay_pct", input.transport_delay_pct)?;

        Ok(ScenarioEngine::new(self.catalog.clone())
            .with_locale(&self.locale)
            .run(input))
    }

    fn stress_engine(&self) -> StressEngine {
        StressEngine::new(self.catalog.clone(), self.clock.clone()).with_locale(&self.locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FixedClock;
    use chrono::{NaiveDate, NaiveDateTime};

    fn api() -> SupplyChainApi {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        SupplyChainApi::new(
            Arc::new(Catalog::standard()),
            Arc::new(FixedClock::at(date, 10).unwrap()),
            SupplyChainConfig::default(),
        )
    }

    fn owner(language: &str, lat: Option<f64>, lng: Option<f64>) -> MandiOwner {
        let ts = NaiveDateTime::parse_from_str("2026-03-01 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        MandiOwner {
            id: 1,
            user_id: 7,
            owner_name: "Ravi".to_string(),
            contact: None,
            latitude: lat,
            longitude: lng,
            language: language.to_string(),
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_default_coordinates_are_echoed() {
        let overview = api().overview(None, None).unwrap();
        assert_eq!(overview.mandi, GeoPoint::new(12.97, 77.59));

        let overview = api().overview(Some(13.0), None).unwrap();
        assert_eq!(overview.mandi, GeoPoint::new(13.0, 77.59));
    }

    #[test]
    fn test_invalid_coordinates_rejected() {
        assert!(matches!(
            api().fleet(Some(95.0), Some(77.0)),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            api().stress(None, Some(f64::NAN)),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_forecast_uses_configured_default_days() {
        let report = api().forecast(None).unwrap();
        assert!(report.forecasts.iter().all(|f| f.forecast.len() == 7));

        let mut config = SupplyChainConfig::default();
        config.forecast_default_days = 3;
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let api = SupplyChainApi::new(
            Arc::new(Catalog::standard()),
            Arc::new(FixedClock::at(date, 10).unwrap()),
            config,
        );
        let report = api.forecast(None).unwrap();
        assert!(report.forecasts.iter().all(|f| f.forecast.len() == 3));
    }

    #[test]
    fn test_forecast_rejects_horizon_above_max() {
        let api = api();
        assert!(matches!(api.forecast(Some(i64::MAX)), Err(ApiError::InvalidInput(_))));
        assert!(matches!(
            api.forecast(Some(MAX_FORECAST_DAYS + 1)),
            Err(ApiError::InvalidInput(_))
        ));

        let report = api.forecast(Some(MAX_FORECAST_DAYS)).unwrap();
        assert!(report
            .forecasts
            .iter()
            .all(|f| f.forecast.len() == MAX_FORECAST_DAYS as usize));
    }

    #[test]
    fn test_scenario_rejects_non_finite_input() {
        let result = api().scenario(ScenarioInput::new(f64::INFINITY, 0.0, 0.0));
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_interventions_carry_stress_context() {
        let api = api();
        let stress = api.stress(None, None).unwrap();
        let plan = api.interventions().unwrap();
        assert_eq!(plan.risk_score, stress.risk_score);
        assert_eq!(plan.risk_level, stress.risk_level);
    }

    #[test]
    fn test_for_owner_switches_locale_and_mandi() {
        let base = api();
        let scoped = base.for_owner(&owner("zh-CN", Some(13.05), Some(77.62)));
        assert_eq!(scoped.locale(), "zh-CN");
        assert_eq!(scoped.default_mandi(), GeoPoint::new(13.05, 77.62));

        // 未登记坐标时保留默认 Mandi
        let scoped = base.for_owner(&owner("en", None, None));
        assert_eq!(scoped.default_mandi(), GeoPoint::new(12.97, 77.59));

        // 语言结构一致, 数值一致
        let en = base.scenario(ScenarioInput::new(2.0, 30.0, 0.0)).unwrap();
        let zh = base
            .for_owner(&owner("zh-CN", None, None))
            .scenario(ScenarioInput::new(2.0, 30.0, 0.0))
            .unwrap();
        assert_eq!(en.predicted, zh.predicted);
        assert_ne!(en.recommendations[0].text, zh.recommendations[0].text);
    }
}
