// ==========================================
// Mandi 供应链智能引擎 - 干预建议引擎
// ==========================================
// 职责: 从固定模板库无放回抽样,生成待处理干预列表
// 输入: 日随机源 + 当前压力评估 (仅作为上下文返回)
// 输出: InterventionPlan
// ==========================================
// 抽样顺序 (契约): 数量 [3,6] → 模板抽样 → 潜在节省金额 [20,80]K
// 说明: 潜在节省金额与所选干预成本无关,为展示数字
// ==========================================

use crate::domain::intervention::{
    Intervention, InterventionPlan, InterventionTemplate, INTERVENTION_TEMPLATES,
};
use crate::domain::signal::RiskAssessment;
use crate::domain::types::InterventionStatus;
use crate::engine::clock::Clock;
use crate::engine::seed::{sample_indices, SeedProvider};
use crate::i18n::{t_in, t_in_with_args, DEFAULT_LOCALE};
use rand::Rng;
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// InterventionEngine - 干预建议引擎
// ==========================================
pub struct InterventionEngine {
    seeds: SeedProvider,
    locale: String,
}

impl InterventionEngine {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            seeds: SeedProvider::new(clock),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// 指定文案语言
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = locale.to_string();
        self
    }

    /// 生成干预计划
    ///
    /// # 参数
    /// - `stress`: 当前压力评估 (不参与模板选择)
    #[instrument(skip(self, stress), fields(risk_score = stress.risk_score))]
    pub fn recommend(&self, stress: &RiskAssessment) -> InterventionPlan {
        let mut rng = self.seeds.daily_rng();

        let amount = rng.gen_range(3..=6);
        let interventions: Vec<Intervention> =
            sample_indices(&mut rng, INTERVENTION_TEMPLATES.len(), amount)
                .into_iter()
                .enumerate()
                .map(|(i, index)| self.build(i as u32 + 1, &INTERVENTION_TEMPLATES[index]))
                .collect();

        let savings_k: u32 = rng.gen_range(20..=80);
        let savings = savings_k.to_string();

        tracing::debug!(count = interventions.len(), savings_k, "干预建议抽样完成");

        InterventionPlan {
            interventions,
            total_potential_savings: t_in_with_args(
                &self.locale,
                "intervention.total_savings",
                &[("amount", savings.as_str())],
            ),
            risk_score: stress.risk_score,
            risk_level: stress.risk_level,
        }
    }

    fn build(&self, id: u32, template: &InterventionTemplate) -> Intervention {
        let text = |field: &str| t_in(&self.locale, &format!("intervention.{}.{}", template.key, field));

        Intervention {
            id,
            title: text("title"),
            category: template.category,
            icon: template.icon.to_string(),
            description: text("description"),
            impact: text("impact"),
            cost: text("cost"),
            urgency: template.urgency,
            trade_off: text("trade_off"),
            status: InterventionStatus::Pending,
        }
    }
}
