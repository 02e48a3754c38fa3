// ==========================================
// Mandi 供应链智能引擎 - 库存概览引擎
// ==========================================
// 职责: 生成库存快照、7 日进出库序列、驾驶舱 KPI
// 输入: 参考目录 + 日随机源
// 输出: SupplyOverview
// ==========================================
// 抽样顺序 (契约):
// 1) 按目录顺序逐作物: qty → price → change_pct
// 2) 7 日进库 (每日每作物一次)
// 3) 7 日出库 (每日每作物一次)
// 4) active_farmers → pending_orders
// ==========================================

use crate::domain::catalog::{Catalog, GeoPoint};
use crate::domain::overview::{DailyThroughput, InventorySnapshot, OverviewKpis, SupplyOverview};
use crate::engine::clock::Clock;
use crate::engine::numeric::{round_to, round_whole};
use crate::engine::seed::SeedProvider;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use std::sync::Arc;
use tracing::instrument;

/// 吞吐窗口 (天)
pub const THROUGHPUT_DAYS: i64 = 7;

// ==========================================
// OverviewEngine - 库存概览引擎
// ==========================================
pub struct OverviewEngine {
    catalog: Arc<Catalog>,
    clock: Arc<dyn Clock>,
    seeds: SeedProvider,
}

impl OverviewEngine {
    pub fn new(catalog: Arc<Catalog>, clock: Arc<dyn Clock>) -> Self {
        let seeds = SeedProvider::new(clock.clone());
        Self {
            catalog,
            clock,
            seeds,
        }
    }

    /// 生成供应概览
    #[instrument(skip(self))]
    pub fn generate(&self, mandi: GeoPoint) -> SupplyOverview {
        let mut rng = self.seeds.daily_rng();
        let today = self.clock.today();

        // 1. 库存
        let mut inventory: Vec<InventorySnapshot> = self
            .catalog
            .crops()
            .iter()
            .map(|crop| {
                let qty_kg: i64 = rng.gen_range(200..=3000);
                let price_per_kg =
                    round_to(crop.base_price * (1.0 + rng.gen_range(-0.10..0.15)), 2);
                let value = round_whole(qty_kg as f64 * price_per_kg);
                let change_pct = round_to(rng.gen_range(-15.0..20.0), 1);

                InventorySnapshot {
                    crop: crop.name.clone(),
                    emoji: crop.emoji.clone(),
                    qty_kg,
                    price_per_kg,
                    value,
                    change_pct,
                }
            })
            .collect();

        let total_inventory_kg: i64 = inventory.iter().map(|i| i.qty_kg).sum();
        let total_value: i64 = inventory.iter().map(|i| i.value).sum();

        // 2. 进库 (来自农户) / 3. 出库 (发往零售商)
        let inbound_7d = self.throughput_series(&mut rng, today, 100, 800);
        let outbound_7d = self.throughput_series(&mut rng, today, 80, 700);

        let total_inbound: i64 = inbound_7d.iter().map(|d| d.qty_kg).sum();
        let total_outbound: i64 = outbound_7d.iter().map(|d| d.qty_kg).sum();

        // 4. KPI
        let active_farmers: i64 = rng.gen_range(25..=80);
        let pending_orders: i64 = rng.gen_range(5..=25);

        let kpis = OverviewKpis {
            total_inventory_kg,
            total_value,
            daily_inbound_avg: round_whole(total_inbound as f64 / THROUGHPUT_DAYS as f64),
            daily_outbound_avg: round_whole(total_outbound as f64 / THROUGHPUT_DAYS as f64),
            active_farmers,
            active_retailers: self.catalog.retailers().len(),
            trucks_active: self.catalog.trucks().len(),
            pending_orders,
        };

        // 按货值降序 (稳定排序)
        inventory.sort_by(|a, b| b.value.cmp(&a.value));

        tracing::debug!(
            total_inventory_kg,
            total_value,
            "供应概览生成完成"
        );

        SupplyOverview {
            kpis,
            inventory,
            inbound_7d,
            outbound_7d,
            mandi,
        }
    }

    /// 生成 7 日汇总序列 (旧 → 新, 含今天)
    ///
    /// 每日对全部作物各抽一次 [min, max] 整数后求和
    fn throughput_series<R: Rng>(
        &self,
        rng: &mut R,
        today: NaiveDate,
        min_kg: i64,
        max_kg: i64,
    ) -> Vec<DailyThroughput> {
        (0..THROUGHPUT_DAYS)
            .map(|d| {
                let date = today - Duration::days(THROUGHPUT_DAYS - 1 - d);
                let qty_kg: i64 = self
                    .catalog
                    .crops()
                    .iter()
                    .map(|_| rng.gen_range(min_kg..=max_kg))
                    .sum();
                DailyThroughput { date, qty_kg }
            })
            .collect()
    }
}
