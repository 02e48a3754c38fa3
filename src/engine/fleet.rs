// ==========================================
// Mandi 供应链智能引擎 - 车队状态引擎
// ==========================================
// 职责: 为每辆车分配零售商 / 货物 / 状态,推导 ETA 与装载率
// 输入: 参考目录 + 日随机源 + Mandi 坐标
// 输出: FleetStatus
// ==========================================
// 抽样顺序 (契约,逐车): 货物作物 → 状态 → 载重 → [ETA] → 当前纬度 → 当前经度
// ==========================================

use crate::domain::catalog::{Catalog, GeoPoint};
use crate::domain::fleet::{
    FleetEntry, FleetStatus, FleetSummary, MANDI_LABEL, NO_DESTINATION_LABEL,
};
use crate::domain::types::TruckStatus;
use crate::engine::clock::Clock;
use crate::engine::numeric::{round_to, round_whole};
use crate::engine::seed::{pick_index, SeedProvider};
use rand::Rng;
use std::sync::Arc;
use tracing::instrument;

/// 地球半径 (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// 当前位置抖动幅度 (度)
pub const POSITION_JITTER_DEG: f64 = 0.05;

/// 两点间球面距离 (haversine, 保留 1 位小数)
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    round_to(EARTH_RADIUS_KM * c, 1)
}

// ==========================================
// FleetEngine - 车队状态引擎
// ==========================================
pub struct FleetEngine {
    catalog: Arc<Catalog>,
    seeds: SeedProvider,
}

impl FleetEngine {
    pub fn new(catalog: Arc<Catalog>, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog,
            seeds: SeedProvider::new(clock),
        }
    }

    /// 生成车队状态
    #[instrument(skip(self))]
    pub fn generate(&self, mandi: GeoPoint) -> FleetStatus {
        let mut rng = self.seeds.daily_rng();
        let crops = self.catalog.crops();
        let retailers = self.catalog.retailers();

        let fleet: Vec<FleetEntry> = self
            .catalog
            .trucks()
            .iter()
            .enumerate()
            .map(|(i, truck)| {
                let retailer = &retailers[i % retailers.len()];
                let cargo_crop = &crops[pick_index(&mut rng, crops.len())];
                let status = TruckStatus::ALL[pick_index(&mut rng, TruckStatus::ALL.len())];
                let cargo_kg: u32 = rng.gen_range(500..=truck.capacity_kg);
                let eta_min: u32 = if status.is_en_route() {
                    rng.gen_range(15..=120)
                } else {
                    0
                };
                let current = GeoPoint::new(
                    mandi.lat + rng.gen_range(-POSITION_JITTER_DEG..POSITION_JITTER_DEG),
                    mandi.lng + rng.gen_range(-POSITION_JITTER_DEG..POSITION_JITTER_DEG),
                );

                // 出发地 / 目的地: 送货时 Mandi → 零售商, 其余 零售商 → Mandi
                let retailer_point = GeoPoint::new(retailer.lat, retailer.lng);
                let (origin, destination) = if status == TruckStatus::Delivering {
                    (mandi, retailer_point)
                } else {
                    (retailer_point, mandi)
                };
                let destination_label = match status {
                    TruckStatus::Delivering => retailer.name.clone(),
                    TruckStatus::Returning => MANDI_LABEL.to_string(),
                    _ => NO_DESTINATION_LABEL.to_string(),
                };

                FleetEntry {
                    id: truck.id.clone(),
                    driver: truck.driver.clone(),
                    capacity_kg: truck.capacity_kg,
                    truck_type: truck.truck_type,
                    status,
                    cargo: format!("{} {}", cargo_crop.emoji, cargo_crop.name),
                    cargo_crop: cargo_crop.name.clone(),
                    cargo_kg,
                    utilization_pct: round_whole(
                        f64::from(cargo_kg) / f64::from(truck.capacity_kg) * 100.0,
                    ) as u32,
                    destination: destination_label,
                    origin_lat: origin.lat,
                    origin_lng: origin.lng,
                    dest_lat: destination.lat,
                    dest_lng: destination.lng,
                    current_lat: current.lat,
                    current_lng: current.lng,
                    distance_km: haversine_km(current, destination),
                    eta_min,
                }
            })
            .collect();

        let summary = FleetSummary::from_entries(&fleet);
        tracing::debug!(
            total = summary.total,
            delivering = summary.delivering,
            delayed = summary.delayed,
            "车队状态生成完成"
        );

        FleetStatus {
            fleet,
            retailers: retailers.to_vec(),
            mandi,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::FixedClock;
    use chrono::NaiveDate;

    fn engine_on(day: u32) -> FleetEngine {
        let date = NaiveDate::from_ymd_opt(2026, 9, day).unwrap();
        FleetEngine::new(
            Arc::new(Catalog::standard()),
            Arc::new(FixedClock::at(date, 6).unwrap()),
        )
    }

    fn mandi() -> GeoPoint {
        GeoPoint::new(12.97, 77.59)
    }

    #[test]
    fn test_haversine_known_distance() {
        assert_eq!(haversine_km(mandi(), mandi()), 0.0);
        // Mandi → Koramangala 约 5.4km
        let d = haversine_km(mandi(), GeoPoint::new(12.9352, 77.6245));
        assert!(d > 4.0 && d < 6.0, "distance {}", d);
    }

    #[test]
    fn test_fleet_entries_respect_status_rules() {
        for day in 1..=30 {
            let status = engine_on(day).generate(mandi());
            assert_eq!(status.fleet.len(), 5);
            assert_eq!(status.retailers.len(), 6);

            for (i, entry) in status.fleet.iter().enumerate() {
                let retailer = &status.retailers[i % 6];
                assert!(entry.cargo_kg >= 500 && entry.cargo_kg <= entry.capacity_kg);
                assert!(entry.utilization_pct <= 100);

                if entry.status.is_en_route() {
                    assert!((15..=120).contains(&entry.eta_min));
                } else {
                    assert_eq!(entry.eta_min, 0);
                }

                match entry.status {
                    TruckStatus::Delivering => {
                        assert_eq!(entry.destination, retailer.name);
                        assert_eq!((entry.origin_lat, entry.origin_lng), (12.97, 77.59));
                        assert_eq!((entry.dest_lat, entry.dest_lng), (retailer.lat, retailer.lng));
                    }
                    TruckStatus::Returning => {
                        assert_eq!(entry.destination, "Mandi");
                        assert_eq!((entry.dest_lat, entry.dest_lng), (12.97, 77.59));
                        assert_eq!((entry.origin_lat, entry.origin_lng), (retailer.lat, retailer.lng));
                    }
                    _ => {
                        assert_eq!(entry.destination, "—");
                        assert_eq!((entry.dest_lat, entry.dest_lng), (12.97, 77.59));
                    }
                }

                assert!((entry.current_lat - 12.97).abs() <= 0.05 + 1e-9);
                assert!((entry.current_lng - 77.59).abs() <= 0.05 + 1e-9);
            }
        }
    }

    #[test]
    fn test_summary_counts_every_status() {
        let status = engine_on(12).generate(mandi());
        let s = &status.summary;
        assert_eq!(s.total, 5);
        assert_eq!(s.delivering + s.returning + s.loading + s.idle + s.delayed, 5);
        let delayed = status
            .fleet
            .iter()
            .filter(|e| e.status == TruckStatus::Delayed)
            .count();
        assert_eq!(s.delayed, delayed);
    }

    #[test]
    fn test_same_day_is_deterministic() {
        assert_eq!(engine_on(3).generate(mandi()), engine_on(3).generate(mandi()));
    }
}
