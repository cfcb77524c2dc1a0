//! 排產數量分配（依策略）

use kanban_core::PlanStrategy;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::demand::GroupDemand;

/// 消除 Decimal 除法尾數誤差後再取整
const ROUNDING_DP: u32 = 9;

/// 排產數量計算器
pub struct QuantityPlanner;

impl QuantityPlanner {
    /// 依策略分配排產數量
    ///
    /// 回傳值與 `demands` 一一對應，皆為 StdPack 的倍數。
    pub fn allocate(
        demands: &[GroupDemand],
        strategy: PlanStrategy,
        capacity: Decimal,
        changeover_hours: Decimal,
    ) -> Vec<u32> {
        match strategy {
            PlanStrategy::ShortfallFirst => {
                let mut order: Vec<usize> = (0..demands.len()).collect();
                order.sort_by(|&a, &b| {
                    demands[b]
                        .shortfall
                        .cmp(&demands[a].shortfall)
                        .then_with(|| demands[a].group_id.cmp(&demands[b].group_id))
                });
                Self::greedy(demands, &order, capacity, changeover_hours)
            }
            PlanStrategy::PriorityFirst => {
                let mut order: Vec<usize> = (0..demands.len()).collect();
                order.sort_by(|&a, &b| {
                    kanban_core::metrics::compare_priority(demands[a].priority, demands[b].priority)
                        .then_with(|| demands[a].group_id.cmp(&demands[b].group_id))
                });
                Self::greedy(demands, &order, capacity, changeover_hours)
            }
            PlanStrategy::MinimalForAll => {
                Self::minimal_for_all(demands, capacity, changeover_hours)
            }
        }
    }

    /// 貪婪分配
    ///
    /// 依序給予完整缺口（向上取整到整箱）；第一個放不下的群組
    /// 取剩餘產能內可生產的最大整箱數（生產工時不超過剩餘產能，
    /// 換線時間另計，可能使計劃超出產能），之後的群組一律為 0。
    fn greedy(
        demands: &[GroupDemand],
        order: &[usize],
        capacity: Decimal,
        changeover_hours: Decimal,
    ) -> Vec<u32> {
        let mut quantities = vec![0; demands.len()];
        let mut remaining = capacity;

        for &idx in order {
            let demand = &demands[idx];
            if !demand.has_shortfall() {
                continue;
            }

            let full_qty = Self::round_up_to_pack(Decimal::from(demand.shortfall), demand.std_pack);
            let hours = Self::production_hours(full_qty, demand.rate) + changeover_hours;

            if hours <= remaining {
                quantities[idx] = full_qty;
                remaining -= hours;
                continue;
            }

            // 超出的群組：剩餘產能內可生產的最大整箱數，換線時間照計
            let partial_qty =
                Self::floor_to_pack(remaining.saturating_mul(demand.rate), demand.std_pack);
            if partial_qty > 0 {
                tracing::debug!(
                    "群組 {} 產能不足，部分排產 {} / {}",
                    demand.group_id,
                    partial_qty,
                    full_qty
                );
                quantities[idx] = partial_qty;
            }
            break;
        }

        quantities
    }

    /// 按比例分配最低量
    fn minimal_for_all(
        demands: &[GroupDemand],
        capacity: Decimal,
        changeover_hours: Decimal,
    ) -> Vec<u32> {
        let short: Vec<&GroupDemand> = demands.iter().filter(|d| d.has_shortfall()).collect();

        if !short.is_empty() {
            let needed: Decimal = short
                .iter()
                .map(|d| Self::hours_for(Decimal::from(d.shortfall), d.rate) + changeover_hours)
                .sum();
            let factor = if needed > Decimal::ZERO {
                (capacity / needed).min(Decimal::ONE)
            } else {
                Decimal::ONE
            };
            tracing::debug!("比例分配係數: {}", factor);

            return demands
                .iter()
                .map(|d| {
                    if d.has_shortfall() {
                        Self::round_up_to_pack(Decimal::from(d.shortfall) * factor, d.std_pack)
                    } else {
                        0
                    }
                })
                .collect();
        }

        if demands.is_empty() {
            return Vec::new();
        }

        // 無任何缺口：產能平均分給所有群組
        let share = capacity / Decimal::from(demands.len() as u64);

        demands
            .iter()
            .map(|d| Self::floor_to_pack(share.saturating_mul(d.rate), d.std_pack))
            .collect()
    }

    /// 生產工時 = 數量 / 速率；速率為 0 時回傳 0
    pub fn production_hours(quantity: u32, rate: Decimal) -> Decimal {
        Self::hours_for(Decimal::from(quantity), rate)
    }

    fn hours_for(quantity: Decimal, rate: Decimal) -> Decimal {
        if rate.is_zero() {
            return Decimal::ZERO;
        }
        quantity / rate
    }

    /// 向上取整到 StdPack 倍數
    pub fn round_up_to_pack(quantity: Decimal, std_pack: u32) -> u32 {
        if std_pack == 0 || quantity <= Decimal::ZERO {
            return 0;
        }
        let boxes = (quantity / Decimal::from(std_pack))
            .round_dp(ROUNDING_DP)
            .ceil();
        Self::boxes_to_quantity(boxes, std_pack)
    }

    /// 向下取整到 StdPack 倍數
    pub fn floor_to_pack(quantity: Decimal, std_pack: u32) -> u32 {
        if std_pack == 0 || quantity <= Decimal::ZERO {
            return 0;
        }
        let boxes = (quantity / Decimal::from(std_pack))
            .round_dp(ROUNDING_DP)
            .floor();
        Self::boxes_to_quantity(boxes, std_pack)
    }

    /// 箱數轉數量，超出 u32 範圍時取可表示的最大整箱數
    fn boxes_to_quantity(boxes: Decimal, std_pack: u32) -> u32 {
        let max_boxes = u32::MAX / std_pack;
        let boxes = boxes.to_u32().unwrap_or(max_boxes).min(max_boxes);
        boxes * std_pack
    }
}
