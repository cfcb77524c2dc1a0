//! 週排產模擬器

use kanban_core::{MetricsTable, PlanEntry, PlanStrategy, PlannerConfig, ProductionWeek, WeeklyPlan};
use rayon::prelude::*;
use rust_decimal::Decimal;

use crate::capacity::CapacityAnalyzer;
use crate::demand::GroupDemand;
use crate::quantity::QuantityPlanner;
use crate::scheduling::CalendarScheduler;

/// 週排產模擬器
pub struct WeeklyPlanSimulator {
    /// 排產配置
    config: PlannerConfig,
}

impl WeeklyPlanSimulator {
    /// 創建新的模擬器
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// 模擬單一機台的週排產
    ///
    /// 產能參數無效時回傳 `InvalidCapacityParameters`；
    /// 機台無缺口時回傳有效的空計劃。
    pub fn simulate(
        &self,
        table: &MetricsTable,
        machine_id: &str,
        strategy: PlanStrategy,
        days: u32,
        hours_per_day: Decimal,
    ) -> kanban_core::Result<WeeklyPlan> {
        let week = ProductionWeek::new(days, hours_per_day, &self.config)?;
        Ok(self.simulate_week(table, machine_id, strategy, &week))
    }

    /// 以三種策略分別模擬（並行），依策略宣告順序回傳
    pub fn compare_strategies(
        &self,
        table: &MetricsTable,
        machine_id: &str,
        days: u32,
        hours_per_day: Decimal,
    ) -> kanban_core::Result<Vec<WeeklyPlan>> {
        let week = ProductionWeek::new(days, hours_per_day, &self.config)?;

        Ok(PlanStrategy::ALL
            .par_iter()
            .map(|&strategy| self.simulate_week(table, machine_id, strategy, &week))
            .collect())
    }

    fn simulate_week(
        &self,
        table: &MetricsTable,
        machine_id: &str,
        strategy: PlanStrategy,
        week: &ProductionWeek,
    ) -> WeeklyPlan {
        let capacity = week.capacity();
        tracing::info!(
            "開始週排產模擬：機台 {}，策略 {:?}，產能 {}h",
            machine_id,
            strategy,
            capacity
        );

        // Step 1: 群組需求彙總
        let mut demands = GroupDemand::collect(table, machine_id);
        demands.sort_by(|a, b| {
            kanban_core::metrics::compare_priority(a.priority, b.priority)
                .then_with(|| a.group_id.cmp(&b.group_id))
        });
        tracing::debug!("群組數量: {}", demands.len());

        // Step 2: 依策略分配數量
        let quantities =
            QuantityPlanner::allocate(&demands, strategy, capacity, self.config.changeover_hours);

        let entries: Vec<PlanEntry> = demands
            .iter()
            .zip(quantities)
            .map(|(demand, quantity)| self.entry_for(demand, quantity))
            .collect();

        // Step 3: 日曆排程（依優先順序）
        let (slots, unplaced) = CalendarScheduler::place(&entries, week);

        // Step 4: 產能分析
        let total_production_hours: Decimal = entries.iter().map(|e| e.production_hours).sum();
        let total_changeover_hours: Decimal = entries.iter().map(|e| e.changeover_hours).sum();
        let total_hours = total_production_hours + total_changeover_hours;
        let excess = CapacityAnalyzer::excess_hours(total_hours, capacity);
        let over_capacity = excess > Decimal::ZERO || !unplaced.is_empty();
        let deferrals = if over_capacity {
            CapacityAnalyzer::suggest_deferrals(&entries, excess)
        } else {
            Vec::new()
        };

        if over_capacity {
            tracing::warn!(
                "機台 {} 計劃超出產能：{}h / {}h，未排入 {} 項",
                machine_id,
                total_hours,
                capacity,
                unplaced.len()
            );
        }

        let plan = WeeklyPlan {
            machine_id: machine_id.to_string(),
            strategy,
            entries,
            capacity_available: capacity,
            total_production_hours,
            total_changeover_hours,
            utilization_percent: CapacityAnalyzer::utilization_percent(total_hours, capacity),
            over_capacity,
            slots,
            unplaced,
            deferrals,
        };

        tracing::info!(
            "週排產模擬完成：排產群組 {}，利用率 {}%",
            plan.assigned_entries().count(),
            plan.utilization_percent
        );

        plan
    }

    fn entry_for(&self, demand: &GroupDemand, quantity: u32) -> PlanEntry {
        if quantity == 0 {
            return PlanEntry::unassigned(demand.group_id.clone(), demand.priority, demand.shortfall);
        }

        let production_hours = QuantityPlanner::production_hours(quantity, demand.rate);
        let changeover_hours = self.config.changeover_hours;

        PlanEntry {
            group_id: demand.group_id.clone(),
            priority: demand.priority,
            shortfall: demand.shortfall,
            assigned_quantity: quantity,
            production_hours,
            changeover_hours,
            total_hours: production_hours + changeover_hours,
        }
    }

    /// 獲取配置引用
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }
}

impl Default for WeeklyPlanSimulator {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}
