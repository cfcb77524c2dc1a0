//! 週排產計劃模型

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 排產策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanStrategy {
    /// 缺口大者優先
    ShortfallFirst,
    /// 優先順序高者優先
    PriorityFirst,
    /// 所有群組按比例分配最低量
    MinimalForAll,
}

impl PlanStrategy {
    pub const ALL: [PlanStrategy; 3] = [
        PlanStrategy::ShortfallFirst,
        PlanStrategy::PriorityFirst,
        PlanStrategy::MinimalForAll,
    ];
}

/// 群組排產量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub group_id: String,

    /// 群組優先順序（無缺口為 `None`）
    pub priority: Option<u32>,

    /// 群組缺口
    pub shortfall: u32,

    /// 排產數量（StdPack 的倍數）
    pub assigned_quantity: u32,

    pub production_hours: Decimal,

    /// 換線時間，只有排產數量 > 0 才計入
    pub changeover_hours: Decimal,

    pub total_hours: Decimal,
}

impl PlanEntry {
    /// 未排產的群組
    pub fn unassigned(group_id: String, priority: Option<u32>, shortfall: u32) -> Self {
        Self {
            group_id,
            priority,
            shortfall,
            assigned_quantity: 0,
            production_hours: Decimal::ZERO,
            changeover_hours: Decimal::ZERO,
            total_hours: Decimal::ZERO,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_quantity > 0
    }

    /// 排產量是否涵蓋缺口
    pub fn covers_shortfall(&self) -> bool {
        self.assigned_quantity >= self.shortfall
    }
}

/// 日曆時段（某天某班的某群組工時）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarSlot {
    /// 第幾天（0 起算）
    pub day: u32,
    pub weekday: Weekday,
    /// 第幾班（0 起算）
    pub shift: u32,
    pub group_id: String,
    pub hours: Decimal,
}

/// 日曆排不下的剩餘工時
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnplacedWork {
    pub group_id: String,
    pub hours: Decimal,
}

/// 建議延後的群組（僅供參考，不會自動截斷計劃）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deferral {
    pub group_id: String,
    pub priority: Option<u32>,
    pub hours: Decimal,
}

/// 週排產計劃（單一機台、單次模擬）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub machine_id: String,
    pub strategy: PlanStrategy,

    /// 所有群組（含排產量為 0 者）
    pub entries: Vec<PlanEntry>,

    pub capacity_available: Decimal,
    pub total_production_hours: Decimal,
    pub total_changeover_hours: Decimal,

    /// 產能利用率（百分比）
    pub utilization_percent: Decimal,

    pub over_capacity: bool,

    pub slots: Vec<CalendarSlot>,
    pub unplaced: Vec<UnplacedWork>,

    /// 超出產能時的建議延後清單
    pub deferrals: Vec<Deferral>,
}

impl WeeklyPlan {
    /// 計劃總工時（生產 + 換線）
    pub fn total_hours(&self) -> Decimal {
        self.total_production_hours + self.total_changeover_hours
    }

    /// 有排產量的群組
    pub fn assigned_entries(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter().filter(|e| e.is_assigned())
    }

    pub fn entry(&self, group_id: &str) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.group_id == group_id)
    }

    /// 指定群組在日曆上的時段
    pub fn slots_for<'a>(&'a self, group_id: &'a str) -> impl Iterator<Item = &'a CalendarSlot> + 'a {
        self.slots.iter().filter(move |s| s.group_id == group_id)
    }

    /// 沒有任何排產量
    pub fn is_empty(&self) -> bool {
        self.assigned_entries().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unassigned_entry() {
        let entry = PlanEntry::unassigned("HOOD".to_string(), None, 0);

        assert!(!entry.is_assigned());
        assert!(entry.covers_shortfall());
        assert_eq!(entry.total_hours, Decimal::ZERO);
    }

    #[test]
    fn test_partial_entry_does_not_cover() {
        let entry = PlanEntry {
            group_id: "DOOR".to_string(),
            priority: Some(1),
            shortfall: 500,
            assigned_quantity: 400,
            production_hours: Decimal::from(4),
            changeover_hours: Decimal::ONE,
            total_hours: Decimal::from(5),
        };

        assert!(entry.is_assigned());
        assert!(!entry.covers_shortfall());
    }

    #[test]
    fn test_strategy_list() {
        assert_eq!(PlanStrategy::ALL.len(), 3);
        assert_eq!(PlanStrategy::ALL[0], PlanStrategy::ShortfallFirst);
    }
}
