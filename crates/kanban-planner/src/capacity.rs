//! 產能分析（利用率、超載延後建議）

use std::cmp::Ordering;

use kanban_core::{Deferral, PlanEntry};
use rust_decimal::Decimal;

/// 利用率保留的小數位數
const UTILIZATION_DP: u32 = 2;

/// 產能分析器
pub struct CapacityAnalyzer;

impl CapacityAnalyzer {
    /// 利用率（百分比）= 計劃總工時 / 產能 × 100
    pub fn utilization_percent(total_hours: Decimal, capacity: Decimal) -> Decimal {
        if capacity <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (total_hours / capacity * Decimal::ONE_HUNDRED).round_dp(UTILIZATION_DP)
    }

    /// 超出產能的工時（未超出為 0）
    pub fn excess_hours(total_hours: Decimal, capacity: Decimal) -> Decimal {
        (total_hours - capacity).max(Decimal::ZERO)
    }

    /// 建議延後清單
    ///
    /// 最不急的群組優先（無優先順序者視為最不急），同急迫度時工時長者優先，
    /// 累計到工時總和不小於超出量為止。僅供參考，計劃本身不被截斷。
    pub fn suggest_deferrals(entries: &[PlanEntry], excess: Decimal) -> Vec<Deferral> {
        if excess <= Decimal::ZERO {
            return Vec::new();
        }

        let mut candidates: Vec<&PlanEntry> = entries.iter().filter(|e| e.is_assigned()).collect();
        candidates.sort_by(|a, b| {
            Self::least_urgent_first(a.priority, b.priority)
                .then_with(|| b.total_hours.cmp(&a.total_hours))
                .then_with(|| a.group_id.cmp(&b.group_id))
        });

        let mut deferrals = Vec::new();
        let mut accumulated = Decimal::ZERO;

        for entry in candidates {
            if accumulated >= excess {
                break;
            }
            accumulated += entry.total_hours;
            deferrals.push(Deferral {
                group_id: entry.group_id.clone(),
                priority: entry.priority,
                hours: entry.total_hours,
            });
        }

        deferrals
    }

    fn least_urgent_first(a: Option<u32>, b: Option<u32>) -> Ordering {
        kanban_core::metrics::compare_priority(a, b).reverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(group: &str, priority: Option<u32>, total: u32) -> PlanEntry {
        PlanEntry {
            group_id: group.to_string(),
            priority,
            shortfall: 100,
            assigned_quantity: 100,
            production_hours: Decimal::from(total - 1),
            changeover_hours: Decimal::ONE,
            total_hours: Decimal::from(total),
        }
    }

    #[test]
    fn test_utilization() {
        let utilization =
            CapacityAnalyzer::utilization_percent(Decimal::new(915, 2), Decimal::from(126));

        assert_eq!(utilization, Decimal::new(726, 2));
        assert_eq!(utilization.round_dp(1), Decimal::new(73, 1));
        assert_eq!(
            CapacityAnalyzer::utilization_percent(Decimal::from(5), Decimal::ZERO),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_excess_hours() {
        assert_eq!(
            CapacityAnalyzer::excess_hours(Decimal::from(50), Decimal::from(40)),
            Decimal::from(10)
        );
        assert_eq!(
            CapacityAnalyzer::excess_hours(Decimal::from(30), Decimal::from(40)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_deferrals_least_urgent_first() {
        let entries = vec![
            entry("URGENT", Some(1), 10),
            entry("MIDDLE", Some(2), 4),
            entry("LOW-SHORT", Some(3), 2),
            entry("LOW-LONG", Some(3), 5),
        ];

        let deferrals = CapacityAnalyzer::suggest_deferrals(&entries, Decimal::from(6));
        let groups: Vec<&str> = deferrals.iter().map(|d| d.group_id.as_str()).collect();

        // 5 < 6 → 再加 2 → 7 ≥ 6
        assert_eq!(groups, vec!["LOW-LONG", "LOW-SHORT"]);
    }

    #[test]
    fn test_no_deferrals_without_excess() {
        let entries = vec![entry("A", Some(1), 10)];
        assert!(CapacityAnalyzer::suggest_deferrals(&entries, Decimal::ZERO).is_empty());
    }
}
