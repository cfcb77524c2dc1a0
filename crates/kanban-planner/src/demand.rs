//! 機台群組需求彙總

use std::collections::BTreeMap;

use kanban_core::{MetricsRecord, MetricsTable};
use rust_decimal::Decimal;

/// 單一機台上一個生產群組的需求
///
/// 左右件同時生產，群組的缺口、每箱數量與速率取自需生產工時最長的成員
/// （工時相同時取零件編號最小者）。
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDemand {
    pub group_id: String,
    pub priority: Option<u32>,
    pub shortfall: u32,
    pub std_pack: u32,
    pub rate: Decimal,
    pub required_hours: Decimal,
    /// 成員零件（依編號排序）
    pub part_ids: Vec<String>,
}

impl GroupDemand {
    /// 彙總指定機台的群組需求，依群組ID排序
    pub fn collect(table: &MetricsTable, machine_id: &str) -> Vec<GroupDemand> {
        let mut groups: BTreeMap<&str, Vec<&MetricsRecord>> = BTreeMap::new();
        for record in table.for_machine(machine_id) {
            groups.entry(record.group_id.as_str()).or_default().push(record);
        }

        groups
            .into_iter()
            .filter_map(|(group_id, mut members)| {
                members.sort_by(|a, b| a.part_id.cmp(&b.part_id));
                Self::from_members(group_id, &members)
            })
            .collect()
    }

    fn from_members(group_id: &str, members: &[&MetricsRecord]) -> Option<GroupDemand> {
        let driver = members.iter().copied().reduce(|best, candidate| {
            if candidate.required_hours > best.required_hours {
                candidate
            } else {
                best
            }
        })?;

        let priority = members.iter().filter_map(|r| r.priority).min();

        Some(GroupDemand {
            group_id: group_id.to_string(),
            priority,
            shortfall: driver.shortfall,
            std_pack: driver.std_pack,
            rate: driver.rate,
            required_hours: driver.required_hours,
            part_ids: members.iter().map(|r| r.part_id.clone()).collect(),
        })
    }

    pub fn has_shortfall(&self) -> bool {
        self.shortfall > 0
    }
}
