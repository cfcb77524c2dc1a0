//! 機台內優先順序排名

use std::collections::{BTreeMap, HashMap};

use kanban_core::MetricsTable;
use rust_decimal::Decimal;

/// 優先順序排名器
///
/// 每台機台獨立排名：以群組內最大需生產工時由大到小排序，
/// 工時相同時以群組ID遞增排序，給予 1..K 的連續名次。
pub struct PriorityRanker;

impl PriorityRanker {
    /// 為指標表加上優先順序
    ///
    /// `groups` 為零件 → 群組的對應；未列出的零件沿用資料列上的群組ID。
    pub fn rank(table: &MetricsTable, groups: &HashMap<String, String>) -> MetricsTable {
        let mut ranked = table.clone();

        for record in ranked.records_mut() {
            if let Some(group_id) = groups.get(&record.part_id) {
                record.group_id = group_id.clone();
            }
            record.priority = None;
        }

        let priorities = Self::machine_priorities(&ranked);

        for record in ranked.records_mut() {
            if record.has_shortfall() {
                record.priority = priorities
                    .get(&(record.machine_id.clone(), record.group_id.clone()))
                    .copied();
            }
        }

        ranked
    }

    /// 計算 (機台, 群組) → 名次
    fn machine_priorities(table: &MetricsTable) -> HashMap<(String, String), u32> {
        // 機台 → 群組 → 群組工時（成員最大值）
        let mut group_times: BTreeMap<&str, BTreeMap<&str, Decimal>> = BTreeMap::new();

        for record in table.records().iter().filter(|r| r.has_shortfall()) {
            let time = group_times
                .entry(record.machine_id.as_str())
                .or_default()
                .entry(record.group_id.as_str())
                .or_insert(Decimal::ZERO);
            *time = (*time).max(record.required_hours);
        }

        let mut priorities = HashMap::new();

        for (machine_id, groups) in group_times {
            let mut ordered: Vec<(&str, Decimal)> = groups.into_iter().collect();
            // BTreeMap 已依群組ID排序，穩定排序保留為次要鍵
            ordered.sort_by(|a, b| b.1.cmp(&a.1));

            for (rank, (group_id, time)) in ordered.into_iter().enumerate() {
                let priority = rank as u32 + 1;
                tracing::debug!(
                    "機台 {} 群組 {} 工時 {} → 優先順序 {}",
                    machine_id,
                    group_id,
                    time,
                    priority
                );
                priorities.insert((machine_id.to_string(), group_id.to_string()), priority);
            }
        }

        priorities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::PairingResolver;
    use crate::shortfall::ShortfallCalculator;
    use kanban_core::{Catalog, CatalogRecord, InventorySnapshot, PlannerConfig};
    use proptest::prelude::*;

    fn ranked(rows: Vec<CatalogRecord>, inventory: InventorySnapshot) -> MetricsTable {
        let (catalog, _) = Catalog::from_records(rows);
        let (table, _) = ShortfallCalculator::compute(&catalog, &inventory);
        let config = PlannerConfig::default();
        let groups = PairingResolver::new(&config).resolve_groups(catalog.part_ids());
        PriorityRanker::rank(&table, &groups)
    }

    #[test]
    fn test_rank_by_required_hours() {
        let table = ranked(
            vec![
                CatalogRecord::new("SMALL", "M1", 10, 100, Decimal::from(100)),
                CatalogRecord::new("LARGE", "M1", 10, 1000, Decimal::from(100)),
                CatalogRecord::new("MEDIUM", "M1", 10, 500, Decimal::from(100)),
            ],
            InventorySnapshot::new()
                .with_quantity("SMALL", 0)
                .with_quantity("LARGE", 0)
                .with_quantity("MEDIUM", 0),
        );

        assert_eq!(table.get("LARGE", "M1").unwrap().priority, Some(1));
        assert_eq!(table.get("MEDIUM", "M1").unwrap().priority, Some(2));
        assert_eq!(table.get("SMALL", "M1").unwrap().priority, Some(3));
    }

    #[test]
    fn test_pair_shares_priority_and_uses_max_time() {
        let table = ranked(
            vec![
                CatalogRecord::new("DOOR LH", "M1", 10, 600, Decimal::from(100)),
                CatalogRecord::new("DOOR RH", "M1", 10, 100, Decimal::from(100)),
                CatalogRecord::new("HOOD", "M1", 10, 400, Decimal::from(100)),
            ],
            InventorySnapshot::new()
                .with_quantity("DOOR LH", 0)
                .with_quantity("DOOR RH", 0)
                .with_quantity("HOOD", 0),
        );

        // DOOR 群組工時 = max(6, 1) = 6 > HOOD 的 4
        assert_eq!(table.get("DOOR LH", "M1").unwrap().priority, Some(1));
        assert_eq!(table.get("DOOR RH", "M1").unwrap().priority, Some(1));
        assert_eq!(table.get("HOOD", "M1").unwrap().priority, Some(2));
    }

    #[test]
    fn test_no_shortfall_gets_none() {
        let table = ranked(
            vec![
                CatalogRecord::new("DOOR LH", "M1", 10, 600, Decimal::from(100)),
                CatalogRecord::new("DOOR RH", "M1", 10, 100, Decimal::from(100)),
            ],
            InventorySnapshot::new()
                .with_quantity("DOOR LH", 0)
                .with_quantity("DOOR RH", 100),
        );

        assert_eq!(table.get("DOOR LH", "M1").unwrap().priority, Some(1));
        // 同群組但無缺口，不給名次（絕不為 0）
        assert_eq!(table.get("DOOR RH", "M1").unwrap().priority, None);
    }

    #[test]
    fn test_ranked_independently_per_machine() {
        let table = ranked(
            vec![
                CatalogRecord::new("SHARED", "M1", 10, 100, Decimal::from(10)),
                CatalogRecord::new("BIG", "M1", 10, 1000, Decimal::from(10)),
                CatalogRecord::new("SHARED", "M2", 10, 100, Decimal::from(10)),
            ],
            InventorySnapshot::new()
                .with_quantity("SHARED", 0)
                .with_quantity("BIG", 0),
        );

        assert_eq!(table.get("BIG", "M1").unwrap().priority, Some(1));
        assert_eq!(table.get("SHARED", "M1").unwrap().priority, Some(2));
        assert_eq!(table.get("SHARED", "M2").unwrap().priority, Some(1));
    }

    #[test]
    fn test_tie_broken_by_group_id() {
        let table = ranked(
            vec![
                CatalogRecord::new("ZETA", "M1", 10, 100, Decimal::from(10)),
                CatalogRecord::new("ALPHA", "M1", 10, 100, Decimal::from(10)),
            ],
            InventorySnapshot::new()
                .with_quantity("ZETA", 0)
                .with_quantity("ALPHA", 0),
        );

        assert_eq!(table.get("ALPHA", "M1").unwrap().priority, Some(1));
        assert_eq!(table.get("ZETA", "M1").unwrap().priority, Some(2));
    }

    #[test]
    fn test_rank_is_idempotent() {
        let table = ranked(
            vec![
                CatalogRecord::new("A-LH", "M1", 40, 978, Decimal::from(120)),
                CatalogRecord::new("A-RH", "M1", 40, 978, Decimal::from(120)),
            ],
            InventorySnapshot::new()
                .with_quantity("A-LH", 0)
                .with_quantity("A-RH", 0),
        );
        let groups: HashMap<String, String> = table
            .records()
            .iter()
            .map(|r| (r.part_id.clone(), r.group_id.clone()))
            .collect();

        assert_eq!(PriorityRanker::rank(&table, &groups), table);
    }

    proptest! {
        #[test]
        fn prop_priorities_dense_per_machine(
            rows in prop::collection::vec((0usize..12, 0usize..3, 0u32..500, 1u32..50), 1..30)
        ) {
            let catalog_rows: Vec<CatalogRecord> = rows
                .iter()
                .map(|(part, machine, target, rate)| {
                    CatalogRecord::new(
                        format!("P{}", part),
                        format!("M{}", machine),
                        10,
                        *target,
                        Decimal::from(*rate),
                    )
                })
                .collect();
            let inventory: InventorySnapshot =
                (0..12).map(|p| (format!("P{}", p), 100)).collect();

            let table = ranked(catalog_rows, inventory);

            for machine in table.machines() {
                let mut seen: BTreeMap<String, u32> = BTreeMap::new();
                for record in table.for_machine(&machine) {
                    match record.priority {
                        Some(p) => {
                            prop_assert!(record.has_shortfall());
                            seen.insert(record.group_id.clone(), p);
                        }
                        None => prop_assert!(!record.has_shortfall()),
                    }
                }
                let mut values: Vec<u32> = seen.values().copied().collect();
                values.sort_unstable();
                let expected: Vec<u32> = (1..=seen.len() as u32).collect();
                prop_assert_eq!(values, expected);
            }
        }
    }
}
