//! 庫存快照

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// 庫存快照（零件編號 → 現有數量）
///
/// 由呼叫端擁有；計算過程只讀取，不修改。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    quantities: HashMap<String, u32>,
}

/// 與目錄同步的結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// 新增的零件（以 0 起始）
    pub added: Vec<String>,
    /// 已不在目錄中而移除的零件
    pub removed: Vec<String>,
}

impl ReconcileReport {
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl InventorySnapshot {
    /// 創建空的庫存快照
    pub fn new() -> Self {
        Self::default()
    }

    /// 以目錄中所有零件建立初始快照（數量皆為 0）
    pub fn zeroed(catalog: &Catalog) -> Self {
        catalog.part_ids().into_iter().map(|part| (part, 0)).collect()
    }

    /// 建構器模式：設置零件數量
    pub fn with_quantity(mut self, part_id: impl Into<String>, quantity: u32) -> Self {
        self.set(part_id, quantity);
        self
    }

    /// 設置零件數量
    pub fn set(&mut self, part_id: impl Into<String>, quantity: u32) {
        self.quantities.insert(part_id.into(), quantity);
    }

    /// 查詢零件數量（缺少時回傳 `None`）
    pub fn get(&self, part_id: &str) -> Option<u32> {
        self.quantities.get(part_id).copied()
    }

    pub fn contains(&self, part_id: &str) -> bool {
        self.quantities.contains_key(part_id)
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// 依零件編號排序的數量列表
    pub fn sorted(&self) -> BTreeMap<&str, u32> {
        self.quantities
            .iter()
            .map(|(part, qty)| (part.as_str(), *qty))
            .collect()
    }

    /// 與目錄同步，產生新的快照
    ///
    /// 保留現有數量、新零件以 0 加入、移除目錄中已不存在的零件。
    /// 原快照不被修改。
    pub fn reconcile(&self, catalog: &Catalog) -> (Self, ReconcileReport) {
        let part_ids = catalog.part_ids();
        let mut report = ReconcileReport::default();
        let mut reconciled = Self::new();

        for part_id in &part_ids {
            let quantity = match self.get(part_id) {
                Some(qty) => qty,
                None => {
                    report.added.push(part_id.clone());
                    0
                }
            };
            reconciled.set(part_id.clone(), quantity);
        }

        let mut removed: Vec<String> = self
            .quantities
            .keys()
            .filter(|part| !reconciled.contains(part))
            .cloned()
            .collect();
        removed.sort();
        report.removed = removed;

        if !report.is_unchanged() {
            tracing::info!(
                "庫存同步：新增 {} 項，移除 {} 項",
                report.added.len(),
                report.removed.len()
            );
        }

        (reconciled, report)
    }
}

impl FromIterator<(String, u32)> for InventorySnapshot {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self {
            quantities: iter.into_iter().collect(),
        }
    }
}

impl From<HashMap<String, u32>> for InventorySnapshot {
    fn from(quantities: HashMap<String, u32>) -> Self {
        Self { quantities }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogRecord;
    use rust_decimal::Decimal;

    fn catalog(parts: &[&str]) -> Catalog {
        let (catalog, _) = Catalog::from_records(
            parts
                .iter()
                .map(|p| CatalogRecord::new(*p, "M1", 10, 100, Decimal::from(60))),
        );
        catalog
    }

    #[test]
    fn test_create_snapshot() {
        let snapshot = InventorySnapshot::new()
            .with_quantity("A", 10)
            .with_quantity("B", 0);

        assert_eq!(snapshot.get("A"), Some(10));
        assert_eq!(snapshot.get("B"), Some(0));
        assert_eq!(snapshot.get("C"), None);
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_zeroed_snapshot() {
        let snapshot = InventorySnapshot::zeroed(&catalog(&["A", "B"]));

        assert_eq!(snapshot.get("A"), Some(0));
        assert_eq!(snapshot.get("B"), Some(0));
    }

    #[test]
    fn test_reconcile_adds_and_removes() {
        let snapshot = InventorySnapshot::new()
            .with_quantity("A", 25)
            .with_quantity("OBSOLETE", 7);

        let (reconciled, report) = snapshot.reconcile(&catalog(&["A", "NEW"]));

        assert_eq!(reconciled.get("A"), Some(25));
        assert_eq!(reconciled.get("NEW"), Some(0));
        assert!(!reconciled.contains("OBSOLETE"));
        assert_eq!(report.added, vec!["NEW".to_string()]);
        assert_eq!(report.removed, vec!["OBSOLETE".to_string()]);

        // 原快照不變
        assert_eq!(snapshot.get("OBSOLETE"), Some(7));
    }

    #[test]
    fn test_reconcile_unchanged() {
        let snapshot = InventorySnapshot::new().with_quantity("A", 1);
        let (reconciled, report) = snapshot.reconcile(&catalog(&["A"]));

        assert!(report.is_unchanged());
        assert_eq!(reconciled, snapshot);
    }
}
