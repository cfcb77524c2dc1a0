//! 指標表模型（計算結果）

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogRecord;

/// 單一 (零件, 機台) 的指標
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub part_id: String,
    pub machine_id: String,
    pub std_pack: u32,
    pub target: u32,
    pub rate: Decimal,

    /// 現有庫存（快照缺少時為 0）
    pub inventory: u32,

    /// 庫存快照缺少此零件
    pub inventory_missing: bool,

    /// 缺口 = max(0, 目標 - 庫存)
    pub shortfall: u32,

    /// 需生產箱數
    pub required_boxes: u32,

    /// 需生產時間（小時）
    pub required_hours: Decimal,

    /// 生產群組ID（左右件共用）
    pub group_id: String,

    /// 機台內優先順序（1 最急），無缺口為 `None`
    pub priority: Option<u32>,
}

impl MetricsRecord {
    /// 由目錄資料列建立，群組預設為零件本身
    pub fn from_catalog(record: &CatalogRecord, inventory: u32, inventory_missing: bool) -> Self {
        Self {
            part_id: record.part_id.clone(),
            machine_id: record.machine_id.clone(),
            std_pack: record.std_pack,
            target: record.target,
            rate: record.rate,
            inventory,
            inventory_missing,
            shortfall: 0,
            required_boxes: 0,
            required_hours: Decimal::ZERO,
            group_id: record.part_id.clone(),
            priority: None,
        }
    }

    pub fn has_shortfall(&self) -> bool {
        self.shortfall > 0
    }
}

/// 機台的下一個工作
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextJob {
    pub machine_id: String,
    pub group_id: String,

    /// 群組內零件編號最小者
    pub lead_part_id: String,

    /// 群組內有缺口的所有零件（依編號排序）
    pub part_ids: Vec<String>,

    pub inventory: u32,
    pub target: u32,
    pub required_boxes: u32,
    pub required_hours: Decimal,
    pub priority: u32,
}

/// 機台狀態
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MachineAssignment {
    /// 有待生產的群組
    Busy(NextJob),
    /// 無缺口，機台空閒
    Free { machine_id: String },
}

impl MachineAssignment {
    pub fn machine_id(&self) -> &str {
        match self {
            Self::Busy(job) => &job.machine_id,
            Self::Free { machine_id } => machine_id,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free { .. })
    }
}

/// 指標表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsTable {
    records: Vec<MetricsRecord>,
}

impl MetricsTable {
    pub fn new(records: Vec<MetricsRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[MetricsRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [MetricsRecord] {
        &mut self.records
    }

    pub fn into_records(self) -> Vec<MetricsRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 查詢 (零件, 機台) 的指標
    pub fn get(&self, part_id: &str, machine_id: &str) -> Option<&MetricsRecord> {
        self.records
            .iter()
            .find(|r| r.part_id == part_id && r.machine_id == machine_id)
    }

    /// 指定機台的所有資料列
    pub fn for_machine<'a>(
        &'a self,
        machine_id: &'a str,
    ) -> impl Iterator<Item = &'a MetricsRecord> + 'a {
        self.records.iter().filter(move |r| r.machine_id == machine_id)
    }

    /// 所有機台（排序、去重）
    pub fn machines(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.machine_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// 機台的下一個工作：優先順序 1 的群組
    ///
    /// 以零件編號最小者作為代表零件。
    pub fn next_job(&self, machine_id: &str) -> Option<NextJob> {
        let mut members: Vec<&MetricsRecord> = self
            .for_machine(machine_id)
            .filter(|r| r.has_shortfall() && r.priority == Some(1))
            .collect();
        members.sort_by(|a, b| a.part_id.cmp(&b.part_id));

        let lead = *members.first()?;

        Some(NextJob {
            machine_id: machine_id.to_string(),
            group_id: lead.group_id.clone(),
            lead_part_id: lead.part_id.clone(),
            part_ids: members.iter().map(|r| r.part_id.clone()).collect(),
            inventory: lead.inventory,
            target: lead.target,
            required_boxes: lead.required_boxes,
            required_hours: lead.required_hours,
            priority: 1,
        })
    }

    /// 所有機台的狀態（依機台排序）
    pub fn machine_assignments(&self) -> Vec<MachineAssignment> {
        self.machines()
            .into_iter()
            .map(|machine_id| match self.next_job(&machine_id) {
                Some(job) => MachineAssignment::Busy(job),
                None => MachineAssignment::Free { machine_id },
            })
            .collect()
    }

    /// 生產總表：依 (機台, 優先順序) 排序，無優先順序者排最後
    pub fn production_table(&self) -> Vec<&MetricsRecord> {
        let mut rows: Vec<&MetricsRecord> = self.records.iter().collect();
        rows.sort_by(|a, b| {
            a.machine_id
                .cmp(&b.machine_id)
                .then_with(|| compare_priority(a.priority, b.priority))
                .then_with(|| a.part_id.cmp(&b.part_id))
        });
        rows
    }
}

/// 優先順序比較：數值小者在前，`None` 排最後
pub fn compare_priority(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
