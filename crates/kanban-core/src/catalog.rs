//! 零件目錄模型

use std::collections::{BTreeSet, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::warning::{CalcWarning, WarningKind, WarningSeverity};
use crate::KanbanError;

/// 零件-機台資料列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// 零件編號
    pub part_id: String,

    /// 機台ID
    pub machine_id: String,

    /// 每箱數量
    pub std_pack: u32,

    /// 目標庫存
    pub target: u32,

    /// 生產速率（件/小時）
    pub rate: Decimal,
}

impl CatalogRecord {
    /// 創建新的目錄資料列
    pub fn new(
        part_id: impl Into<String>,
        machine_id: impl Into<String>,
        std_pack: u32,
        target: u32,
        rate: Decimal,
    ) -> Self {
        Self {
            part_id: part_id.into(),
            machine_id: machine_id.into(),
            std_pack,
            target,
            rate,
        }
    }

    /// 檢查資料列是否可進入計算
    pub fn validate(&self) -> crate::Result<()> {
        let reason = if self.std_pack == 0 {
            "StdPack 必須大於 0"
        } else if self.rate <= Decimal::ZERO {
            "Rate 必須大於 0"
        } else {
            return Ok(());
        };

        Err(KanbanError::InvalidCatalogRow {
            part_id: self.part_id.clone(),
            machine_id: self.machine_id.clone(),
            reason: reason.to_string(),
        })
    }

    fn key(&self) -> (&str, &str) {
        (&self.part_id, &self.machine_id)
    }
}

/// 零件目錄（已驗證、已去重）
///
/// 序列化為資料列陣列；反序列化一律經過 [`Catalog::from_records`]。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CatalogRecord>", into = "Vec<CatalogRecord>")]
pub struct Catalog {
    records: Vec<CatalogRecord>,
}

impl Catalog {
    /// 由原始資料列建立目錄
    ///
    /// 無效資料列會被剔除；重複的 (零件, 機台) 保留第一筆。
    /// 兩者皆以警告回報，不中斷建立。
    pub fn from_records(
        rows: impl IntoIterator<Item = CatalogRecord>,
    ) -> (Self, Vec<CalcWarning>) {
        let mut records: Vec<CatalogRecord> = Vec::new();
        let mut warnings = Vec::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for row in rows {
            if let Err(error) = row.validate() {
                tracing::warn!("剔除目錄資料列: {}", error);
                warnings.extend(CalcWarning::from_error(&error, WarningSeverity::Error));
                continue;
            }

            let (part_id, machine_id) = row.key();
            if !seen.insert((part_id.to_string(), machine_id.to_string())) {
                tracing::debug!("重複資料列: {} @ {}", part_id, machine_id);
                warnings.push(CalcWarning::new(
                    row.part_id.clone(),
                    Some(row.machine_id.clone()),
                    WarningKind::DuplicateCatalogRow,
                    format!("重複的資料列 {} @ {}，保留第一筆", part_id, machine_id),
                    WarningSeverity::Info,
                ));
                continue;
            }

            records.push(row);
        }

        (Self { records }, warnings)
    }

    /// 所有資料列（保持輸入順序）
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
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

    /// 所有零件編號（排序、去重）
    pub fn part_ids(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.part_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl From<Vec<CatalogRecord>> for Catalog {
    /// 警告只記錄日誌，需要警告內容時請直接呼叫 `from_records`
    fn from(rows: Vec<CatalogRecord>) -> Self {
        let (catalog, warnings) = Self::from_records(rows);
        if !warnings.is_empty() {
            tracing::warn!("目錄載入時產生 {} 筆警告", warnings.len());
        }
        catalog
    }
}

impl From<Catalog> for Vec<CatalogRecord> {
    fn from(catalog: Catalog) -> Self {
        catalog.records
    }
}
