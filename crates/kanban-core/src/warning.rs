//! 計算警告

use serde::{Deserialize, Serialize};

use crate::KanbanError;

/// 警告種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// 目錄資料列無效（已剔除）
    InvalidCatalogRow,
    /// 庫存快照缺少零件（以 0 代入）
    MissingInventoryEntry,
    /// 重複的 (零件, 機台) 資料列（保留第一筆）
    DuplicateCatalogRow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}

/// 結構化警告，隨計算結果一併回傳，不會中斷計算
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcWarning {
    pub part_id: String,
    pub machine_id: Option<String>,
    pub kind: WarningKind,
    pub message: String,
    pub severity: WarningSeverity,
}

impl CalcWarning {
    pub fn new(
        part_id: String,
        machine_id: Option<String>,
        kind: WarningKind,
        message: String,
        severity: WarningSeverity,
    ) -> Self {
        Self {
            part_id,
            machine_id,
            kind,
            message,
            severity,
        }
    }

    /// 由資料列層級的錯誤轉為警告（錯誤本身已被局部處理）
    ///
    /// 非資料列層級的錯誤（如產能參數）不可降級為警告，回傳 `None`。
    pub fn from_error(error: &KanbanError, severity: WarningSeverity) -> Option<Self> {
        let (part_id, machine_id, kind) = match error {
            KanbanError::InvalidCatalogRow {
                part_id,
                machine_id,
                ..
            } => (
                part_id.clone(),
                Some(machine_id.clone()),
                WarningKind::InvalidCatalogRow,
            ),
            KanbanError::MissingInventoryEntry(part_id) => {
                (part_id.clone(), None, WarningKind::MissingInventoryEntry)
            }
            _ => return None,
        };

        Some(Self::new(part_id, machine_id, kind, error.to_string(), severity))
    }

    pub fn is_error(&self) -> bool {
        self.severity == WarningSeverity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_from_missing_inventory() {
        let error = KanbanError::MissingInventoryEntry("BRACKET LH".to_string());
        let warning = CalcWarning::from_error(&error, WarningSeverity::Warning).unwrap();

        assert_eq!(warning.part_id, "BRACKET LH");
        assert_eq!(warning.machine_id, None);
        assert_eq!(warning.kind, WarningKind::MissingInventoryEntry);
        assert!(warning.message.contains("BRACKET LH"));
        assert!(!warning.is_error());
    }

    #[test]
    fn test_warning_from_invalid_row() {
        let error = KanbanError::InvalidCatalogRow {
            part_id: "P-1".to_string(),
            machine_id: "M1".to_string(),
            reason: "StdPack 必須大於 0".to_string(),
        };
        let warning = CalcWarning::from_error(&error, WarningSeverity::Error).unwrap();

        assert_eq!(warning.machine_id, Some("M1".to_string()));
        assert_eq!(warning.kind, WarningKind::InvalidCatalogRow);
        assert!(warning.is_error());
    }

    #[test]
    fn test_capacity_error_is_not_a_warning() {
        let error = KanbanError::InvalidCapacityParameters("days = 0".to_string());
        assert!(CalcWarning::from_error(&error, WarningSeverity::Error).is_none());
    }
}
