//! # Kanban Core
//!
//! 核心資料模型與類型定義

pub mod calendar;
pub mod catalog;
pub mod config;
pub mod inventory;
pub mod metrics;
pub mod plan;
pub mod warning;

// Re-export 主要類型
pub use calendar::ProductionWeek;
pub use catalog::{Catalog, CatalogRecord};
pub use config::PlannerConfig;
pub use inventory::{InventorySnapshot, ReconcileReport};
pub use metrics::{MachineAssignment, MetricsRecord, MetricsTable, NextJob};
pub use plan::{
    CalendarSlot, Deferral, PlanEntry, PlanStrategy, UnplacedWork, WeeklyPlan,
};
pub use warning::{CalcWarning, WarningKind, WarningSeverity};

/// 排產引擎錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum KanbanError {
    #[error("無效的目錄資料列 ({part_id} @ {machine_id}): {reason}")]
    InvalidCatalogRow {
        part_id: String,
        machine_id: String,
        reason: String,
    },

    #[error("庫存快照缺少零件: {0}")]
    MissingInventoryEntry(String),

    #[error("無效的產能參數: {0}")]
    InvalidCapacityParameters(String),

    #[error("配置解析錯誤: {0}")]
    ConfigError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KanbanError>;
