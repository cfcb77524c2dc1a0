//! # Kanban Calculation Engine
//!
//! 缺口計算、左右件配對與機台優先順序

pub mod calculator;
pub mod pairing;
pub mod ranking;
pub mod shortfall;

// Re-export 主要類型
pub use calculator::MetricsCalculator;
pub use pairing::PairingResolver;
pub use ranking::PriorityRanker;
pub use shortfall::ShortfallCalculator;

use kanban_core::{CalcWarning, MetricsTable, WarningSeverity};

/// 指標計算結果
#[derive(Debug, Clone)]
pub struct MetricsResult {
    /// 指標表（含群組與優先順序）
    pub table: MetricsTable,

    /// 警告信息
    pub warnings: Vec<CalcWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl MetricsResult {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self {
            table: MetricsTable::default(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: CalcWarning) {
        self.warnings.push(warning);
    }

    /// 指定嚴重程度的警告
    pub fn warnings_with(&self, severity: WarningSeverity) -> impl Iterator<Item = &CalcWarning> {
        self.warnings.iter().filter(move |w| w.severity == severity)
    }

    pub fn has_errors(&self) -> bool {
        self.warnings.iter().any(|w| w.is_error())
    }
}
