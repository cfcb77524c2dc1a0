//! # Kanban
//!
//! 看板式現場排產引擎：缺口計算、左右件配對、機台優先順序與週排產模擬。
//!
//! ```no_run
//! use kanban::prelude::*;
//!
//! kanban::logging::init();
//! let rows = vec![CatalogRecord::new("A", "M1", 6, 978, rust_decimal::Decimal::from(120))];
//! let inventory = InventorySnapshot::new().with_quantity("A", 0);
//! let result = MetricsCalculator::default().calculate_rows(rows, &inventory);
//! ```

pub mod logging;

pub use kanban_calc;
pub use kanban_core;
pub use kanban_planner;

/// 常用類型
pub mod prelude {
    pub use kanban_calc::{MetricsCalculator, MetricsResult};
    pub use kanban_core::{
        Catalog, CatalogRecord, InventorySnapshot, KanbanError, MachineAssignment, MetricsTable,
        PlanStrategy, PlannerConfig, WeeklyPlan,
    };
    pub use kanban_planner::WeeklyPlanSimulator;
}
