//! # Kanban Planner
//!
//! 週排產模擬（數量分配、產能、日曆排程）

pub mod capacity;
pub mod demand;
pub mod quantity;
pub mod scheduling;
pub mod simulator;

// Re-export 主要類型
pub use capacity::CapacityAnalyzer;
pub use demand::GroupDemand;
pub use quantity::QuantityPlanner;
pub use scheduling::CalendarScheduler;
pub use simulator::WeeklyPlanSimulator;
