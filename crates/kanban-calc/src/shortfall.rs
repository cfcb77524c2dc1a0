//! 缺口計算

use kanban_core::{
    CalcWarning, Catalog, InventorySnapshot, KanbanError, MetricsRecord, MetricsTable,
    WarningSeverity,
};
use rust_decimal::Decimal;

/// 缺口計算器
pub struct ShortfallCalculator;

impl ShortfallCalculator {
    /// 計算每個 (零件, 機台) 的缺口、箱數與工時
    ///
    /// 庫存快照缺少的零件以 0 代入並標記，同時回傳警告；
    /// 計算不會因此中斷。
    pub fn compute(
        catalog: &Catalog,
        inventory: &InventorySnapshot,
    ) -> (MetricsTable, Vec<CalcWarning>) {
        let mut records = Vec::with_capacity(catalog.len());
        let mut warnings = Vec::new();

        for row in catalog.records() {
            let (on_hand, missing) = match inventory.get(&row.part_id) {
                Some(qty) => (qty, false),
                None => {
                    let error = KanbanError::MissingInventoryEntry(row.part_id.clone());
                    tracing::warn!("{}，以 0 計算", error);
                    warnings.extend(
                        CalcWarning::from_error(&error, WarningSeverity::Warning).map(|w| {
                            CalcWarning {
                                machine_id: Some(row.machine_id.clone()),
                                ..w
                            }
                        }),
                    );
                    (0, true)
                }
            };

            let mut record = MetricsRecord::from_catalog(row, on_hand, missing);
            record.shortfall = Self::shortfall(row.target, on_hand);
            record.required_boxes = Self::required_boxes(record.shortfall, row.std_pack);
            record.required_hours = Self::required_hours(record.shortfall, row.rate);
            records.push(record);
        }

        (MetricsTable::new(records), warnings)
    }

    /// 缺口 = max(0, 目標 - 庫存)
    pub fn shortfall(target: u32, inventory: u32) -> u32 {
        target.saturating_sub(inventory)
    }

    /// 需生產箱數 = ceil(缺口 / 每箱數量)
    pub fn required_boxes(shortfall: u32, std_pack: u32) -> u32 {
        if shortfall == 0 || std_pack == 0 {
            return 0;
        }
        shortfall.div_ceil(std_pack)
    }

    /// 需生產工時 = 缺口 / 速率；速率為 0 時回傳 0
    pub fn required_hours(shortfall: u32, rate: Decimal) -> Decimal {
        if rate.is_zero() {
            return Decimal::ZERO;
        }
        Decimal::from(shortfall) / rate
    }
}
