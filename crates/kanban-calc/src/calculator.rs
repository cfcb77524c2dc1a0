//! 指標主計算器

use kanban_core::{Catalog, CatalogRecord, InventorySnapshot, PlannerConfig};

use crate::pairing::PairingResolver;
use crate::ranking::PriorityRanker;
use crate::shortfall::ShortfallCalculator;
use crate::MetricsResult;

/// 指標計算器：缺口 → 配對 → 排名
pub struct MetricsCalculator {
    /// 排產配置
    config: PlannerConfig,
}

impl MetricsCalculator {
    /// 創建新的指標計算器
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// 主計算入口
    pub fn calculate(&self, catalog: &Catalog, inventory: &InventorySnapshot) -> MetricsResult {
        tracing::info!(
            "開始指標計算：目錄 {} 筆，庫存 {} 筆",
            catalog.len(),
            inventory.len()
        );

        let start_time = std::time::Instant::now();
        let mut result = MetricsResult::empty();

        // Step 1: 缺口計算
        tracing::debug!("Step 1: 缺口計算");
        let (table, warnings) = ShortfallCalculator::compute(catalog, inventory);
        for warning in warnings {
            result.add_warning(warning);
        }

        // Step 2: 左右件配對（以全部零件計算）
        tracing::debug!("Step 2: 左右件配對");
        let groups = PairingResolver::new(&self.config).resolve_groups(catalog.part_ids());

        // Step 3: 機台內排名
        tracing::debug!("Step 3: 機台內排名");
        result.table = PriorityRanker::rank(&table, &groups);

        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("指標計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "有缺口資料列: {}",
            result.table.records().iter().filter(|r| r.has_shortfall()).count()
        );

        result
    }

    /// 由原始目錄資料列計算，目錄建立時的警告一併回傳
    pub fn calculate_rows(
        &self,
        rows: impl IntoIterator<Item = CatalogRecord>,
        inventory: &InventorySnapshot,
    ) -> MetricsResult {
        let (catalog, catalog_warnings) = Catalog::from_records(rows);
        let mut result = self.calculate(&catalog, inventory);

        let mut warnings = catalog_warnings;
        warnings.append(&mut result.warnings);
        result.warnings = warnings;

        result
    }

    /// 獲取配置引用
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}
