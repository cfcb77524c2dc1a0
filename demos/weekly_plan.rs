//! 週排產示範
//!
//! 執行: `RUST_LOG=debug cargo run --example weekly_plan`

use kanban::logging;
use kanban::prelude::*;
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    logging::init();

    let rows = vec![
        CatalogRecord::new("DOOR LH", "PRESS-1", 40, 978, Decimal::from(120)),
        CatalogRecord::new("DOOR RH", "PRESS-1", 40, 978, Decimal::from(120)),
        CatalogRecord::new("HOOD", "PRESS-1", 20, 400, Decimal::from(60)),
        CatalogRecord::new("ROOF", "PRESS-2", 10, 200, Decimal::from(25)),
    ];
    let (catalog, warnings) = Catalog::from_records(rows);
    for warning in &warnings {
        println!("目錄警告: {}", warning.message);
    }

    let stock = InventorySnapshot::new()
        .with_quantity("DOOR LH", 120)
        .with_quantity("HOOD", 400)
        .with_quantity("ROOF", 200);
    let (inventory, report) = stock.reconcile(&catalog);
    println!("庫存同步: 新增 {:?}，移除 {:?}", report.added, report.removed);

    let calculator = MetricsCalculator::default();
    let result = calculator.calculate(&catalog, &inventory);

    println!("\n=== 機台狀態 ===");
    for assignment in result.table.machine_assignments() {
        match assignment {
            MachineAssignment::Busy(job) => println!(
                "{}: {} ({} 箱, {}h)",
                job.machine_id, job.group_id, job.required_boxes, job.required_hours
            ),
            MachineAssignment::Free { machine_id } => println!("{}: 空閒", machine_id),
        }
    }

    println!("\n=== 策略比較 (PRESS-1, 5 天 x 16h) ===");
    let simulator = WeeklyPlanSimulator::new(calculator.config().clone());
    for plan in simulator.compare_strategies(&result.table, "PRESS-1", 5, Decimal::from(16))? {
        println!(
            "{:?}: 生產 {}h + 換線 {}h，利用率 {}%，超出產能: {}",
            plan.strategy,
            plan.total_production_hours,
            plan.total_changeover_hours,
            plan.utilization_percent,
            plan.over_capacity
        );
        for slot in &plan.slots {
            println!(
                "  {:?} 第{}班 {} {}h",
                slot.weekday,
                slot.shift + 1,
                slot.group_id,
                slot.hours
            );
        }
    }

    println!("\n{}", serde_json::to_string_pretty(&result.table.production_table())?);

    Ok(())
}
