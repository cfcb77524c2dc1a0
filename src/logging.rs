//! 日誌系統初始化（tracing + tracing-subscriber）

use tracing_subscriber::{fmt, EnvFilter};

/// 排產引擎各 crate 的 tracing target
const WORKSPACE_TARGETS: [&str; 4] = ["kanban", "kanban_core", "kanban_calc", "kanban_planner"];

/// 只對排產引擎各 crate 套用 `level`，其他 crate 維持 warn
fn workspace_directives(level: &str) -> String {
    let mut directives = vec!["warn".to_string()];
    directives.extend(
        WORKSPACE_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, level)),
    );
    directives.join(",")
}

/// 初始化日誌系統
///
/// 設定 RUST_LOG 時以其為準；否則排產引擎輸出 info，其他 crate 只輸出 warn。
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(workspace_directives("info")));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// 測試用日誌：排產引擎輸出 debug，可重複呼叫
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new(workspace_directives("debug")))
        .with_test_writer()
        .with_target(true)
        .try_init();
}
