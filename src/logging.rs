// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 默认过滤器: 依赖 warn、本 crate info
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "warn,recipe_inventory=info";

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器,设置后覆盖默认值
///   例如: RUST_LOG=debug 或 RUST_LOG=recipe_inventory=trace
///
/// # 示例
/// ```no_run
/// use recipe_inventory::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // 配置日志格式
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// 初始化测试环境的日志系统
///
/// 只放开本 crate 的 debug 日志,便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("recipe_inventory=debug"))
        .with_test_writer()
        .try_init();
}
