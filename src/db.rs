// ==========================================
// 菜谱库存可行性系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为，避免"部分模块外键开启/部分不开启"
// - 统一 busy_timeout，减少外部写入方（建库/补货脚本）并发时的偶发 busy 错误
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 本系统依赖的三张关系表（由外部建库脚本创建，本库只读）
pub const REQUIRED_TABLES: [&str; 3] = ["recipes", "ingredients", "recipe_ingredient"];

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 检查库中缺失的必需表（返回缺失表名列表）
///
/// 说明：
/// - 建库/种子数据属于外部协作方，本库不做自动建表
/// - 仅用于在仓储构造时提示/告警，避免静默运行在空库上
pub fn missing_inventory_tables(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut missing = Vec::new();
    for table in REQUIRED_TABLES {
        let exists: bool = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1 LIMIT 1",
                [table],
                |_row| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        if !exists {
            missing.push(table.to_string());
        }
    }
    Ok(missing)
}
