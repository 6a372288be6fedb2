// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、标准种子数据生成等功能
// 说明: 建库/种子属于外部协作方,测试在此自建等价夹具
// ==========================================

#![allow(dead_code)] // 各集成测试 crate 按需取用

use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::error::Error;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// 标准种子数据的 uid 索引（按名称查 uid）
pub struct Fixture {
    pub ingredient_uids: HashMap<String, String>,
    pub recipe_uids: HashMap<String, String>,
}

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = Connection::open(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 初始化数据库 schema（与外部建库脚本的三张表对齐）
pub fn init_schema(conn: &Connection) -> Result<(), Box<dyn Error>> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS recipes (
            uid TEXT PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS ingredients (
            uid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            supply INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS recipe_ingredient (
            recipe_uid TEXT,
            ingredient_uid TEXT,
            quantity INTEGER NOT NULL,
            FOREIGN KEY (recipe_uid) REFERENCES recipes(uid),
            FOREIGN KEY (ingredient_uid) REFERENCES ingredients(uid),
            PRIMARY KEY (recipe_uid, ingredient_uid)
        );
        "#,
    )?;
    Ok(())
}

/// 写入标准种子数据
///
/// 食材: eggs 10 / milk 2 / tomato 1 / apple 2 / lemon 3
/// 菜谱: lemon cake (eggs 3, milk 1, lemon 3)
///       apple cake (eggs 3, milk 1, apple 2)
///       scramble eggs (eggs 5)
pub fn seed_standard_dataset(conn: &Connection) -> Result<Fixture, Box<dyn Error>> {
    let ingredients = [
        ("eggs", 10),
        ("milk", 2),
        ("tomato", 1),
        ("apple", 2),
        ("lemon", 3),
    ];

    let mut ingredient_uids = HashMap::new();
    for (name, supply) in ingredients {
        let uid = Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO ingredients (uid, name, supply) VALUES (?1, ?2, ?3)",
            params![uid, name, supply],
        )?;
        ingredient_uids.insert(name.to_string(), uid);
    }

    let recipes: [(&str, &[(&str, i64)]); 3] = [
        ("lemon cake", &[("eggs", 3), ("milk", 1), ("lemon", 3)]),
        ("apple cake", &[("eggs", 3), ("milk", 1), ("apple", 2)]),
        ("scramble eggs", &[("eggs", 5)]),
    ];

    let mut recipe_uids = HashMap::new();
    for (recipe_name, requirements) in recipes {
        let recipe_uid = Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO recipes (uid, name) VALUES (?1, ?2)",
            params![recipe_uid, recipe_name],
        )?;

        for (ingredient_name, quantity) in requirements {
            conn.execute(
                "INSERT INTO recipe_ingredient (recipe_uid, ingredient_uid, quantity) VALUES (?1, ?2, ?3)",
                params![recipe_uid, ingredient_uids[*ingredient_name], quantity],
            )?;
        }
        recipe_uids.insert(recipe_name.to_string(), recipe_uid);
    }

    Ok(Fixture {
        ingredient_uids,
        recipe_uids,
    })
}

/// 直接改写某食材的库存量（模拟外部补货/消耗脚本）
pub fn set_supply(conn: &Connection, name: &str, supply: i64) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "UPDATE ingredients SET supply = ?1 WHERE name = ?2",
        params![supply, name],
    )?;
    Ok(())
}

/// 追加一个菜谱（用料可为空,食材须已存在）
pub fn add_recipe(
    conn: &Connection,
    name: &str,
    requirements: &[(&str, i64)],
) -> Result<String, Box<dyn Error>> {
    let recipe_uid = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO recipes (uid, name) VALUES (?1, ?2)",
        params![recipe_uid, name],
    )?;

    for (ingredient_name, quantity) in requirements {
        conn.execute(
            r#"
            INSERT INTO recipe_ingredient (recipe_uid, ingredient_uid, quantity)
            SELECT ?1, uid, ?3 FROM ingredients WHERE name = ?2
            "#,
            params![recipe_uid, ingredient_name, quantity],
        )?;
    }
    Ok(recipe_uid)
}
