// ==========================================
// 菜谱库存可行性系统 - 库存仓储
// ==========================================
// 职责: 只读访问 recipes / ingredients / recipe_ingredient 三张表
// 红线: 不含业务逻辑,只负责数据访问;所有查询参数化
// 红线: 仓储从不写库("消耗"只发生在引擎层的虚拟快照上)
// ==========================================

use crate::db::{missing_inventory_tables, open_sqlite_connection};
use crate::domain::recipe::{Ingredient, Recipe, RecipeWithIngredients, Requirement, RequirementDetail};
use crate::domain::supply::SupplySnapshot;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::warn;

// ==========================================
// InventoryDataset - 一致性数据集
// ==========================================
// 用途: 在单个读事务内捕获的 菜谱全集 + 库存快照
// 说明: 跨多张表的组合计算（全量可行性/消耗模拟）必须基于同一数据集,
//       避免"库存取自一个时刻、用料结构取自另一个时刻"
#[derive(Debug, Clone)]
pub struct InventoryDataset {
    pub recipes: Vec<RecipeWithIngredients>,
    pub supply: SupplySnapshot,
}

// ==========================================
// IngredientMatchRow - 按食材检索菜谱的结果行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientMatchRow {
    pub recipe_uid: String,
    pub recipe_name: String,
    pub matching_ingredient: String,
    pub required_quantity: i64,
    pub in_stock: i64,
}

// ==========================================
// InventoryRepository - 库存仓储
// ==========================================
/// 库存仓储
/// 职责: 管理三张关系表的只读查询,向上层提供类型化实体
pub struct InventoryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl InventoryRepository {
    /// 创建新的 InventoryRepository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（显式传入,不使用全局状态）
    ///
    /// # 返回
    /// - Result<Self, RepositoryError>
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        // 建库属于外部协作方;这里只做缺表提示,不自动建表
        let missing = missing_inventory_tables(&conn)?;
        if !missing.is_empty() {
            warn!(db_path = %db_path, missing = ?missing, "库存数据库缺少必需表");
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 查询全部菜谱（按名称升序,uid 次序键）,各自带完整用料清单
    pub fn list_recipes(&self) -> RepositoryResult<Vec<RecipeWithIngredients>> {
        let conn = self.get_conn()?;
        Self::read_recipes(&conn)
    }

    /// 按 uid 查询单个菜谱
    ///
    /// # 返回
    /// - Ok(Some(..)): 找到记录
    /// - Ok(None): 未找到记录
    pub fn find_recipe_by_uid(
        &self,
        recipe_uid: &str,
    ) -> RepositoryResult<Option<RecipeWithIngredients>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare("SELECT uid, name FROM recipes WHERE uid = ?1")?;
        let header = stmt
            .query_row(params![recipe_uid], |row| {
                Ok(Recipe {
                    uid: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .optional()?;

        match header {
            None => Ok(None),
            Some(recipe) => {
                let ingredients = Self::read_requirements(&conn, &recipe.uid)?;
                Ok(Some(RecipeWithIngredients {
                    uid: recipe.uid,
                    name: recipe.name,
                    ingredients,
                }))
            }
        }
    }

    /// 读取某菜谱的原始用料关系行（未做名称解析）
    ///
    /// # 说明
    /// - 仅供数据质量核对使用:校验 quantity > 0、(菜谱, 食材) 至多一行等数据不变量
    /// - 不属于对外查询口径,不纳入文档化 API
    #[doc(hidden)]
    pub fn list_requirements(&self, recipe_uid: &str) -> RepositoryResult<Vec<Requirement>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT recipe_uid, ingredient_uid, quantity
            FROM recipe_ingredient
            WHERE recipe_uid = ?1
            ORDER BY ingredient_uid
            "#,
        )?;
        let rows = stmt.query_map(params![recipe_uid], |row| {
            Ok(Requirement {
                recipe_uid: row.get(0)?,
                ingredient_uid: row.get(1)?,
                quantity: row.get(2)?,
            })
        })?;

        let mut requirements = Vec::new();
        for row in rows {
            requirements.push(row?);
        }
        Ok(requirements)
    }

    /// 查询全部食材（按名称升序,uid 次序键）
    pub fn list_ingredients(&self) -> RepositoryResult<Vec<Ingredient>> {
        let conn = self.get_conn()?;

        let mut stmt =
            conn.prepare("SELECT uid, name, supply FROM ingredients ORDER BY name, uid")?;
        let rows = stmt.query_map([], |row| {
            Ok(Ingredient {
                uid: row.get(0)?,
                name: row.get(1)?,
                supply: row.get(2)?,
            })
        })?;

        let mut ingredients = Vec::new();
        for row in rows {
            ingredients.push(row?);
        }
        Ok(ingredients)
    }

    /// 捕获当前库存快照（全部食材）
    pub fn supply_snapshot(&self) -> RepositoryResult<SupplySnapshot> {
        let conn = self.get_conn()?;
        Self::read_snapshot(&conn)
    }

    /// 在单个读事务内捕获 菜谱全集 + 库存快照
    ///
    /// # 说明
    /// - 这是核心对存储协作方唯一依赖的隔离保证:三张表的一次一致读取
    /// - 全量可行性与消耗模拟必须走此接口,不得分次读取
    pub fn load_dataset(&self) -> RepositoryResult<InventoryDataset> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let recipes = Self::read_recipes(&tx)?;
        let supply = Self::read_snapshot(&tx)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        Ok(InventoryDataset { recipes, supply })
    }

    /// 按食材名称检索菜谱（大小写不敏感子串匹配）
    ///
    /// # 参数
    /// - pattern: 食材名称的全称或子串
    ///
    /// # 返回
    /// - 命中行按 (菜谱名称, 食材名称) 升序
    pub fn search_requirements_by_ingredient(
        &self,
        pattern: &str,
    ) -> RepositoryResult<Vec<IngredientMatchRow>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT r.uid    AS recipe_uid,
                   r.name   AS recipe_name,
                   i.name   AS matching_ingredient,
                   ri.quantity AS required_quantity,
                   i.supply    AS in_stock
            FROM recipe_ingredient ri
            JOIN recipes     r ON r.uid = ri.recipe_uid
            JOIN ingredients i ON i.uid = ri.ingredient_uid
            WHERE LOWER(i.name) LIKE LOWER(?1)
            ORDER BY r.name, i.name
            "#,
        )?;

        let like_pattern = format!("%{}%", pattern);
        let rows = stmt.query_map(params![like_pattern], |row| {
            Ok(IngredientMatchRow {
                recipe_uid: row.get(0)?,
                recipe_name: row.get(1)?,
                matching_ingredient: row.get(2)?,
                required_quantity: row.get(3)?,
                in_stock: row.get(4)?,
            })
        })?;

        let mut matches = Vec::new();
        for row in rows {
            matches.push(row?);
        }
        Ok(matches)
    }

    // ==========================================
    // 内部读取函数（供普通查询与事务内读取共用）
    // ==========================================

    /// 读取全部菜谱及用料清单
    fn read_recipes(conn: &Connection) -> RepositoryResult<Vec<RecipeWithIngredients>> {
        let mut stmt = conn.prepare("SELECT uid, name FROM recipes ORDER BY name, uid")?;
        let headers = stmt.query_map([], |row| {
            Ok(Recipe {
                uid: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        let mut recipes = Vec::new();
        for header in headers {
            let recipe = header?;
            let ingredients = Self::read_requirements(conn, &recipe.uid)?;
            recipes.push(RecipeWithIngredients {
                uid: recipe.uid,
                name: recipe.name,
                ingredients,
            });
        }
        Ok(recipes)
    }

    /// 读取单个菜谱的用料明细（按食材名称升序）
    fn read_requirements(
        conn: &Connection,
        recipe_uid: &str,
    ) -> RepositoryResult<Vec<RequirementDetail>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT i.name, ri.quantity, i.supply
            FROM recipe_ingredient ri
            JOIN ingredients i ON i.uid = ri.ingredient_uid
            WHERE ri.recipe_uid = ?1
            ORDER BY i.name
            "#,
        )?;

        let rows = stmt.query_map(params![recipe_uid], |row| {
            Ok(RequirementDetail {
                name: row.get(0)?,
                quantity: row.get(1)?,
                supply: row.get(2)?,
            })
        })?;

        let mut details = Vec::new();
        for row in rows {
            details.push(row?);
        }
        Ok(details)
    }

    /// 读取全部食材的库存快照
    fn read_snapshot(conn: &Connection) -> RepositoryResult<SupplySnapshot> {
        let mut stmt = conn.prepare("SELECT name, supply FROM ingredients")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(SupplySnapshot::from_entries(entries))
    }
}
