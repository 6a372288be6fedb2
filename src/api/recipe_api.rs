// ==========================================
// 菜谱库存可行性系统 - 菜谱 API
// ==========================================
// 职责: 以命名操作的形式向外部工具分发层暴露核心能力,
//       输入输出均为可 JSON 序列化的记录
// 约束: 每个操作开始时捕获一次数据,操作内不再二次读库
// 红线: 全部操作只读、幂等;可预期失败以 ApiError 结构化返回
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::recipe::{Ingredient, RecipeWithIngredients};
use crate::engine::feasibility::{FeasibilityEngine, FeasibilityVerdict, ShortageDetail};
use crate::engine::resolver::NameResolver;
use crate::engine::servings::{ServingsCalculator, ServingsOutcome};
use crate::engine::simulation::{ConsumptionOutcome, ConsumptionSimulator};
use crate::repository::inventory_repo::{IngredientMatchRow, InventoryRepository};

// ==========================================
// MissingIngredientsReport - 单菜谱缺料报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingIngredientsReport {
    pub recipe_uid: String,
    pub recipe_name: String,
    pub can_make: bool,
    pub missing_count: usize,
    pub missing_ingredients: Vec<ShortageDetail>,
}

// ==========================================
// RecipeApi - 菜谱 API
// ==========================================

/// 菜谱API
///
/// 职责：
/// 1. 菜谱/库存查询（原样透出仓储实体）
/// 2. 可行性与份数计算（委托引擎层纯函数）
/// 3. 消耗模拟（一致性数据集 + 虚拟快照）
/// 4. 输入校验与错误转换
pub struct RecipeApi {
    repo: Arc<InventoryRepository>,
}

impl RecipeApi {
    /// 创建新的RecipeApi实例
    ///
    /// # 参数
    /// - repo: 库存仓储
    pub fn new(repo: Arc<InventoryRepository>) -> Self {
        Self { repo }
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 查询全部菜谱及完整用料清单
    ///
    /// # 返回
    /// - Ok(Vec<RecipeWithIngredients>): 按名称升序
    pub fn list_recipes_with_ingredients(&self) -> ApiResult<Vec<RecipeWithIngredients>> {
        let recipes = self.repo.list_recipes()?;
        debug!(count = recipes.len(), "查询全部菜谱");
        Ok(recipes)
    }

    /// 按 uid 查询单个菜谱
    ///
    /// # 返回
    /// - Ok(RecipeWithIngredients): 找到记录
    /// - Err(ApiError::NotFound): uid 不存在
    pub fn get_recipe(&self, recipe_uid: &str) -> ApiResult<RecipeWithIngredients> {
        if recipe_uid.trim().is_empty() {
            return Err(ApiError::InvalidInput("菜谱 uid 不能为空".to_string()));
        }

        self.repo
            .find_recipe_by_uid(recipe_uid)?
            .ok_or_else(|| ApiError::NotFound(format!("菜谱 '{}' 不存在", recipe_uid)))
    }

    /// 查询全部食材库存
    pub fn list_inventory(&self) -> ApiResult<Vec<Ingredient>> {
        Ok(self.repo.list_ingredients()?)
    }

    // ==========================================
    // 可行性接口
    // ==========================================

    /// 对照当前库存,判定每个菜谱是否可以立即制作
    ///
    /// # 说明
    /// - 菜谱全集与库存快照取自同一次一致读取
    /// - 结果按菜谱名称升序;missing_ingredients 为聚合口径(全部缺口)
    pub fn check_all_feasibility(&self) -> ApiResult<Vec<FeasibilityVerdict>> {
        let dataset = self.repo.load_dataset()?;
        Ok(FeasibilityEngine::evaluate_all(
            &dataset.recipes,
            &dataset.supply,
        ))
    }

    /// 按食材名称检索包含该食材的菜谱（大小写不敏感子串匹配）
    pub fn search_by_ingredient(&self, pattern: &str) -> ApiResult<Vec<IngredientMatchRow>> {
        if pattern.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "食材名称检索串不能为空".to_string(),
            ));
        }
        Ok(self.repo.search_requirements_by_ingredient(pattern.trim())?)
    }

    /// 对指定菜谱(按名称解析)列出全部缺料明细
    ///
    /// # 参数
    /// - query: 菜谱名称全称或子串
    pub fn missing_ingredients(&self, query: &str) -> ApiResult<MissingIngredientsReport> {
        let dataset = self.repo.load_dataset()?;
        let recipe = NameResolver::resolve(&dataset.recipes, query)?;
        let verdict = FeasibilityEngine::evaluate(recipe, &dataset.supply);

        Ok(MissingIngredientsReport {
            recipe_uid: verdict.recipe_uid,
            recipe_name: verdict.recipe_name,
            can_make: verdict.can_make,
            missing_count: verdict.missing_ingredients.len(),
            missing_ingredients: verdict.missing_ingredients,
        })
    }

    // ==========================================
    // 份数与模拟接口
    // ==========================================

    /// 计算指定菜谱(按名称解析)在当前库存下的最大可制作份数
    pub fn max_servings(&self, query: &str) -> ApiResult<ServingsOutcome> {
        let dataset = self.repo.load_dataset()?;
        let recipe = NameResolver::resolve(&dataset.recipes, query)?;
        Ok(ServingsCalculator::max_servings(recipe, &dataset.supply)?)
    }

    /// 模拟消耗某菜谱 N 份,报告其余菜谱在虚拟库存下的可行性
    ///
    /// # 参数
    /// - query: 被消耗菜谱的名称全称或子串
    /// - servings: 消耗份数（None → 默认 1）
    ///
    /// # 说明
    /// - 只读模拟,不修改数据库;重复调用结果相同
    pub fn simulate_consumption(
        &self,
        query: &str,
        servings: Option<i64>,
    ) -> ApiResult<ConsumptionOutcome> {
        let servings = servings.unwrap_or(1);
        let dataset = self.repo.load_dataset()?;

        let outcome =
            ConsumptionSimulator::simulate(&dataset.recipes, &dataset.supply, query, servings)?;
        debug!(
            consumed = %outcome.consumed_recipe,
            servings = outcome.servings_consumed,
            others = outcome.feasible_recipes.len(),
            "消耗模拟完成"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::configure_sqlite_connection;
    use rusqlite::Connection;
    use std::sync::Mutex;

    /// 内存库 + 最小种子数据（仅供本模块的输入校验测试）
    fn test_api() -> RecipeApi {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE recipes (uid TEXT PRIMARY KEY, name TEXT NOT NULL);
            CREATE TABLE ingredients (uid TEXT PRIMARY KEY, name TEXT NOT NULL, supply INTEGER NOT NULL);
            CREATE TABLE recipe_ingredient (
                recipe_uid TEXT,
                ingredient_uid TEXT,
                quantity INTEGER NOT NULL,
                PRIMARY KEY (recipe_uid, ingredient_uid)
            );
            INSERT INTO ingredients VALUES ('i1', 'eggs', 10);
            INSERT INTO recipes VALUES ('r1', 'scramble eggs');
            INSERT INTO recipe_ingredient VALUES ('r1', 'i1', 5);
            "#,
        )
        .unwrap();

        let repo = InventoryRepository::from_connection(Arc::new(Mutex::new(conn)));
        RecipeApi::new(Arc::new(repo))
    }

    #[test]
    fn test_get_recipe_blank_uid_is_invalid() {
        let api = test_api();
        let err = api.get_recipe("  ").unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn test_get_recipe_unknown_uid_not_found() {
        let api = test_api();
        let err = api.get_recipe("no-such-uid").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_search_blank_pattern_is_invalid() {
        let api = test_api();
        let err = api.search_by_ingredient("").unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn test_simulate_default_servings_is_one() {
        let api = test_api();
        let outcome = api.simulate_consumption("scramble", None).unwrap();
        assert_eq!(outcome.servings_consumed, 1);
        assert_eq!(outcome.remaining_supply[0].after, 5); // 10 - 5×1
    }

    #[test]
    fn test_outputs_are_json_serializable() {
        let api = test_api();

        let verdicts = api.check_all_feasibility().unwrap();
        let json = serde_json::to_value(&verdicts).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["recipe_name"], "scramble eggs");
        assert_eq!(json[0]["can_make"], true);

        let outcome = api.simulate_consumption("scramble", Some(2)).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["consumed_recipe"], "scramble eggs");
        assert_eq!(json["servings_consumed"], 2);
    }
}
