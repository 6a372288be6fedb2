// ==========================================
// 菜谱库存可行性系统 - 消耗模拟引擎
// ==========================================
// 职责: 模拟消耗某菜谱 N 份后,重算其余所有菜谱的可行性与份数
// 红线: 只读模拟,不产生任何持久副作用;相同输入必得相同输出
// 流程: 解析 → 份数校验 → 足量预检 → 派生虚拟快照 → 全量重算
// ==========================================

use crate::domain::recipe::RecipeWithIngredients;
use crate::domain::supply::SupplySnapshot;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::feasibility::{FeasibilityEngine, ShortageDetail};
use crate::engine::resolver::NameResolver;
use crate::engine::servings::ServingsCalculator;
use serde::{Deserialize, Serialize};

// ==========================================
// SupplyDelta - 消耗台账行
// ==========================================
// 范围: 仅被消耗菜谱自身的用料（其余食材不出现在台账中）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyDelta {
    pub name: String,   // 食材名称
    pub before: i64,    // 消耗前库存
    pub used: i64,      // 消耗量 = quantity × servings
    pub after: i64,     // 消耗后虚拟库存
}

// ==========================================
// SimulatedFeasibility - 虚拟快照下的单菜谱结论
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedFeasibility {
    pub recipe_name: String,
    pub can_make: bool,
    pub max_servings: i64, // 空菜谱按 0 计（此处不视为错误）
    pub missing_ingredients: Vec<ShortageDetail>,
}

// ==========================================
// ConsumptionOutcome - 模拟结论
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionOutcome {
    pub consumed_recipe: String,
    pub servings_consumed: i64,
    pub remaining_supply: Vec<SupplyDelta>,        // 按食材名称升序
    pub feasible_recipes: Vec<SimulatedFeasibility>, // 按菜谱名称升序,不含被消耗菜谱
}

// ==========================================
// ConsumptionSimulator - 消耗模拟引擎
// ==========================================
pub struct ConsumptionSimulator;

impl ConsumptionSimulator {
    /// 模拟消耗并重算其余菜谱
    ///
    /// # 参数
    /// - recipes: 菜谱全集（与 supply 来自同一次一致读取）
    /// - supply: 真实库存快照（只读,本函数在克隆副本上扣减）
    /// - query: 被消耗菜谱的名称全称或子串
    /// - servings: 消耗份数（0 为合法的空操作;负数 → InvalidInput）
    ///
    /// # 规则
    /// - 预检按用料清单顺序（食材名称升序）快速失败,只报告首个不足的食材;
    ///   与单菜谱可行性检查的聚合口径是刻意保留的不对称
    /// - 其余菜谱按 uid 排除被消耗菜谱（名称可能重复）
    pub fn simulate(
        recipes: &[RecipeWithIngredients],
        supply: &SupplySnapshot,
        query: &str,
        servings: i64,
    ) -> EngineResult<ConsumptionOutcome> {
        // === 步骤 1: 解析目标菜谱 ===
        let consumed = NameResolver::resolve(recipes, query)?;

        // === 步骤 2: 份数校验 ===
        if servings < 0 {
            return Err(EngineError::InvalidInput(format!(
                "消耗份数不能为负数: {}",
                servings
            )));
        }

        // === 步骤 3: 足量预检（快速失败）===
        // quantity × servings 用 checked_mul 计算,溢出视为非法份数
        let mut demands = Vec::with_capacity(consumed.ingredients.len());
        for req in &consumed.ingredients {
            let needed = req.quantity.checked_mul(servings).ok_or_else(|| {
                EngineError::InvalidInput(format!(
                    "消耗份数过大,需求量超出可表示范围: {} × {}",
                    req.quantity, servings
                ))
            })?;
            let available = supply.get(&req.name);
            if available < needed {
                return Err(EngineError::InsufficientSupply {
                    recipe: consumed.name.clone(),
                    ingredient: req.name.clone(),
                    servings,
                    needed,
                    available,
                });
            }
            demands.push(needed);
        }

        // === 步骤 4: 派生虚拟快照并记录台账 ===
        // 虚拟快照从完整真实快照出发（含未被消耗的食材）,台账只含被消耗菜谱的用料
        let mut virtual_supply = supply.clone();
        let mut remaining_supply = Vec::with_capacity(consumed.ingredients.len());
        for (req, used) in consumed.ingredients.iter().zip(demands) {
            let before = supply.get(&req.name);
            virtual_supply.deduct(&req.name, used);
            remaining_supply.push(SupplyDelta {
                name: req.name.clone(),
                before,
                used,
                after: virtual_supply.get(&req.name),
            });
        }

        // === 步骤 5: 对其余菜谱全量重算 ===
        let mut feasible_recipes = Vec::new();
        for recipe in recipes {
            if recipe.uid == consumed.uid {
                continue; // 按 uid 排除被消耗菜谱本身
            }

            let verdict = FeasibilityEngine::evaluate(recipe, &virtual_supply);
            let max_servings = if recipe.has_requirements() {
                ServingsCalculator::max_servings(recipe, &virtual_supply)?.max_servings
            } else {
                0
            };

            feasible_recipes.push(SimulatedFeasibility {
                recipe_name: recipe.name.clone(),
                can_make: verdict.can_make,
                max_servings,
                missing_ingredients: verdict.missing_ingredients,
            });
        }

        Ok(ConsumptionOutcome {
            consumed_recipe: consumed.name.clone(),
            servings_consumed: servings,
            remaining_supply,
            feasible_recipes,
        })
    }
}
