// ==========================================
// 菜谱库存可行性系统 - 可行性判定引擎
// ==========================================
// 职责: 给定库存快照与菜谱用料,计算逐项缺口与整体可行结论
// 红线: 无状态、无副作用、无 I/O 操作;全函数（总有结论,无错误路径）
// 说明: in_stock 一律取自快照而非用料明细内嵌的 supply,
//       使同一套函数可复用于消耗模拟的虚拟快照
// ==========================================

use crate::domain::recipe::RecipeWithIngredients;
use crate::domain::supply::SupplySnapshot;
use serde::{Deserialize, Serialize};

// ==========================================
// ShortageDetail - 单项缺口明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortageDetail {
    pub name: String,     // 食材名称
    pub required: i64,    // 需求量
    pub in_stock: i64,    // 快照库存量
    pub shortage: i64,    // 缺口 = required - in_stock（> 0）
}

// ==========================================
// FeasibilityVerdict - 单菜谱可行性结论
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeasibilityVerdict {
    pub recipe_uid: String,
    pub recipe_name: String,
    pub can_make: bool,                          // missing_ingredients 为空 ⇔ true
    pub missing_ingredients: Vec<ShortageDetail>, // 按用料清单顺序（食材名称升序）
}

// ==========================================
// FeasibilityEngine - 纯函数工具类
// ==========================================
pub struct FeasibilityEngine;

impl FeasibilityEngine {
    /// 判定单个菜谱在给定快照下的可行性
    ///
    /// # 规则
    /// - 逐项缺口 = max(0, quantity - snapshot[name])
    /// - missing_ingredients = 缺口 > 0 的用料子序列
    /// - can_make = missing_ingredients 为空（空菜谱平凡可行）
    pub fn evaluate(
        recipe: &RecipeWithIngredients,
        supply: &SupplySnapshot,
    ) -> FeasibilityVerdict {
        let missing: Vec<ShortageDetail> = recipe
            .ingredients
            .iter()
            .filter_map(|req| {
                let in_stock = supply.get(&req.name);
                if in_stock < req.quantity {
                    Some(ShortageDetail {
                        name: req.name.clone(),
                        required: req.quantity,
                        in_stock,
                        shortage: req.quantity - in_stock,
                    })
                } else {
                    None
                }
            })
            .collect();

        FeasibilityVerdict {
            recipe_uid: recipe.uid.clone(),
            recipe_name: recipe.name.clone(),
            can_make: missing.is_empty(),
            missing_ingredients: missing,
        }
    }

    /// 判定菜谱集合在给定快照下的可行性（保持输入顺序）
    pub fn evaluate_all(
        recipes: &[RecipeWithIngredients],
        supply: &SupplySnapshot,
    ) -> Vec<FeasibilityVerdict> {
        recipes
            .iter()
            .map(|recipe| Self::evaluate(recipe, supply))
            .collect()
    }
}
