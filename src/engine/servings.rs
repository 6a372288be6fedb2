// ==========================================
// 菜谱库存可行性系统 - 份数计算引擎
// ==========================================
// 职责: 计算当前快照下某菜谱的最大可制作整数份数与限制食材
// 红线: 无状态、无副作用、无 I/O 操作
// 规则: 逐项容量 = floor(supply / quantity);整体最大 = 各项容量最小值;
//       限制食材 = 取得最小值的第一项（食材名称升序）
// ==========================================

use crate::domain::recipe::RecipeWithIngredients;
use crate::domain::supply::SupplySnapshot;
use crate::engine::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

// ==========================================
// ServingsCapacity - 单项容量明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServingsCapacity {
    pub name: String,        // 食材名称
    pub required: i64,       // 单份需求量
    pub in_stock: i64,       // 快照库存量
    pub max_servings: i64,   // 该食材单独允许的份数 = floor(in_stock / required)
}

// ==========================================
// ServingsOutcome - 份数计算结论
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServingsOutcome {
    pub recipe_uid: String,
    pub recipe_name: String,
    pub max_servings: i64,
    pub limiting_ingredient: String,        // 容量最小的食材（并列取名称升序第一个）
    pub breakdown: Vec<ServingsCapacity>,   // 按食材名称升序
}

// ==========================================
// ServingsCalculator - 纯函数工具类
// ==========================================
pub struct ServingsCalculator;

impl ServingsCalculator {
    /// 计算菜谱在给定快照下的最大份数
    ///
    /// # 返回
    /// - Ok(ServingsOutcome): 份数结论与逐项明细
    /// - Err(NoRequirements): 空菜谱的份数无定义
    pub fn max_servings(
        recipe: &RecipeWithIngredients,
        supply: &SupplySnapshot,
    ) -> EngineResult<ServingsOutcome> {
        if recipe.ingredients.is_empty() {
            return Err(EngineError::NoRequirements {
                recipe: recipe.name.clone(),
            });
        }

        let breakdown: Vec<ServingsCapacity> = recipe
            .ingredients
            .iter()
            .map(|req| {
                let in_stock = supply.get(&req.name);
                ServingsCapacity {
                    name: req.name.clone(),
                    required: req.quantity,
                    in_stock,
                    // 不变量保证 quantity > 0;防御负库存数据,容量下限为 0
                    max_servings: (in_stock / req.quantity).max(0),
                }
            })
            .collect();

        // 用料清单按名称升序,严格小于扫描 → 并列时保留第一项
        let mut limiting = &breakdown[0];
        for capacity in &breakdown[1..] {
            if capacity.max_servings < limiting.max_servings {
                limiting = capacity;
            }
        }

        Ok(ServingsOutcome {
            recipe_uid: recipe.uid.clone(),
            recipe_name: recipe.name.clone(),
            max_servings: limiting.max_servings,
            limiting_ingredient: limiting.name.clone(),
            breakdown,
        })
    }
}
