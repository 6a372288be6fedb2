// ==========================================
// 菜谱库存可行性系统 - 菜谱领域模型
// ==========================================
// 对齐: 外部建库脚本的三张表
//   recipes            (uid TEXT PK, name TEXT)
//   ingredients        (uid TEXT PK, name TEXT, supply INTEGER)
//   recipe_ingredient  (recipe_uid TEXT, ingredient_uid TEXT, quantity INTEGER)
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Ingredient - 食材
// ==========================================
// 红线: supply 为当前真实库存,核心计算从不修改它
// 用途: 库存清单展示 / 库存快照来源
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub uid: String,    // 食材唯一标识（UUID）
    pub name: String,   // 食材名称
    pub supply: i64,    // 当前库存量（非负整数）
}

// ==========================================
// Recipe - 菜谱头信息
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub uid: String,    // 菜谱唯一标识（UUID）
    pub name: String,   // 菜谱名称（不保证唯一,身份以 uid 为准）
}

// ==========================================
// Requirement - 菜谱用料关系
// ==========================================
// 不变量: (recipe_uid, ingredient_uid) 至多出现一次; quantity > 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub recipe_uid: String,     // 关联 recipes（FK）
    pub ingredient_uid: String, // 关联 ingredients（FK）
    pub quantity: i64,          // 单份所需数量（正整数）
}

// ==========================================
// RequirementDetail - 已解析的用料明细
// ==========================================
// 用途: 仓储层 join 产物（食材名称 + 需求量 + 当前库存）
// 说明: supply 仅供展示接口使用;可行性/份数计算一律以库存快照为准,
//       以保证同一套纯函数可用于真实快照与虚拟快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementDetail {
    pub name: String,     // 食材名称
    pub quantity: i64,    // 单份所需数量
    pub supply: i64,      // 查询时刻的库存量
}

// ==========================================
// RecipeWithIngredients - 菜谱 + 完整用料清单
// ==========================================
// 用途: 仓储层标准读取单元,引擎层只读输入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeWithIngredients {
    pub uid: String,
    pub name: String,
    pub ingredients: Vec<RequirementDetail>, // 按食材名称升序
}

impl RecipeWithIngredients {
    /// 是否为空菜谱（无任何用料）
    pub fn has_requirements(&self) -> bool {
        !self.ingredients.is_empty()
    }
}
