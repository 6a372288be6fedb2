// ==========================================
// 菜谱库存可行性系统 - 领域层
// ==========================================
// 职责: 定义实体与值对象,约束在类型层面表达
// 红线: 领域类型不含数据访问逻辑
// ==========================================

pub mod recipe;
pub mod supply;

// 重导出核心类型
pub use recipe::{Ingredient, Recipe, RecipeWithIngredients, Requirement, RequirementDetail};
pub use supply::SupplySnapshot;
