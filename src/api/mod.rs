// ==========================================
// 菜谱库存可行性系统 - API 层
// ==========================================
// 职责: 提供命名操作接口,供外部工具分发层调用
// ==========================================

pub mod error;
pub mod recipe_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use recipe_api::{MissingIngredientsReport, RecipeApi};
