// ==========================================
// 菜谱库存可行性系统 - 名称解析器
// ==========================================
// 职责: 按名称子串（大小写不敏感）定位菜谱
// 规则: 多个命中时取 (名称, uid) 升序的第一个 —— 确定性选取,
//       不依赖存储层默认排序
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::recipe::RecipeWithIngredients;
use crate::engine::error::{EngineError, EngineResult};

// ==========================================
// NameResolver - 名称解析器
// ==========================================
pub struct NameResolver;

impl NameResolver {
    /// 在菜谱集合中解析名称查询
    ///
    /// # 规则
    /// 1. 查询串去除首尾空白后不得为空 → InvalidInput
    /// 2. 大小写不敏感的子串匹配
    /// 3. 多个命中 → 取 (名称, uid) 升序的第一个（uid 为次序键,名称可能重复）
    /// 4. 无命中 → NotFound
    ///
    /// # 参数
    /// - recipes: 候选菜谱集合（顺序不限,解析器自行保证确定性）
    /// - query: 名称全称或子串
    pub fn resolve<'a>(
        recipes: &'a [RecipeWithIngredients],
        query: &str,
    ) -> EngineResult<&'a RecipeWithIngredients> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidInput(
                "菜谱名称查询串不能为空".to_string(),
            ));
        }

        let needle = trimmed.to_lowercase();
        recipes
            .iter()
            .filter(|recipe| recipe.name.to_lowercase().contains(&needle))
            .min_by(|a, b| (&a.name, &a.uid).cmp(&(&b.name, &b.uid)))
            .ok_or_else(|| EngineError::NotFound {
                query: trimmed.to_string(),
            })
    }
}
