// ==========================================
// 菜谱库存可行性系统 - 引擎层错误类型
// ==========================================
// 职责: 表达可预期的业务失败,全部以结构化结果返回调用方
// 红线: 引擎对可预期情况从不 panic
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// 菜谱名称/标识无法解析
    #[error("未找到匹配 '{query}' 的菜谱")]
    NotFound { query: String },

    /// 空菜谱的"份数"无定义
    #[error("菜谱 '{recipe}' 没有定义任何用料,无法计算份数")]
    NoRequirements { recipe: String },

    /// 消耗模拟预检失败（快速失败:报告首个不足的食材）
    #[error(
        "库存不足: 制作 {servings} 份 '{recipe}' 需要 {needed} 个 '{ingredient}',当前仅有 {available}"
    )]
    InsufficientSupply {
        recipe: String,
        ingredient: String,
        servings: i64,
        needed: i64,
        available: i64,
    },

    /// 非法输入（负数份数、空查询串等）
    #[error("无效输入: {0}")]
    InvalidInput(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
