// ==========================================
// 菜谱库存可行性系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,转换 Repository/Engine 错误为用户友好的错误消息
// 约束: 所有错误信息必须包含显式原因(可解释性)
// ==========================================

use crate::engine::error::EngineError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("菜谱没有定义任何用料: {0}")]
    NoRequirements(String),

    #[error("库存不足: {0}")]
    InsufficientSupply(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库事务失败: {0}")]
    DatabaseTransactionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 序列化为外部工具分发层约定的错误记录 {"error": "..."}
    pub fn to_error_record(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 将Repository层的技术错误转换为用户友好的业务错误
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 EngineError 转换
// 目的: 引擎层的业务失败逐一映射,保留完整可解释消息
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            EngineError::NoRequirements { .. } => ApiError::NoRequirements(err.to_string()),
            EngineError::InsufficientSupply { .. } => {
                ApiError::InsufficientSupply(err.to_string())
            }
            EngineError::InvalidInput(msg) => ApiError::InvalidInput(msg),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_conversion() {
        let engine_err = EngineError::InsufficientSupply {
            recipe: "lemon cake".to_string(),
            ingredient: "lemon".to_string(),
            servings: 2,
            needed: 6,
            available: 3,
        };
        let api_err: ApiError = engine_err.into();
        match api_err {
            ApiError::InsufficientSupply(msg) => {
                assert!(msg.contains("lemon"));
                assert!(msg.contains('6'));
                assert!(msg.contains('3'));
            }
            _ => panic!("Expected InsufficientSupply"),
        }
    }

    #[test]
    fn test_repository_error_conversion() {
        let repo_err = RepositoryError::NotFound {
            entity: "Recipe".to_string(),
            id: "r-001".to_string(),
        };
        let api_err: ApiError = repo_err.into();
        match api_err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("Recipe"));
                assert!(msg.contains("r-001"));
            }
            _ => panic!("Expected NotFound"),
        }
    }

    #[test]
    fn test_error_record_shape() {
        let err = ApiError::NotFound("菜谱不存在".to_string());
        let record = err.to_error_record();
        assert!(record.get("error").is_some());
        assert!(record["error"].as_str().unwrap().contains("菜谱不存在"));
    }
}
