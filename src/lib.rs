// ==========================================
// 菜谱库存可行性系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 库存可行性查询与消耗模拟 (只读决策支持)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    Ingredient, Recipe, RecipeWithIngredients, Requirement, RequirementDetail, SupplySnapshot,
};

// 仓储
pub use repository::{
    IngredientMatchRow, InventoryDataset, InventoryRepository, RepositoryError, RepositoryResult,
};

// 引擎
pub use engine::{
    ConsumptionOutcome, ConsumptionSimulator, EngineError, EngineResult, FeasibilityEngine,
    FeasibilityVerdict, NameResolver, ServingsCalculator, ServingsCapacity, ServingsOutcome,
    ShortageDetail, SimulatedFeasibility, SupplyDelta,
};

// API
pub use api::{ApiError, ApiResult, MissingIngredientsReport, RecipeApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "菜谱库存可行性系统";
