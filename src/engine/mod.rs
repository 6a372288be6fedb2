// ==========================================
// 菜谱库存可行性系统 - 引擎层
// ==========================================
// 职责: 实现纯计算规则,不拼 SQL
// 红线: Engine 不拼 SQL;所有判定均为 (用料, 快照) 的纯函数
// ==========================================

pub mod error;
pub mod feasibility;
pub mod resolver;
pub mod servings;
pub mod simulation;

// 重导出核心引擎
pub use error::{EngineError, EngineResult};
pub use feasibility::{FeasibilityEngine, FeasibilityVerdict, ShortageDetail};
pub use resolver::NameResolver;
pub use servings::{ServingsCalculator, ServingsCapacity, ServingsOutcome};
pub use simulation::{
    ConsumptionOutcome, ConsumptionSimulator, SimulatedFeasibility, SupplyDelta,
};
