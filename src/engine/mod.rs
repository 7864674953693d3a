// ==========================================
// 无人机作业排班系统 - 引擎层
// ==========================================
// 职责: 实现匹配规则引擎,不拼 SQL
// 红线: Engine 不拼 SQL, 所有排除都给出原因 (或按策略静默)
// ==========================================

pub mod conflict_rules;
pub mod cost;
pub mod eligibility;
pub mod error;
pub mod escalation;
pub mod roster;

// 重导出核心引擎
pub use conflict_rules::ConflictRules;
pub use cost::CostCalculator;
pub use eligibility::EligibilityEngine;
pub use error::{EngineError, EngineResult};
pub use escalation::EscalationController;
pub use roster::{DroneFilter, RosterQuery};
