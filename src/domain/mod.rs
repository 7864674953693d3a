// ==========================================
// 无人机作业排班系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、封闭枚举、匹配结果
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod assignment;
pub mod drone;
pub mod mission;
pub mod pilot;
pub mod types;

// 重导出核心类型
pub use assignment::{
    CostEstimate, EligibilityResult, EligiblePilot, EscalationOutcome, OperationMessage,
};
pub use drone::Drone;
pub use mission::Mission;
pub use pilot::Pilot;
pub use types::{DroneStatus, MissionPriority, PilotStatus, WeatherForecast};
