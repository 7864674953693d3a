// ==========================================
// 无人机作业排班系统 - 核心库
// ==========================================
// 职责: 飞手/无人机与任务的匹配、费用估算、紧急调配
// 技术栈: Rust + SQLite
// 系统定位: 决策支持 (只给出候选与告警, 不自动占用资源)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 匹配规则
pub mod engine;

// 导入层 - 名册文件
pub mod importer;

// 配置层 - 规则策略
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 对话请求解析
pub mod interpreter;

// 应用层 - 状态组装 / HTTP
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DroneStatus, MissionPriority, PilotStatus, WeatherForecast};

// 领域实体
pub use domain::{
    CostEstimate, Drone, EligibilityResult, EligiblePilot, EscalationOutcome, Mission,
    OperationMessage, Pilot,
};

// 引擎
pub use engine::{
    ConflictRules, CostCalculator, EligibilityEngine, EngineError, EscalationController,
    RosterQuery,
};

// 记录存储
pub use repository::{InMemoryRecordStore, RecordStore, SqliteRecordStore};

// API
pub use api::{ApiError, DroneOpsApi, ErrorBody};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "无人机作业排班系统";
