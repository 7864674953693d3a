// ==========================================
// 无人机作业排班系统 - 配置层
// ==========================================
// 职责: 匹配规则策略与查询开关的读取
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod rule_config_trait;
pub mod rule_policy;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use rule_config_trait::{load_eligibility_policy, load_maintenance_check, RuleConfigReader};
pub use rule_policy::{EligibilityPolicy, RulePolicy};
