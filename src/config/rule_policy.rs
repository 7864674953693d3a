// ==========================================
// 无人机作业排班系统 - 匹配规则策略
// ==========================================
// 职责: 每条冲突规则的 {exclude, warn} 开关
// 默认: 技能不符静默排除, 资质不符排除并告警
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// RulePolicy - 单条规则的处理方式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulePolicy {
    /// 命中时是否排除候选
    pub exclude: bool,
    /// 命中时是否输出告警
    pub warn: bool,
}

impl RulePolicy {
    pub const fn new(exclude: bool, warn: bool) -> Self {
        Self { exclude, warn }
    }

    /// 静默排除
    pub const SILENT_EXCLUDE: RulePolicy = RulePolicy::new(true, false);

    /// 排除并告警
    pub const WARN_EXCLUDE: RulePolicy = RulePolicy::new(true, true);
}

// ==========================================
// EligibilityPolicy - 匹配引擎的规则策略集合
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityPolicy {
    pub skill_mismatch: RulePolicy,
    pub certification_mismatch: RulePolicy,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            skill_mismatch: RulePolicy::SILENT_EXCLUDE,
            certification_mismatch: RulePolicy::WARN_EXCLUDE,
        }
    }
}
