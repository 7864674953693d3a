// ==========================================
// 无人机作业排班系统 - 规则配置读取 Trait
// ==========================================
// 职责: 定义引擎/查询所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::rule_policy::{EligibilityPolicy, RulePolicy};
use std::error::Error;
use tracing::warn;

// ==========================================
// RuleConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait RuleConfigReader: Send + Sync {
    /// 技能不符规则的处理方式
    ///
    /// # 默认值
    /// - exclude=true, warn=false
    fn get_skill_mismatch_policy(&self) -> Result<RulePolicy, Box<dyn Error>>;

    /// 资质不符规则的处理方式
    ///
    /// # 默认值
    /// - exclude=true, warn=true
    fn get_certification_mismatch_policy(&self) -> Result<RulePolicy, Box<dyn Error>>;

    /// 无人机可用查询是否剔除维保逾期机体
    ///
    /// # 默认值
    /// - true
    fn get_maintenance_check_enabled(&self) -> Result<bool, Box<dyn Error>>;
}

/// 从配置读取匹配策略; 读取失败时回落默认值
pub fn load_eligibility_policy(reader: &dyn RuleConfigReader) -> EligibilityPolicy {
    let defaults = EligibilityPolicy::default();

    let skill_mismatch = reader.get_skill_mismatch_policy().unwrap_or_else(|e| {
        warn!(error = %e, "技能规则配置读取失败，使用默认值");
        defaults.skill_mismatch
    });
    let certification_mismatch = reader
        .get_certification_mismatch_policy()
        .unwrap_or_else(|e| {
            warn!(error = %e, "资质规则配置读取失败，使用默认值");
            defaults.certification_mismatch
        });

    EligibilityPolicy {
        skill_mismatch,
        certification_mismatch,
    }
}

/// 读取维保检查开关; 读取失败时回落 true
pub fn load_maintenance_check(reader: &dyn RuleConfigReader) -> bool {
    reader.get_maintenance_check_enabled().unwrap_or_else(|e| {
        warn!(error = %e, "维保检查配置读取失败，使用默认值");
        true
    })
}
