// ==========================================
// Mock 规则配置读取器
// ==========================================

use drone_ops_aps::config::{RuleConfigReader, RulePolicy};
use std::error::Error;

/// 可指定返回值或失败的配置读取器
pub struct MockRuleConfig {
    pub skill: RulePolicy,
    pub certification: RulePolicy,
    pub maintenance_check: bool,
    pub fail: bool,
}

impl Default for MockRuleConfig {
    fn default() -> Self {
        Self {
            skill: RulePolicy::SILENT_EXCLUDE,
            certification: RulePolicy::WARN_EXCLUDE,
            maintenance_check: true,
            fail: false,
        }
    }
}

impl MockRuleConfig {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), Box<dyn Error>> {
        if self.fail {
            return Err("config_kv 不可读".into());
        }
        Ok(())
    }
}

impl RuleConfigReader for MockRuleConfig {
    fn get_skill_mismatch_policy(&self) -> Result<RulePolicy, Box<dyn Error>> {
        self.check()?;
        Ok(self.skill)
    }

    fn get_certification_mismatch_policy(&self) -> Result<RulePolicy, Box<dyn Error>> {
        self.check()?;
        Ok(self.certification)
    }

    fn get_maintenance_check_enabled(&self) -> Result<bool, Box<dyn Error>> {
        self.check()?;
        Ok(self.maintenance_check)
    }
}
