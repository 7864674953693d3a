// ==========================================
// 无人机作业排班系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::rule_config_trait::RuleConfigReader;
use crate::config::rule_policy::RulePolicy;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tracing::warn;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 的配置值 (UPSERT)
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare(
            "SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key"
        )?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
            ))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    /// 读取布尔配置 (true/false/1/0), 非法值回落默认并告警
    fn get_bool_or_default(&self, key: &str, default: bool) -> Result<bool, Box<dyn Error>> {
        let value = match self.get_config_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };

        match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => {
                warn!(config_key = key, raw_value = %value, "布尔配置格式错误，使用默认值");
                Ok(default)
            }
        }
    }

    fn get_rule_policy(
        &self,
        exclude_key: &str,
        warn_key: &str,
        default: RulePolicy,
    ) -> Result<RulePolicy, Box<dyn Error>> {
        Ok(RulePolicy {
            exclude: self.get_bool_or_default(exclude_key, default.exclude)?,
            warn: self.get_bool_or_default(warn_key, default.warn)?,
        })
    }
}

// ==========================================
// RuleConfigReader Trait 实现
// ==========================================
impl RuleConfigReader for ConfigManager {
    fn get_skill_mismatch_policy(&self) -> Result<RulePolicy, Box<dyn Error>> {
        self.get_rule_policy(
            config_keys::RULE_SKILL_MISMATCH_EXCLUDE,
            config_keys::RULE_SKILL_MISMATCH_WARN,
            RulePolicy::SILENT_EXCLUDE,
        )
    }

    fn get_certification_mismatch_policy(&self) -> Result<RulePolicy, Box<dyn Error>> {
        self.get_rule_policy(
            config_keys::RULE_CERTIFICATION_MISMATCH_EXCLUDE,
            config_keys::RULE_CERTIFICATION_MISMATCH_WARN,
            RulePolicy::WARN_EXCLUDE,
        )
    }

    fn get_maintenance_check_enabled(&self) -> Result<bool, Box<dyn Error>> {
        self.get_bool_or_default(config_keys::DRONE_MAINTENANCE_CHECK_ENABLED, true)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 技能不符
    pub const RULE_SKILL_MISMATCH_EXCLUDE: &str = "rule_skill_mismatch_exclude";
    pub const RULE_SKILL_MISMATCH_WARN: &str = "rule_skill_mismatch_warn";

    // 资质不符
    pub const RULE_CERTIFICATION_MISMATCH_EXCLUDE: &str = "rule_certification_mismatch_exclude";
    pub const RULE_CERTIFICATION_MISMATCH_WARN: &str = "rule_certification_mismatch_warn";

    // 机队维保
    pub const DRONE_MAINTENANCE_CHECK_ENABLED: &str = "drone_maintenance_check_enabled";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::rule_config_trait::load_eligibility_policy;
    use crate::config::rule_policy::EligibilityPolicy;
    use crate::db::ensure_schema;

    fn manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_defaults_when_table_empty() {
        let config = manager();
        assert_eq!(load_eligibility_policy(&config), EligibilityPolicy::default());
        assert!(config.get_maintenance_check_enabled().unwrap());
    }

    #[test]
    fn test_override_skill_warning() {
        let config = manager();
        config
            .set_global_config_value(config_keys::RULE_SKILL_MISMATCH_WARN, "true")
            .unwrap();

        let policy = load_eligibility_policy(&config);
        assert_eq!(policy.skill_mismatch, RulePolicy::WARN_EXCLUDE);
        assert_eq!(policy.certification_mismatch, RulePolicy::WARN_EXCLUDE);
    }

    #[test]
    fn test_malformed_bool_falls_back() {
        let config = manager();
        config
            .set_global_config_value(config_keys::DRONE_MAINTENANCE_CHECK_ENABLED, "maybe")
            .unwrap();
        assert!(config.get_maintenance_check_enabled().unwrap());

        config
            .set_global_config_value(config_keys::DRONE_MAINTENANCE_CHECK_ENABLED, "0")
            .unwrap();
        assert!(!config.get_maintenance_check_enabled().unwrap());
    }

    #[test]
    fn test_config_snapshot_contains_overrides() {
        let config = manager();
        config
            .set_global_config_value(config_keys::RULE_CERTIFICATION_MISMATCH_WARN, "false")
            .unwrap();
        let snapshot = config.get_config_snapshot().unwrap();
        assert!(snapshot.contains(config_keys::RULE_CERTIFICATION_MISMATCH_WARN));
    }
}
