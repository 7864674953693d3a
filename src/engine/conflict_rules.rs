// ==========================================
// 无人机作业排班系统 - 冲突规则纯函数库
// ==========================================
// 职责: 技能/资质/天气/日期区间 的冲突判定
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::WeatherForecast;
use chrono::NaiveDate;

/// 雨天作业所需的防护等级标记
pub const RAIN_PROOF_RATING: &str = "IP43";

// ==========================================
// ConflictRules - 纯函数工具类
// ==========================================
pub struct ConflictRules;

impl ConflictRules {
    /// 标签探针: 任一标签包含 needle (大小写不敏感的子串匹配)
    ///
    /// 空探针视为命中
    pub fn tags_contain(tags: &[String], needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }

    /// 技能不符
    ///
    /// # 规则
    /// - required_skill 作为子串探针, 大小写不敏感
    /// - 不是精确的集合成员判断
    pub fn skill_mismatch(pilot_skills: &[String], required_skill: &str) -> bool {
        !Self::tags_contain(pilot_skills, required_skill)
    }

    /// 资质不符
    ///
    /// # 规则
    /// - 两侧均为已去空白的标签列表 (入库时按逗号拆分)
    /// - 每个要求的资质必须逐字出现在飞手资质中 (大小写敏感)
    /// - 要求为空时恒为 false
    pub fn certification_mismatch(pilot_certs: &[String], required_certs: &[String]) -> bool {
        !required_certs
            .iter()
            .all(|required| pilot_certs.iter().any(|held| held == required))
    }

    /// 天气冲突
    ///
    /// # 规则
    /// - 仅当预报逐字为 Rainy 且防护等级不含 "IP43" 时为 true
    pub fn weather_conflict(weather_resistance: &str, forecast: &WeatherForecast) -> bool {
        *forecast == WeatherForecast::Rainy && !weather_resistance.contains(RAIN_PROOF_RATING)
    }

    /// 日期区间重叠 (闭区间)
    ///
    /// 尚未接入匹配流程, 目前只检查单一的"已占用"字段
    pub fn date_overlap(
        start1: NaiveDate,
        end1: NaiveDate,
        start2: NaiveDate,
        end2: NaiveDate,
    ) -> bool {
        start1 <= end2 && start2 <= end1
    }
}
