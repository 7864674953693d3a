// ==========================================
// 无人机作业排班系统 - 任务领域模型
// ==========================================
// 对齐: missions 表
// 不变量: duration_days >= 1 (起止日期均计入)
// ==========================================

use crate::domain::types::{MissionPriority, WeatherForecast};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Mission - 作业任务
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub project_id: String,
    pub client: Option<String>,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub required_skill: String,
    pub required_certs: Vec<String>,
    pub mission_budget_inr: f64,
    pub weather_forecast: WeatherForecast,
    pub priority: MissionPriority,
}

impl Mission {
    /// 任务天数 (含首尾两天)
    pub fn duration_days(&self) -> i64 {
        inclusive_days(self.start_date, self.end_date)
    }

    /// 日期区间是否合法 (end >= start)
    pub fn is_well_formed(&self) -> bool {
        self.duration_days() >= 1
    }
}

/// 含首尾的天数: (end - start).days + 1
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days() + 1
}
