// ==========================================
// 无人机作业排班系统 - 飞手领域模型
// ==========================================
// 对齐: pilot_roster 表
// 所有权: 记录存储持有, 引擎只读快照
// ==========================================

use crate::domain::types::PilotStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// Pilot - 飞手
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pilot {
    pub pilot_id: String,
    pub name: String,
    pub status: PilotStatus,
    pub location: String,
    pub skills: Vec<String>,         // 能力标签
    pub certifications: Vec<String>, // 资质标签
    pub daily_rate_inr: f64,         // 日薪
    pub current_assignment: Option<String>, // None 表示空闲
}

impl Pilot {
    /// 是否已被占用
    pub fn is_assigned(&self) -> bool {
        self.current_assignment.is_some()
    }

    /// 指定天数的费用
    pub fn cost_for_days(&self, days: i64) -> f64 {
        self.daily_rate_inr * days as f64
    }
}
